//! Record storage for the transit fleet API.
//!
//! Records are loaded from [`fixtures::Fixtures`] at startup and held in
//! process memory by [`storage::memory::MemoryStorage`]. Handlers only see the
//! [`storage::Storage`] trait family.

pub mod fixtures;
pub mod models;
pub mod storage;

//! Shared wire types for the transit fleet API.
//!
//! [`views`] are response bodies, [`params`] are request bodies, and
//! [`caller`] describes who is making an authenticated request.

pub mod caller;
pub mod params;
pub mod views;

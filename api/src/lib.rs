//! Transit fleet API service.
//!
//! Serves bus, stop and route lookups to the rider apps and lets logged-in
//! drivers report their bus's position.
//!
//! # Configuration
//!
//! The API requires a shared secret for signing driver tokens. See
//! [`config::TransitApiConfig`] for configuration options.
//!
//! # Authentication
//!
//! Drivers exchange email and secret for an HS256 bearer token at `/login`.
//! See [`auth::jwt`] for the token format and [`auth::Auth`] for how
//! protected handlers receive the caller.

pub mod auth;
pub mod config;
pub mod server;

pub(crate) mod context;
pub(crate) mod error;
pub(crate) mod handlers;

//! Input parameters for the various operations of the transit API.

mod auth;
pub use auth::*;

mod driver;
pub use driver::*;

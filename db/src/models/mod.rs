pub mod bus;
pub mod driver;
pub mod route;
pub mod stop;

pub use bus::*;
pub use driver::*;
pub use route::*;
pub use stop::*;

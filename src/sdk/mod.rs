pub mod config;
pub mod coordinator;
pub mod geo;
pub mod location;
pub mod routing;
pub mod util;

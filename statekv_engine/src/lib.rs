mod column_family;
mod config;
pub mod consistency;
mod errors;
pub mod metrics;
mod store;

pub use column_family::*;
pub use config::*;
pub use errors::*;
pub use store::*;

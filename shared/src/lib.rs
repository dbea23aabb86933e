pub mod models;
pub mod services;
pub mod errors;
pub mod config;
pub mod responses;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use config::*;
pub use responses::*;

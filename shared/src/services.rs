pub mod directory_client;
pub mod query_service;
pub mod reconciliation_service;

pub use directory_client::*;
pub use query_service::*;
pub use reconciliation_service::*;

//! Shared code for the product CRUD functions.
//!
//! Each deployed function binary picks one [`Operation`] and hands it the
//! process-wide [`DynamoStore`]; everything else lives here.

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod model;
pub mod store;
pub mod telemetry;

pub use config::Config;
pub use envelope::ProductRequestExt;
pub use error::{RequestError, StoreError};
pub use handler::Operation;
pub use model::Product;
pub use store::{DynamoStore, MemoryStore, ProductStore};

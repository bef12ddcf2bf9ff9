use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::Product;

mod dynamo;
mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Key-based access to the products table. Each method is exactly one call
/// against the backing table; nothing is retried here.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get(&self, id: u64) -> Result<Option<Product>, StoreError>;

    /// Every product in the table, in the table's own iteration order.
    async fn scan(&self) -> Result<Vec<Product>, StoreError>;

    /// Creates the product or replaces whatever is stored under its id.
    async fn put(&self, product: &Product) -> Result<(), StoreError>;

    /// Removing an id that isn't stored is not an error.
    async fn delete(&self, id: u64) -> Result<(), StoreError>;
}

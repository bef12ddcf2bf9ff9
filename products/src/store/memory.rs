use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Item, Product};
use crate::store::ProductStore;

/// An in-process table for local runs and tests.
///
/// Products are kept as DynamoDB items, so reads go through the same
/// conversion as the real table. Scans return items in id order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<u64, Item>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw item as-is, bypassing [`Product::to_item`].
    pub fn insert_item(&self, id: u64, item: Item) {
        self.table().insert(id, item);
    }

    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// How many store operations have been issued.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn table(&self) -> MutexGuard<'_, BTreeMap<u64, Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn get(&self, id: u64) -> Result<Option<Product>, StoreError> {
        self.record_call();
        self.table().get(&id).map(Product::from_item).transpose()
    }

    async fn scan(&self) -> Result<Vec<Product>, StoreError> {
        self.record_call();
        self.table().values().map(Product::from_item).collect()
    }

    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        self.record_call();
        self.table().insert(product.id, product.to_item());
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.record_call();
        self.table().remove(&id);
        Ok(())
    }
}

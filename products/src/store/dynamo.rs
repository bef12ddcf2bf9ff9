use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_sdk_dynamodb as ddb;
use tokio_stream::StreamExt;
use tracing::debug;

use crate::config::Config;
use crate::error::StoreError;
use crate::model::{key_value, Product, ID};
use crate::store::ProductStore;

/// The products table in DynamoDB.
///
/// Built once per process and shared by every invocation; the client holds
/// its own connection pool and no per-request state.
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: ddb::Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: ddb::Client, table_name: impl Into<String>) -> Self {
        Self { client, table_name: table_name.into() }
    }

    pub async fn from_config(config: &Config) -> Self {
        let region_provider = RegionProviderChain::default_provider().or_else("us-east-1");
        let sdk_config = aws_config::from_env().region(region_provider).load().await;
        let ddb_config = match &config.dynamodb_endpoint {
            Some(endpoint) => ddb::config::Builder::from(&sdk_config).endpoint_url(endpoint.to_owned()).build(),
            None => ddb::config::Builder::from(&sdk_config).build(),
        };
        Self::new(ddb::Client::from_conf(ddb_config), config.table_name.to_owned())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ProductStore for DynamoStore {
    async fn get(&self, id: u64) -> Result<Option<Product>, StoreError> {
        let output = self.client.get_item()
            .table_name(self.table_name.to_owned())
            .key(ID, key_value(id))
            .send()
            .await
            .map_err(|e| StoreError::sdk("GetItem", &self.table_name, e))?;
        output.item().map(Product::from_item).transpose()
    }

    async fn scan(&self) -> Result<Vec<Product>, StoreError> {
        let mut pages = self.client.scan()
            .table_name(self.table_name.to_owned())
            .into_paginator()
            .send();
        let mut products = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StoreError::sdk("Scan", &self.table_name, e))?;
            if let Some(items) = page.items() {
                debug!("scan page with {} items", items.len());
                for item in items {
                    products.push(Product::from_item(item)?);
                }
            }
        }
        Ok(products)
    }

    async fn put(&self, product: &Product) -> Result<(), StoreError> {
        self.client.put_item()
            .table_name(self.table_name.to_owned())
            .set_item(Some(product.to_item()))
            .send()
            .await
            .map_err(|e| StoreError::sdk("PutItem", &self.table_name, e))?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.client.delete_item()
            .table_name(self.table_name.to_owned())
            .key(ID, key_value(id))
            .send()
            .await
            .map_err(|e| StoreError::sdk("DeleteItem", &self.table_name, e))?;
        Ok(())
    }
}

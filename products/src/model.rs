use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::model::AttributeValue;
use serde::{Deserialize, Serialize};

use crate::error::{RequestError, StoreError};

pub const ID: &str = "id";
pub const NAME: &str = "name";
pub const PRICE: &str = "price";

/// A raw DynamoDB item.
pub type Item = HashMap<String, AttributeValue>;

// DynamoDB numbers are limited to magnitudes in [1e-130, 1e126).
const MAX_NUMBER_MAGNITUDE: f64 = 1e126;
const MIN_NUMBER_MAGNITUDE: f64 = 1e-130;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: f64) -> Self {
        Self { id, name: name.into(), price }
    }

    /// Parses the serialized product carried in a request `body`.
    pub fn from_body(body: &str) -> Result<Self, RequestError> {
        let product: Product = serde_json::from_str(body).map_err(RequestError::Body)?;
        let magnitude = product.price.abs();
        if magnitude >= MAX_NUMBER_MAGNITUDE || (magnitude != 0.0 && magnitude < MIN_NUMBER_MAGNITUDE) {
            return Err(RequestError::PriceOutOfRange(product.price));
        }
        Ok(product)
    }

    pub fn to_item(&self) -> Item {
        HashMap::from([
            (ID.to_string(), key_value(self.id)),
            (NAME.to_string(), AttributeValue::S(self.name.to_owned())),
            (PRICE.to_string(), AttributeValue::N(self.price.to_string())),
        ])
    }

    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        Ok(Self {
            id: number(item, ID)?,
            name: string(item, NAME)?,
            price: number(item, PRICE)?,
        })
    }
}

/// The partition key value for a product id.
pub fn key_value(id: u64) -> AttributeValue {
    AttributeValue::N(id.to_string())
}

/// Parses an id taken from path or query parameters.
pub fn parse_id(raw: &str) -> Result<u64, RequestError> {
    u64::from_str(raw).map_err(|_| RequestError::InvalidId(raw.to_string()))
}

fn number<T: FromStr>(item: &Item, name: &str) -> Result<T, StoreError> {
    match item.get(name) {
        Some(AttributeValue::N(n)) => T::from_str(n)
            .map_err(|_| StoreError::conversion(format!("attribute '{}' is not a valid number: {}", name, n))),
        Some(other) => Err(StoreError::conversion(format!("attribute '{}' is not a number: {:?}", name, other))),
        None => Err(StoreError::conversion(format!("missing attribute '{}'", name))),
    }
}

fn string(item: &Item, name: &str) -> Result<String, StoreError> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Ok(s.to_string()),
        Some(other) => Err(StoreError::conversion(format!("attribute '{}' is not a string: {:?}", name, other))),
        None => Err(StoreError::conversion(format!("missing attribute '{}'", name))),
    }
}

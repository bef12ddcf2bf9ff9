use thiserror::Error;

/// Problems with what the caller sent. These become 400 responses.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("malformed request: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("malformed product body: {0}")]
    Body(#[source] serde_json::Error),

    #[error("Missing request body")]
    MissingBody,

    #[error("Missing id path parameter")]
    MissingId,

    #[error("invalid id {0:?}: expected a non-negative integer")]
    InvalidId(String),

    #[error("price {0} is outside the range DynamoDB can store")]
    PriceOutOfRange(f64),
}

/// Failures talking to the table. These are never turned into a response;
/// they propagate to the runtime as a failed invocation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("DynamoDB {operation} on table '{table}' failed")]
    Sdk {
        operation: &'static str,
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("item could not be converted to a product: {reason}")]
    Conversion { reason: String },
}

impl StoreError {
    pub fn sdk<E>(operation: &'static str, table: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Sdk {
            operation,
            table: table.to_string(),
            source: Box::new(source),
        }
    }

    pub fn conversion(reason: impl Into<String>) -> Self {
        StoreError::Conversion { reason: reason.into() }
    }
}

//! The four product operations.
//!
//! Every path ends in a complete response envelope: caller mistakes become
//! 400s, a missing record is a 404. Only store failures escape as `Err`,
//! which the runtime reports as a failed invocation.

use std::io;

use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, error, info, info_span, Instrument};

use crate::envelope::{
    bad_request, json_response, message_response, not_found, parse_request, ProductPayload, ProductRequestExt,
    ProductsPayload, DELETED_MESSAGE, UPSERTED_MESSAGE,
};
use crate::error::RequestError;
use crate::model::{parse_id, Product};
use crate::store::ProductStore;

/// Which operation a deployed function serves. The gateway's routing table
/// decides this, never the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Get,
    List,
    Put,
    Delete,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Get => "get_product",
            Operation::List => "list_products",
            Operation::Put => "put_product",
            Operation::Delete => "delete_product",
        }
    }

    pub async fn handle<S>(self, store: &S, payload: Value) -> Result<ApiGatewayProxyResponse, Error>
    where
        S: ProductStore + ?Sized,
    {
        // Listing never looks at the request.
        if self == Operation::List {
            return list_products(store).await;
        }
        let request = match parse_request(payload) {
            Ok(request) => request,
            Err(e) => return reject(e),
        };
        debug!("{} request: {:?} {:?}", self.name(), request.http_method, request.path);
        match self {
            Operation::Get => get_product(store, &request).await,
            Operation::Put => put_product(store, &request).await,
            Operation::Delete => delete_product(store, &request).await,
            Operation::List => list_products(store).await,
        }
    }

    /// Handles raw UTF-8 JSON input and writes the response envelope as
    /// UTF-8 JSON to `output`.
    pub async fn invoke<S, W>(self, store: &S, input: &[u8], output: W) -> Result<(), Error>
    where
        S: ProductStore + ?Sized,
        W: io::Write,
    {
        let response = match serde_json::from_slice::<Value>(input) {
            Ok(payload) => self.handle(store, payload).await?,
            Err(_) if self == Operation::List => list_products(store).await?,
            Err(e) => reject(RequestError::Envelope(e))?,
        };
        serde_json::to_writer(output, &response)?;
        Ok(())
    }

    /// Entry point for the function binaries.
    pub async fn function_handler<S>(self, store: &S, event: LambdaEvent<Value>) -> Result<ApiGatewayProxyResponse, Error>
    where
        S: ProductStore + ?Sized,
    {
        let span = info_span!("request", operation = self.name(), request_id = %event.context.request_id);
        self.handle(store, event.payload).instrument(span).await
    }
}

pub async fn get_product<S>(store: &S, request: &ApiGatewayProxyRequest) -> Result<ApiGatewayProxyResponse, Error>
where
    S: ProductStore + ?Sized,
{
    let id = match request.id() {
        Some(raw) => match parse_id(raw) {
            Ok(id) => id,
            Err(e) => return reject(e),
        },
        None => {
            debug!("no id in path or query string");
            return Ok(not_found()?);
        }
    };
    match store.get(id).await? {
        Some(product) => Ok(json_response(200, &ProductPayload { product })?),
        None => {
            info!("product {} not found", id);
            Ok(not_found()?)
        }
    }
}

pub async fn list_products<S>(store: &S) -> Result<ApiGatewayProxyResponse, Error>
where
    S: ProductStore + ?Sized,
{
    let products = store.scan().await?;
    info!("listing {} products", products.len());
    Ok(json_response(200, &ProductsPayload { products })?)
}

pub async fn put_product<S>(store: &S, request: &ApiGatewayProxyRequest) -> Result<ApiGatewayProxyResponse, Error>
where
    S: ProductStore + ?Sized,
{
    let product = match request.body.as_deref().ok_or(RequestError::MissingBody).and_then(Product::from_body) {
        Ok(product) => product,
        Err(e) => return reject(e),
    };
    info!("upserting product {}", product.id);
    store.put(&product).await?;
    Ok(message_response(200, UPSERTED_MESSAGE)?)
}

pub async fn delete_product<S>(store: &S, request: &ApiGatewayProxyRequest) -> Result<ApiGatewayProxyResponse, Error>
where
    S: ProductStore + ?Sized,
{
    let id = match request.path_id().ok_or(RequestError::MissingId).and_then(parse_id) {
        Ok(id) => id,
        Err(e) => return reject(e),
    };
    info!("deleting product {}", id);
    store.delete(id).await?;
    Ok(message_response(201, DELETED_MESSAGE)?)
}

fn reject(e: RequestError) -> Result<ApiGatewayProxyResponse, Error> {
    error!("rejecting request: {}", e);
    Ok(bad_request(&e)?)
}

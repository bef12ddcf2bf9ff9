//! Reading API gateway proxy requests and building proxy responses.
//!
//! The payload field names (`product`, `products`, `message`) are part of the
//! wire contract with existing callers and must not change.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::model::{Product, ID};

pub const NOT_FOUND_MESSAGE: &str = "No items found";
pub const UPSERTED_MESSAGE: &str = "New Item created/updated";
pub const DELETED_MESSAGE: &str = "Item deleted";

pub fn parse_request(payload: serde_json::Value) -> Result<ApiGatewayProxyRequest, RequestError> {
    serde_json::from_value(payload).map_err(RequestError::Envelope)
}

/// Product lookups on a gateway proxy request.
pub trait ProductRequestExt {
    fn path_id(&self) -> Option<&str>;

    fn query_id(&self) -> Option<&str>;

    /// The `id` path parameter. The query string is only consulted when the
    /// request carries no path parameters at all.
    fn id(&self) -> Option<&str>;
}

impl ProductRequestExt for ApiGatewayProxyRequest {
    fn path_id(&self) -> Option<&str> {
        self.path_parameters.get(ID).map(String::as_str)
    }

    fn query_id(&self) -> Option<&str> {
        self.query_string_parameters.first(ID)
    }

    fn id(&self) -> Option<&str> {
        if self.path_parameters.is_empty() {
            self.query_id()
        } else {
            self.path_id()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProductPayload {
    pub product: Product,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProductsPayload {
    pub products: Vec<Product>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MessagePayload {
    pub message: String,
}

pub fn json_response<T: Serialize>(status_code: i64, payload: &T) -> serde_json::Result<ApiGatewayProxyResponse> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(ApiGatewayProxyResponse {
        status_code,
        headers,
        body: Some(Body::Text(serde_json::to_string(payload)?)),
        ..Default::default()
    })
}

pub fn message_response(status_code: i64, message: impl Into<String>) -> serde_json::Result<ApiGatewayProxyResponse> {
    json_response(status_code, &MessagePayload { message: message.into() })
}

pub fn not_found() -> serde_json::Result<ApiGatewayProxyResponse> {
    message_response(404, NOT_FOUND_MESSAGE)
}

pub fn bad_request(error: &RequestError) -> serde_json::Result<ApiGatewayProxyResponse> {
    message_response(400, error.to_string())
}

/// The response body as text; empty when there is none.
pub fn body_text(response: &ApiGatewayProxyResponse) -> &str {
    match &response.body {
        Some(Body::Text(text)) => text,
        Some(Body::Binary(bytes)) => std::str::from_utf8(bytes).unwrap_or_default(),
        Some(Body::Empty) | None => "",
    }
}

/// Decodes the serialized JSON body.
pub fn payload<T: DeserializeOwned>(response: &ApiGatewayProxyResponse) -> serde_json::Result<T> {
    serde_json::from_str(body_text(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_gateway_envelope() {
        let request = parse_request(json!({
            "resource": "/products/{id}",
            "path": "/products/7",
            "httpMethod": "GET",
            "pathParameters": {"id": "7"},
            "queryStringParameters": null,
            "body": null
        }))
        .unwrap();
        assert_eq!(request.path_id(), Some("7"));
        assert_eq!(request.query_id(), None);
        assert_eq!(request.body, None);
    }

    #[test]
    fn query_string_only_without_path_parameters() {
        let request = parse_request(json!({
            "httpMethod": "GET",
            "pathParameters": null,
            "queryStringParameters": {"id": "3"}
        }))
        .unwrap();
        assert_eq!(request.path_id(), None);
        assert_eq!(request.id(), Some("3"));

        let request = parse_request(json!({
            "httpMethod": "GET",
            "pathParameters": {"other": "x"},
            "queryStringParameters": {"id": "5"}
        }))
        .unwrap();
        assert_eq!(request.id(), None);

        let request = parse_request(json!({
            "httpMethod": "GET",
            "pathParameters": {"id": "1"},
            "queryStringParameters": {"id": "2"}
        }))
        .unwrap();
        assert_eq!(request.id(), Some("1"));
    }

    #[test]
    fn rejects_non_object_envelopes() {
        assert!(matches!(parse_request(json!([1, 2, 3])), Err(RequestError::Envelope(_))));
        assert!(matches!(
            parse_request(json!({"httpMethod": "PUT", "body": 12})),
            Err(RequestError::Envelope(_))
        ));
    }

    #[test]
    fn response_wire_format() {
        let response = not_found().unwrap();
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["statusCode"], 404);
        assert_eq!(wire["headers"]["content-type"], "application/json");
        assert_eq!(wire["body"], r#"{"message":"No items found"}"#);
    }

    #[test]
    fn product_payload_body() {
        let response = json_response(200, &ProductPayload { product: Product::new(1, "Widget", 9.99) }).unwrap();
        assert_eq!(body_text(&response), r#"{"product":{"id":1,"name":"Widget","price":9.99}}"#);
        let decoded: ProductPayload = payload(&response).unwrap();
        assert_eq!(decoded.product.name, "Widget");
    }
}

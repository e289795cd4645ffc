//! Stateless request factory for the MyDHL API.
//!
//! # Design
//! `MyDhlClient` holds only configuration and carries no mutable state
//! between calls. It turns endpoint paths and JSON bodies into `HttpRequest`
//! values and hands out per-shipment builders; it never touches the network.

use serde::Deserialize;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::service::ShipmentService;

pub const MESSAGE_REFERENCE_HEADER: &str = "message-reference";

#[derive(Debug, Clone)]
pub struct MyDhlClient {
    base_url: String,
    accept_language: Option<String>,
}

impl MyDhlClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            accept_language: config.accept_language,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start a new shipment builder bound to this client.
    pub fn shipments(&self) -> ShipmentService<'_> {
        ShipmentService::new(self)
    }

    pub(crate) fn build_post(&self, endpoint: &str, body: String, message_reference: Uuid) -> HttpRequest {
        let mut headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            (MESSAGE_REFERENCE_HEADER.to_string(), message_reference.to_string()),
        ];
        if let Some(language) = &self.accept_language {
            headers.push(("accept-language".to_string(), language.clone()));
        }
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/{}", self.base_url, endpoint.trim_start_matches('/')),
            headers,
            body: Some(body),
        }
    }
}

/// RFC 7807 problem document returned by the carrier on errors.
#[derive(Debug, Deserialize)]
struct Problem {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Map non-success status codes to `ApiError::HttpError`, preferring the
/// problem document's `detail` over the raw body.
pub(crate) fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    let body = serde_json::from_str::<Problem>(&response.body)
        .ok()
        .and_then(|p| p.detail.or(p.title))
        .unwrap_or_else(|| response.body.clone());
    Err(ApiError::HttpError {
        status: response.status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MyDhlClient {
        MyDhlClient::new(ClientConfig::new("http://localhost:3000"))
    }

    #[test]
    fn build_post_produces_correct_request() {
        let req = client().build_post("shipments", "{}".to_string(), Uuid::nil());
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/shipments");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(
            req.header(MESSAGE_REFERENCE_HEADER),
            Some("00000000-0000-0000-0000-000000000000")
        );
        assert!(req.header("accept-language").is_none());
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn accept_language_header_is_sent_when_configured() {
        let client = MyDhlClient::new(ClientConfig::new("http://localhost:3000").with_accept_language("eng"));
        let req = client.build_post("shipments", String::new(), Uuid::nil());
        assert_eq!(req.header("accept-language"), Some("eng"));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = MyDhlClient::new(ClientConfig::new("http://localhost:3000/"));
        let req = client.build_post("/shipments", String::new(), Uuid::nil());
        assert_eq!(req.path, "http://localhost:3000/shipments");
    }

    #[test]
    fn check_status_accepts_expected() {
        let response = HttpResponse {
            status: 201,
            headers: Vec::new(),
            body: String::new(),
        };
        assert!(check_status(&response, &[200, 201]).is_ok());
    }

    #[test]
    fn check_status_falls_back_to_title() {
        let response = HttpResponse {
            status: 401,
            headers: Vec::new(),
            body: r#"{"title":"Unauthorized"}"#.to_string(),
        };
        let err = check_status(&response, &[201]).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 401, ref body } if body == "Unauthorized"));
    }
}

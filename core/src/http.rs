//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. The core builds `HttpRequest`
//! values and parses `HttpResponse` values; executing the round-trip is the
//! job of an `HttpTransport` supplied by the caller. Authentication, retries
//! and timeouts all live on that side of the boundary.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `ShipmentService::build_request`. Header names are lowercase.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Look up a header value by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// The caller's HTTP client.
///
/// Implementations must return non-2xx responses as `Ok` so the parser can
/// map carrier problem documents; `Err` is reserved for failures where no
/// response was received at all.
pub trait HttpTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

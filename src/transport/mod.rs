//! Transport Strategies
//!
//! The transport moves an outbound request to the backend. Which strategy
//! a client uses is decided once, at startup, via configuration:
//! - [`HttpTransport`]: real HTTP calls against the hosted platform.
//! - [`MockTransport`]: canned payloads for offline development.
//!
//! The trait is also the seam the dispatcher tests script against.

mod http;
mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// HTTP method for an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A single request handed to the transport. Ephemeral: built per call,
/// discarded after the response or final failure.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Endpoint name, appended to the platform's functions path.
    pub endpoint: String,
    pub method: Method,
    /// JSON payload; ignored for GET requests.
    pub body: Value,
    /// Precomputed `Bearer <token>` value, when authenticated.
    pub auth_header: Option<String>,
}

/// Response as seen by the dispatcher: status plus decoded JSON body.
///
/// Non-JSON bodies (error text, empty bodies) come back as a JSON string
/// so the dispatcher can always surface them in a message.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP layer: the request produced no response at all.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport failure: {0}")]
    Other(String),
}

/// Strategy for delivering requests to the backend.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short name for logging ("http", "mock").
    fn name(&self) -> &'static str;

    /// Deliver a request. Non-2xx statuses are `Ok` responses; `Err` means
    /// the request never completed.
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError>;

    /// Cheap reachability check against the platform's base URL.
    async fn probe(&self) -> Result<(), TransportError>;
}

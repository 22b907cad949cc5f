//! Mock Transport
//!
//! Offline stand-in for the hosted platform: every request succeeds with a
//! canned payload picked by endpoint family. Selected at startup via
//! configuration for development without backend access.

use super::{OutboundRequest, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Transport returning fixed development payloads.
#[derive(Debug, Default)]
pub struct MockTransport;

impl MockTransport {
    pub fn new() -> Self {
        Self
    }

    fn canned_response(endpoint: &str) -> Value {
        if endpoint.contains("login") || endpoint.contains("register") {
            return json!({
                "token": "mock-token-for-development",
                "user": {
                    "id": "1",
                    "email": "dev@example.com",
                    "name": "Development User"
                },
                "success": true
            });
        }

        if endpoint.contains("chat") {
            return json!({
                "message": "This is a mock response generated without a backend \
                            connection. In production this would be a real \
                            response from the AI.",
                "success": true
            });
        }

        json!({
            "success": true,
            "message": "Mock response for development",
            "data": []
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        tracing::debug!(endpoint = %request.endpoint, "Serving mock response");
        Ok(TransportResponse {
            status: 200,
            body: Self::canned_response(&request.endpoint),
        })
    }

    async fn probe(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

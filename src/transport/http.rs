//! HTTP Transport
//!
//! Real transport against the hosted platform. Endpoints live under a
//! fixed functions path on the platform's base URL; the per-request
//! timeout is enforced by the underlying client.

use super::{Method, OutboundRequest, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Path prefix for remote functions on the platform.
pub const FUNCTIONS_PATH: &str = "functions/v1";

/// Transport issuing real HTTP calls via reqwest.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` with a fixed request timeout.
    pub fn new(base_url: &str, request_timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.base_url, FUNCTIONS_PATH, endpoint)
    }

    fn classify(e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        let url = self.endpoint_url(&request.endpoint);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url).json(&request.body),
        };

        if let Some(header) = &request.auth_header {
            builder = builder.header("Authorization", header);
        }

        let response = builder.send().await.map_err(Self::classify)?;
        let status = response.status().as_u16();

        let text = response.text().await.map_err(Self::classify)?;
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        };

        Ok(TransportResponse { status, body })
    }

    async fn probe(&self) -> Result<(), TransportError> {
        let response = self
            .client
            .head(&self.base_url)
            .send()
            .await
            .map_err(Self::classify)?;

        let status = response.status().as_u16();
        if status < 500 {
            Ok(())
        } else {
            Err(TransportError::Other(format!(
                "base URL returned status {status}"
            )))
        }
    }
}

//! PM Buddy Client
//!
//! The client owns the configuration, the transport strategy, and the
//! session store, and funnels every remote operation through a single
//! dispatch path that handles auth headers, error classification, and
//! retries with exponential backoff.

mod endpoints;

pub use endpoints::{AuthResponse, ChatMessage, ChatResponse, Credentials, NewUser};

use crate::config::{ClientConfig, TransportMode};
use crate::error::{Error, Result};
use crate::session::SessionStore;
use crate::transport::{
    HttpTransport, Method, MockTransport, OutboundRequest, Transport, TransportError,
    TransportResponse,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Backoff cap between retries.
const MAX_BACKOFF_MS: u64 = 8_000;

struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

/// Client for the PM Buddy hosted backend.
///
/// Cheap to clone; all clones share the transport and session store.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    /// Create a client, selecting the transport from the configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport: Arc<dyn Transport> = match config.transport {
            TransportMode::Remote => Arc::new(HttpTransport::new(
                &config.base_url,
                config.request_timeout_ms,
            )),
            TransportMode::Mock => Arc::new(MockTransport::new()),
        };
        Self::with_transport(config, transport)
    }

    /// Create a client with an explicitly injected transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let session = SessionStore::open(&config.session_dir)?;
        tracing::debug!(
            transport = transport.name(),
            base_url = %config.base_url,
            "Client initialized"
        );
        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                session,
            }),
        })
    }

    /// The session boundary: current auth state, header computation.
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.inner.transport)
    }

    /// One-shot reachability check against the platform's base URL.
    pub async fn check_connection(&self) -> bool {
        self.inner.transport.probe().await.is_ok()
    }

    /// Dispatch a request to a named remote function.
    ///
    /// Attaches the bearer header when a session token is stored, then
    /// classifies failures: auth failures (401/403), malformed requests
    /// (400), and timeouts are surfaced immediately; every other failure
    /// is retried up to the configured ceiling with exponential backoff
    /// before the last error is surfaced.
    pub async fn call_endpoint(&self, endpoint: &str, body: Value, method: Method) -> Result<Value> {
        let request_id = Uuid::new_v4();
        let request = OutboundRequest {
            endpoint: endpoint.to_string(),
            method,
            body,
            auth_header: self.inner.session.auth_header(),
        };

        let max_retries = self.inner.config.max_retries;
        let mut attempt: u32 = 0;

        loop {
            if attempt > 0 {
                let delay = backoff_delay(attempt - 1);
                tracing::debug!(
                    %request_id,
                    endpoint,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            tracing::debug!(
                %request_id,
                endpoint,
                method = request.method.as_str(),
                attempt,
                "Dispatching request"
            );

            let error = match self.inner.transport.send(&request).await {
                Ok(response) if response.is_success() => {
                    tracing::debug!(%request_id, endpoint, status = response.status, "Request succeeded");
                    return Ok(response.body);
                }
                Ok(response) => classify_response(response),
                Err(e) => classify_transport_error(e),
            };

            if attempt < max_retries && error.is_retryable() {
                tracing::warn!(%request_id, endpoint, attempt, error = %error, "Request failed, will retry");
                attempt += 1;
                continue;
            }

            tracing::warn!(%request_id, endpoint, attempt, error = %error, "Request failed");
            return Err(error);
        }
    }
}

/// Delay before the retry following failed attempt number `retry`
/// (zero-based): 1s, 2s, 4s, capped at 8s.
fn backoff_delay(retry: u32) -> Duration {
    let ms = 1_000u64
        .saturating_mul(2u64.saturating_pow(retry.min(16)))
        .min(MAX_BACKOFF_MS);
    Duration::from_millis(ms)
}

fn classify_response(response: TransportResponse) -> Error {
    let message = response_message(&response.body);
    match response.status {
        401 | 403 => Error::AuthFailed {
            status: response.status,
            message,
        },
        400 => Error::BadRequest(message),
        status => Error::Api { status, message },
    }
}

fn classify_transport_error(error: TransportError) -> Error {
    match error {
        TransportError::Timeout => Error::Timeout,
        TransportError::Connect(message) | TransportError::Other(message) => {
            Error::Network(message)
        }
    }
}

fn response_message(body: &Value) -> String {
    match body {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

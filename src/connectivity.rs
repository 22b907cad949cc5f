//! Connectivity Monitor
//!
//! Periodic reachability checks against the platform's base URL so a
//! caller can show connection status without issuing a real request.
//! A mock-mode client reports `Offline` and never probes.

use crate::client::Client;
use crate::config::TransportMode;
use crate::transport::{MockTransport, Transport};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Reachability of the hosted platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// A probe is in flight (also the initial state).
    Checking,
    /// The base URL answered the last probe.
    Connected,
    /// The last probe failed.
    Error(String),
    /// Mock transport active; connectivity is not meaningful.
    Offline,
}

/// State snapshot returned by [`ConnectionMonitor::state`].
#[derive(Debug, Clone)]
pub struct ConnectionSnapshot {
    pub state: ConnectionState,
    pub last_check: Option<DateTime<Utc>>,
}

/// Probes the platform on an interval and keeps the latest result.
pub struct ConnectionMonitor {
    transport: Arc<dyn Transport>,
    state: RwLock<ConnectionSnapshot>,
    probe_interval_secs: u64,
    offline: bool,
}

impl ConnectionMonitor {
    /// Monitor probing through `transport` every `probe_interval_secs`.
    pub fn new(transport: Arc<dyn Transport>, probe_interval_secs: u64) -> Arc<Self> {
        Arc::new(Self {
            transport,
            state: RwLock::new(ConnectionSnapshot {
                state: ConnectionState::Checking,
                last_check: None,
            }),
            probe_interval_secs,
            offline: false,
        })
    }

    /// Monitor for a mock-mode client: permanently [`ConnectionState::Offline`].
    pub fn offline() -> Arc<Self> {
        Arc::new(Self {
            transport: Arc::new(MockTransport::new()),
            state: RwLock::new(ConnectionSnapshot {
                state: ConnectionState::Offline,
                last_check: None,
            }),
            probe_interval_secs: 0,
            offline: true,
        })
    }

    /// Monitor matching a client's configured transport.
    pub fn for_client(client: &Client) -> Arc<Self> {
        match client.config().transport {
            TransportMode::Mock => Self::offline(),
            TransportMode::Remote => {
                Self::new(client.transport(), client.config().probe_interval_secs)
            }
        }
    }

    /// Latest snapshot.
    pub async fn state(&self) -> ConnectionSnapshot {
        self.state.read().await.clone()
    }

    /// Run one probe immediately and record the result.
    pub async fn check_now(&self) -> ConnectionState {
        if self.offline {
            return ConnectionState::Offline;
        }

        {
            let mut snapshot = self.state.write().await;
            snapshot.state = ConnectionState::Checking;
        }

        let state = match self.transport.probe().await {
            Ok(()) => {
                tracing::debug!("Connectivity probe succeeded");
                ConnectionState::Connected
            }
            Err(e) => {
                tracing::warn!(error = %e, "Connectivity probe failed");
                ConnectionState::Error(e.to_string())
            }
        };

        let mut snapshot = self.state.write().await;
        snapshot.state = state.clone();
        snapshot.last_check = Some(Utc::now());
        state
    }

    /// Start the background probe loop.
    ///
    /// Probes once immediately, then on every interval tick. Does nothing
    /// for an offline monitor.
    pub fn start(self: Arc<Self>) {
        if self.offline {
            tracing::info!("Mock transport active, connection monitoring disabled");
            return;
        }

        tracing::info!(
            interval_secs = self.probe_interval_secs,
            "Starting connectivity monitor"
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(std::time::Duration::from_secs(
                self.probe_interval_secs.max(1),
            ));

            loop {
                ticker.tick().await;
                self.check_now().await;
            }
        });
    }
}

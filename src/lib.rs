//! # PM Buddy Client
//!
//! Client SDK for the PM Buddy hosted backend: authenticates users,
//! persists the session locally, and forwards chat, document, and search
//! requests to the platform's remote functions.
//!
//! ## Features
//!
//! - **Durable sessions**: token + user record persisted between runs,
//!   read and written through a single module boundary
//! - **Resilient dispatch**: per-request timeout, error classification,
//!   and exponential-backoff retries for transient failures
//! - **Injectable transport**: real HTTP or canned mock payloads, chosen
//!   once at startup
//! - **Connectivity monitoring**: periodic background reachability probes
//!
//! ## Modules
//!
//! - [`session`]: session types and the durable session store
//! - [`transport`]: the transport strategy seam and its implementations
//! - [`client`]: the dispatcher and one wrapper per remote operation
//! - [`connectivity`]: background reachability monitoring
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pmbuddy::{ChatMessage, Client, ClientConfig, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::load_default())?;
//!
//!     // Authenticate; the session is persisted for later runs.
//!     client
//!         .login(&Credentials {
//!             email: "pm@example.com".into(),
//!             password: "secret".into(),
//!         })
//!         .await?;
//!
//!     // Talk to the assistant.
//!     let reply = client
//!         .chat(&[ChatMessage::user("What changed this sprint?")], true)
//!         .await?;
//!     println!("{}", reply.message);
//!
//!     client.logout()?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod session;
pub mod transport;

// Re-export top-level types for convenience
pub use client::{AuthResponse, ChatMessage, ChatResponse, Client, Credentials, NewUser};

pub use config::{ClientConfig, ConfigError, TransportMode, DEFAULT_BASE_URL};

pub use connectivity::{ConnectionMonitor, ConnectionSnapshot, ConnectionState};

pub use error::{Error, Result};

pub use session::{AuthState, KvStore, Session, SessionError, SessionStore, User};

pub use transport::{
    HttpTransport, Method, MockTransport, OutboundRequest, Transport, TransportError,
    TransportResponse,
};

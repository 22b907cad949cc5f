//! Endpoint Wrappers
//!
//! One method per remote function exposed by the backend. Each wrapper
//! names its endpoint and delegates to the dispatcher; auth wrappers also
//! update the session store on success.
//!
//! Operations whose payload shape is owned by the backend take and return
//! raw `serde_json::Value`.

use super::Client;
use crate::error::{Error, Result};
use crate::session::User;
use crate::transport::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Response from the auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub success: bool,
}

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Response from the chat endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(default)]
    pub success: bool,
}

impl Client {
    // ============================================
    // Auth
    // ============================================

    /// Log in and persist the returned session.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let body = self
            .call_endpoint("auth/login", serde_json::to_value(credentials)?, Method::Post)
            .await?;
        self.store_session(body)
    }

    /// Register a new account and persist the returned session.
    pub async fn register(&self, new_user: &NewUser) -> Result<AuthResponse> {
        let body = self
            .call_endpoint("auth/register", serde_json::to_value(new_user)?, Method::Post)
            .await?;
        self.store_session(body)
    }

    /// Log out: destroys the local session. The backend holds no
    /// server-side session state for this client.
    pub fn logout(&self) -> Result<()> {
        self.session().clear_auth()?;
        Ok(())
    }

    fn store_session(&self, body: Value) -> Result<AuthResponse> {
        let auth: AuthResponse = serde_json::from_value(body)?;
        self.session().set_auth(&auth.token, &auth.user)?;
        tracing::info!(user_id = %auth.user.id, "Authenticated");
        Ok(auth)
    }

    // ============================================
    // Chat
    // ============================================

    /// Send a conversation to the assistant, optionally routed through
    /// retrieval-augmented generation.
    pub async fn chat(&self, messages: &[ChatMessage], use_rag: bool) -> Result<ChatResponse> {
        let endpoint = if use_rag {
            "chat-with-rag"
        } else {
            "chat-with-openai"
        };
        let body = self
            .call_endpoint(endpoint, json!({ "messages": messages }), Method::Post)
            .await?;
        serde_json::from_value(body).map_err(Error::from)
    }

    // ============================================
    // Documents
    // ============================================

    pub async fn upload_document(&self, document: Value) -> Result<Value> {
        self.call_endpoint("upload-document", document, Method::Post)
            .await
    }

    pub async fn list_documents(&self) -> Result<Value> {
        self.call_endpoint("list-documents", Value::Null, Method::Get)
            .await
    }

    pub async fn delete_document(&self, doc_id: &str) -> Result<Value> {
        self.call_endpoint("delete-document", json!({ "docId": doc_id }), Method::Post)
            .await
    }

    // ============================================
    // Custom instructions
    // ============================================

    pub async fn update_instructions(&self, instructions: &str) -> Result<Value> {
        self.call_endpoint(
            "update-instructions",
            json!({ "instructions": instructions }),
            Method::Post,
        )
        .await
    }

    pub async fn manage_custom_instructions(&self, instructions: Value) -> Result<Value> {
        self.call_endpoint("manage-custom-instructions", instructions, Method::Post)
            .await
    }

    pub async fn store_instruction(&self, instruction: Value) -> Result<Value> {
        self.call_endpoint("store-instruction", instruction, Method::Post)
            .await
    }

    pub async fn retrieve_instructions(&self, params: Value) -> Result<Value> {
        self.call_endpoint("retrieve-instructions", params, Method::Post)
            .await
    }

    pub async fn get_instructions(&self) -> Result<Value> {
        self.call_endpoint("get-instructions", Value::Null, Method::Get)
            .await
    }

    // ============================================
    // Files
    // ============================================

    pub async fn upload_file(&self, file_data: Value) -> Result<Value> {
        self.call_endpoint("upload-file", file_data, Method::Post)
            .await
    }

    pub async fn retrieve_file(&self, params: Value) -> Result<Value> {
        self.call_endpoint("retrieve-file", params, Method::Post)
            .await
    }

    // ============================================
    // Feedback
    // ============================================

    pub async fn store_feedback(&self, feedback: Value) -> Result<Value> {
        self.call_endpoint("store-feedback", feedback, Method::Post)
            .await
    }

    // ============================================
    // Search
    // ============================================

    pub async fn search_serp(&self, query: Value) -> Result<Value> {
        self.call_endpoint("search-serp-api", query, Method::Post)
            .await
    }

    pub async fn retrieve_search_results(&self, params: Value) -> Result<Value> {
        self.call_endpoint("retrieve-search-results", params, Method::Post)
            .await
    }

    // ============================================
    // Audio
    // ============================================

    pub async fn transcribe_audio(&self, audio_data: Value) -> Result<Value> {
        self.call_endpoint("transcribe-audio", audio_data, Method::Post)
            .await
    }

    // ============================================
    // Corpus
    // ============================================

    pub async fn store_embeddings(&self, data: Value) -> Result<Value> {
        self.call_endpoint("store-embeddings", data, Method::Post)
            .await
    }

    pub async fn add_article_to_corpus(&self, article: Value) -> Result<Value> {
        self.call_endpoint("add-article-to-corpus", article, Method::Post)
            .await
    }

    pub async fn retrieve_articles(&self, params: Value) -> Result<Value> {
        self.call_endpoint("retrieve-articles", params, Method::Post)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::transport::{
        MockTransport, OutboundRequest, Transport, TransportError, TransportResponse,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// Records endpoint names and auth headers, answers 200 with a fixed
    /// body.
    struct RecordingTransport {
        requests: Mutex<Vec<(String, Option<String>)>>,
        body: Value,
    }

    impl RecordingTransport {
        fn new(body: Value) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                body,
            })
        }

        fn seen(&self) -> Vec<(String, Option<String>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        fn name(&self) -> &'static str {
            "recording"
        }

        async fn send(
            &self,
            request: &OutboundRequest,
        ) -> std::result::Result<TransportResponse, TransportError> {
            self.requests
                .lock()
                .unwrap()
                .push((request.endpoint.clone(), request.auth_header.clone()));
            Ok(TransportResponse {
                status: 200,
                body: self.body.clone(),
            })
        }

        async fn probe(&self) -> std::result::Result<(), TransportError> {
            Ok(())
        }
    }

    fn client_with(transport: Arc<dyn Transport>) -> (Client, TempDir) {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig {
            session_dir: dir.path().to_path_buf(),
            ..ClientConfig::default()
        };
        (Client::with_transport(config, transport).unwrap(), dir)
    }

    #[tokio::test]
    async fn login_persists_the_session() {
        let (client, _dir) = client_with(Arc::new(MockTransport::new()));

        assert!(!client.session().auth_state().is_authenticated);

        let auth = client
            .login(&Credentials {
                email: "dev@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        assert_eq!(auth.token, "mock-token-for-development");
        assert!(auth.success);

        let state = client.session().auth_state();
        assert!(state.is_authenticated);
        assert_eq!(state.user.unwrap().email, "dev@example.com");
    }

    #[tokio::test]
    async fn register_persists_the_session() {
        let (client, _dir) = client_with(Arc::new(MockTransport::new()));

        client
            .register(&NewUser {
                email: "new@example.com".into(),
                password: "hunter2".into(),
                name: None,
            })
            .await
            .unwrap();

        assert!(client.session().auth_state().is_authenticated);
    }

    #[tokio::test]
    async fn logout_clears_the_session() {
        let (client, _dir) = client_with(Arc::new(MockTransport::new()));

        client
            .login(&Credentials {
                email: "dev@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();
        client.logout().unwrap();

        let state = client.session().auth_state();
        assert_eq!(state.token, None);
        assert_eq!(state.user, None);
        assert!(!state.is_authenticated);
    }

    #[tokio::test]
    async fn chat_routes_by_rag_flag() {
        let transport = RecordingTransport::new(json!({"message": "hi", "success": true}));
        let (client, _dir) = client_with(Arc::clone(&transport) as Arc<dyn Transport>);

        let messages = [ChatMessage::user("hello")];
        client.chat(&messages, false).await.unwrap();
        client.chat(&messages, true).await.unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].0, "chat-with-openai");
        assert_eq!(seen[1].0, "chat-with-rag");
    }

    #[tokio::test]
    async fn authenticated_calls_carry_the_bearer_header() {
        let transport = RecordingTransport::new(json!({"success": true, "data": []}));
        let (client, _dir) = client_with(Arc::clone(&transport) as Arc<dyn Transport>);

        client.list_documents().await.unwrap();

        client
            .session()
            .set_auth(
                "tok-xyz",
                &User {
                    id: "7".into(),
                    email: "pm@example.com".into(),
                    name: None,
                },
            )
            .unwrap();
        client.list_documents().await.unwrap();

        let seen = transport.seen();
        assert_eq!(seen[0].1, None);
        assert_eq!(seen[1].1.as_deref(), Some("Bearer tok-xyz"));
    }

    #[tokio::test]
    async fn malformed_auth_payload_is_a_json_error() {
        let transport = RecordingTransport::new(json!({"success": false}));
        let (client, _dir) = client_with(Arc::clone(&transport) as Arc<dyn Transport>);

        let err = client
            .login(&Credentials {
                email: "dev@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Json(_)));
        assert!(!client.session().auth_state().is_authenticated);
    }
}

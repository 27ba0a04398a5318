//! Common test utilities for client integration tests.

use std::sync::Arc;

use anyhow::Result;
use novelhub_client::NovelHubClient;
use novelhub_router::History;
use novelhub_session::{MemoryStorage, SessionStore, Tokens};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_PREFIX: &str = "/api/v1";

/// A mock backend plus a client wired to it.
pub struct TestBackend {
    pub server: MockServer,
    pub client: NovelHubClient,
    pub session: SessionStore,
    pub storage: Arc<MemoryStorage>,
    pub history: Arc<History>,
}

impl TestBackend {
    pub async fn start() -> Result<Self> {
        let server = MockServer::start().await;
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::with_storage(storage.clone());
        let history = Arc::new(History::new());

        let client = NovelHubClient::builder()
            .base_url(format!("{}{}", server.uri(), API_PREFIX))
            .session(session.clone())
            .navigator(history.clone())
            .build()?;

        Ok(Self {
            server,
            client,
            session,
            storage,
            history,
        })
    }

    /// Start with a session already established.
    pub async fn logged_in(roles: &[&str]) -> Result<Self> {
        let backend = Self::start().await?;
        backend.session.establish(
            Tokens::new("access-1", Some("refresh-1".to_string())),
            "alice",
            roles.iter().map(|r| r.to_string()).collect(),
        )?;
        Ok(backend)
    }

    /// Full path of an API endpoint on the mock server.
    pub fn api(endpoint: &str) -> String {
        format!("{}/{}", API_PREFIX, endpoint)
    }

    /// Mount a successful login for `alice`.
    pub async fn mock_login(&self) {
        Mock::given(method("POST"))
            .and(path(Self::api("login")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "access-1",
                "refresh_token": "refresh-1",
                "message": "Logged in as alice",
                "roles": ["admin"]
            })))
            .mount(&self.server)
            .await;
    }

    /// Authorization headers of every request received so far, in order.
    pub async fn authorization_headers(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| {
                r.headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }
}

//! Login, logout and token refresh.
//!
//! These are the only operations that change the session. Each one holds the
//! session's mutation lock for its whole round trip, so they never
//! interleave with each other.

use novelhub_router::{HOME, LOGIN};
use novelhub_session::{Session, Tokens};

use crate::client::NovelHubClient;
use crate::error::{Error, Result};
use crate::middleware::Authorization;
use crate::types::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, Record};

const NO_TOKEN_MESSAGE: &str = "Login failed, no token returned";

/// Auth API client.
pub struct AuthApi {
    client: NovelHubClient,
}

impl AuthApi {
    pub(crate) fn new(client: NovelHubClient) -> Self {
        Self { client }
    }

    /// Log in and start a session.
    ///
    /// On success the tokens, username and roles are stored and persisted,
    /// and the navigator is sent home. On failure nothing is committed.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let session = self.client.session();
        let _guard = session.lock_mutations().await;

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = match self.client.post("login", &request).await {
            Ok(response) => response,
            Err(e) => return Err(Self::login_error(username, e)),
        };

        let Some(access_token) = response.token() else {
            let message = response
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| NO_TOKEN_MESSAGE.to_string());
            tracing::info!(username, "Login returned no token: {}", message);
            return Err(Error::Auth(message));
        };

        let tokens = Tokens::new(access_token, response.refresh_token.clone());
        session.establish(tokens, username, response.role_names())?;

        tracing::info!(username, "Logged in");
        self.client.navigator().push(HOME);
        Ok(session.snapshot())
    }

    /// Any failure other than transport or session errors means the backend
    /// refused or garbled the login, which callers see as [`Error::Auth`].
    fn login_error(username: &str, err: Error) -> Error {
        let message = match err {
            Error::Api { message, .. } | Error::Unauthorized(message) => message,
            Error::NotFound(message) => message,
            Error::Json(e) => format!("Malformed login response: {}", e),
            other => return other,
        };
        tracing::info!(username, "Login rejected: {}", message);
        Error::Auth(message)
    }

    /// Revoke both tokens server-side, then end the session.
    ///
    /// Revocation failures are logged and do not stop the logout. The session
    /// is always cleared afterwards and the navigator is sent to the login
    /// route, unless a revoke call's 401 already did both.
    pub async fn logout(&self) -> Result<()> {
        let session = self.client.session();
        let _guard = session.lock_mutations().await;

        let invalidations = session.invalidations();
        let snapshot = session.snapshot();

        if let Some(access) = snapshot.access_token {
            self.revoke("logout/revoke_access_token", access).await;
        }
        if let Some(refresh) = snapshot.refresh_token {
            self.revoke("logout/revoke_refresh_token", refresh).await;
        }

        let already_ended = session.invalidations() != invalidations;
        let cleared = session.clear_auth();
        if !already_ended {
            self.client.navigator().push(LOGIN);
        }
        cleared?;

        tracing::info!("Logged out");
        Ok(())
    }

    async fn revoke(&self, path: &str, token: String) {
        let body = serde_json::json!({});
        let result: Result<Record> = self
            .client
            .post_with_auth(path, &body, &Authorization::Bearer(token))
            .await;
        if let Err(e) = result {
            tracing::warn!(path, "Token revocation failed: {}", e);
        }
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// On failure the stale access token stays in place. A refresh that
    /// completes after the session was ended or replaced is discarded.
    pub async fn refresh_access_token(&self) -> Result<()> {
        let session = self.client.session();
        let _guard = session.lock_mutations().await;

        let (refresh_token, epoch) = (session.refresh_token(), session.epoch());
        let Some(refresh_token) = refresh_token else {
            return Err(Error::NoRefreshToken);
        };

        let request = RefreshRequest { refresh_token };
        let response: RefreshResponse = self
            .client
            .post("refresh", &request)
            .await
            .inspect_err(|e| tracing::warn!("Failed to refresh token: {}", e))?;

        session.replace_access_token(&response.access_token, epoch)?;
        tracing::info!("Access token refreshed");
        Ok(())
    }
}

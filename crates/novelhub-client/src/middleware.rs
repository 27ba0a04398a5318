//! Authentication middleware on the client's send path.
//!
//! Outgoing: attach `Authorization: Bearer <access token>` unless the caller
//! supplied its own credential. Incoming: a 401 ends the session that sent
//! the request and navigates to the login route.

use std::sync::Arc;

use novelhub_router::{LOGIN, Navigator};
use novelhub_session::SessionStore;
use reqwest::RequestBuilder;

/// Credential to send with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Authorization {
    /// The session's access token, if one is present.
    #[default]
    Session,
    /// An explicit bearer token. Takes precedence over the session.
    Bearer(String),
}

/// Bearer-token middleware shared by every request of a client.
#[derive(Debug, Clone)]
pub(crate) struct BearerAuth {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl BearerAuth {
    pub(crate) fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Attach the credential. Returns the session epoch the request was sent
    /// under, to be handed back to [`BearerAuth::on_unauthorized`].
    pub(crate) fn apply(&self, request: RequestBuilder, auth: &Authorization) -> (RequestBuilder, u64) {
        let (session_token, epoch) = self.session.credential();
        let token = match auth {
            Authorization::Bearer(token) => Some(token.clone()),
            Authorization::Session => session_token,
        };

        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        (request, epoch)
    }

    /// Handle a 401 for a request sent under `epoch`.
    ///
    /// Only the first rejection of a given session clears it and navigates;
    /// later ones (concurrent requests, or requests sent before a re-login)
    /// are no-ops. Returns whether this call ended the session.
    pub(crate) fn on_unauthorized(&self, epoch: u64) -> bool {
        match self.session.invalidate(epoch) {
            Ok(false) => {
                tracing::debug!(epoch, "Unauthorized response for an already-ended session");
                false
            }
            Ok(true) => {
                tracing::warn!("Server rejected the session; signed out");
                self.navigator.push(LOGIN);
                true
            }
            Err(e) => {
                // Memory is cleared even when storage cleanup fails.
                tracing::warn!("Signed out, but stored tokens could not be removed: {}", e);
                self.navigator.push(LOGIN);
                true
            }
        }
    }
}

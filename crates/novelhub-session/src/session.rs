//! The in-memory session value.

use serde::{Deserialize, Serialize};

/// Role name that grants access to admin-only routes.
pub const ADMIN_ROLE: &str = "admin";

/// Credential material of the current user.
///
/// Empty at process start. Populated by a successful login or by loading
/// persisted tokens; cleared on logout or when the backend rejects a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Short-lived credential sent with each request.
    pub access_token: Option<String>,
    /// Longer-lived credential used to obtain a new access token.
    pub refresh_token: Option<String>,
    /// Name the user logged in with. Kept in memory only.
    pub username: Option<String>,
    /// Role names granted to the user.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Session {
    /// True iff an access token is present. No expiry check is done locally.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// True iff the session carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }

    /// True iff every field is empty.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none()
            && self.refresh_token.is_none()
            && self.username.is_none()
            && self.roles.is_empty()
    }
}

/// Token pair returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

impl Tokens {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
        }
    }
}

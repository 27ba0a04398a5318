//! The session store.
//!
//! [`SessionStore`] is cheap to clone; clones share one session. Every state
//! change bumps an epoch counter so that callers holding an older epoch (an
//! in-flight refresh, a request that just got a 401) can tell the session
//! they acted on has since been replaced or cleared.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::session::{Session, Tokens};
use crate::storage::{REFRESH_TOKEN_KEY, ROLES_KEY, SessionStorage, TOKEN_KEY};

/// Guard returned by [`SessionStore::lock_mutations`].
pub type MutationGuard<'a> = tokio::sync::MutexGuard<'a, ()>;

/// Keys written by [`SessionStore::establish`], in write order.
const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, REFRESH_TOKEN_KEY, ROLES_KEY];

/// Single source of truth for the current user's credentials.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    state: RwLock<State>,
    storage: Arc<dyn SessionStorage>,
    mutations: Mutex<()>,
}

#[derive(Debug, Default)]
struct State {
    session: Session,
    epoch: u64,
    invalidations: u64,
}

impl State {
    fn replace(&mut self, session: Session) {
        self.session = session;
        self.epoch += 1;
    }
}

impl SessionStore {
    /// Create a store over the given storage backend.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self::with_storage(Arc::new(storage))
    }

    /// Create a store over a shared storage backend.
    pub fn with_storage(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(State::default()),
                storage,
                mutations: Mutex::new(()),
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.inner.state.read().session.clone()
    }

    /// Current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.inner.state.read().session.access_token.clone()
    }

    /// Current refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.inner.state.read().session.refresh_token.clone()
    }

    /// Username of the last login in this process, if any.
    pub fn username(&self) -> Option<String> {
        self.inner.state.read().session.username.clone()
    }

    /// Current access token together with the epoch it belongs to.
    pub fn credential(&self) -> (Option<String>, u64) {
        let state = self.inner.state.read();
        (state.session.access_token.clone(), state.epoch)
    }

    /// Current session epoch.
    pub fn epoch(&self) -> u64 {
        self.inner.state.read().epoch
    }

    /// Number of sessions ended by [`SessionStore::invalidate`].
    pub fn invalidations(&self) -> u64 {
        self.inner.state.read().invalidations
    }

    /// True iff an access token is present in memory.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.read().session.is_authenticated()
    }

    /// True iff the session carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.inner.state.read().session.is_admin()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Serialize login, logout and refresh.
    ///
    /// Hold the returned guard for the whole network round trip of a
    /// session-mutating operation. The 401 path must not take it; it uses
    /// [`SessionStore::invalidate`] instead.
    pub async fn lock_mutations(&self) -> MutationGuard<'_> {
        self.inner.mutations.lock().await
    }

    /// Restore tokens from storage into memory.
    ///
    /// Only applies when both the access and the refresh token are stored.
    /// Calling it again with unchanged storage changes nothing. If the
    /// session changes while storage is being read, the stored values are
    /// discarded.
    pub fn load_stored_token(&self) -> Result<()> {
        let epoch = self.epoch();
        let storage = &self.inner.storage;
        let (Some(token), Some(refresh)) =
            (storage.get(TOKEN_KEY)?, storage.get(REFRESH_TOKEN_KEY)?)
        else {
            return Ok(());
        };
        if token.is_empty() || refresh.is_empty() {
            return Ok(());
        }

        let roles = match storage.get(ROLES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable stored roles: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let mut state = self.inner.state.write();
        if state.epoch != epoch {
            tracing::debug!("Session changed while reading storage, not restoring");
            return Ok(());
        }
        let current = &state.session;
        if current.access_token.as_deref() == Some(token.as_str())
            && current.refresh_token.as_deref() == Some(refresh.as_str())
            && current.roles == roles
        {
            return Ok(());
        }

        let username = state.session.username.clone();
        state.replace(Session {
            access_token: Some(token),
            refresh_token: Some(refresh),
            username,
            roles,
        });
        tracing::debug!(epoch = state.epoch, "Restored stored session tokens");
        Ok(())
    }

    /// Commit a successful login.
    ///
    /// Tokens and roles are persisted first; if any write fails the keys
    /// already written are restored to their previous values and memory is
    /// left untouched.
    pub fn establish(&self, tokens: Tokens, username: &str, roles: Vec<String>) -> Result<()> {
        let storage = &self.inner.storage;
        let mut state = self.inner.state.write();

        let previous = SESSION_KEYS
            .iter()
            .map(|key| storage.get(key))
            .collect::<Result<Vec<_>>>()?;

        let roles_json = serde_json::to_string(&roles)?;
        let written = self.persist(&tokens, &roles_json);
        if let Err(e) = written {
            for (key, value) in SESSION_KEYS.iter().zip(&previous) {
                let restored = match value {
                    Some(v) => storage.set(key, v),
                    None => storage.remove(key),
                };
                if let Err(restore_err) = restored {
                    tracing::warn!(key, "Failed to roll back session key: {}", restore_err);
                }
            }
            return Err(e);
        }

        state.replace(Session {
            access_token: Some(tokens.access_token),
            refresh_token: tokens.refresh_token,
            username: Some(username.to_string()),
            roles,
        });
        tracing::debug!(epoch = state.epoch, "Session established");
        Ok(())
    }

    fn persist(&self, tokens: &Tokens, roles_json: &str) -> Result<()> {
        let storage = &self.inner.storage;
        storage.set(TOKEN_KEY, &tokens.access_token)?;
        match &tokens.refresh_token {
            Some(refresh) => storage.set(REFRESH_TOKEN_KEY, refresh)?,
            None => storage.remove(REFRESH_TOKEN_KEY)?,
        }
        storage.set(ROLES_KEY, roles_json)
    }

    /// Commit a refreshed access token.
    ///
    /// `expected_epoch` is the epoch read before the refresh request was
    /// sent. If the session was cleared or replaced since, nothing is written
    /// and [`Error::Superseded`] is returned.
    pub fn replace_access_token(&self, access_token: &str, expected_epoch: u64) -> Result<()> {
        let mut state = self.inner.state.write();
        if state.epoch != expected_epoch || !state.session.is_authenticated() {
            return Err(Error::Superseded("token refresh".to_string()));
        }

        self.inner.storage.set(TOKEN_KEY, access_token)?;

        let mut session = state.session.clone();
        session.access_token = Some(access_token.to_string());
        state.replace(session);
        tracing::debug!(epoch = state.epoch, "Access token replaced");
        Ok(())
    }

    /// Empty the session in memory and in storage.
    ///
    /// Memory is always cleared, even if removing the stored keys fails.
    /// Returns whether there was anything to clear in memory.
    pub fn clear_auth(&self) -> Result<bool> {
        let mut state = self.inner.state.write();
        self.clear_locked(&mut state)
    }

    /// Clear the session if it is still the one identified by `epoch`.
    ///
    /// Used when the backend rejects a request as unauthenticated. Returns
    /// `true` only for the call that actually ended the session, so any
    /// number of concurrent rejections of the same session yield one clear.
    pub fn invalidate(&self, epoch: u64) -> Result<bool> {
        let mut state = self.inner.state.write();
        if state.epoch != epoch || !state.session.is_authenticated() {
            return Ok(false);
        }
        state.invalidations += 1;
        self.clear_locked(&mut state)?;
        Ok(true)
    }

    fn clear_locked(&self, state: &mut State) -> Result<bool> {
        let had_session = !state.session.is_empty();
        state.replace(Session::default());

        let storage = &self.inner.storage;
        let mut first_err = None;
        for key in SESSION_KEYS {
            if let Err(e) = storage.remove(key) {
                tracing::warn!(key, "Failed to remove stored session key: {}", e);
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(had_session),
        }
    }
}

//! Session state for the NovelHub client.
//!
//! This crate owns the credential material of a running client:
//! - [`Session`]: the access/refresh token pair, username and roles
//! - [`SessionStorage`]: durable key/value storage the tokens are persisted to
//! - [`SessionStore`]: the single source of truth for whether the client is
//!   authenticated, shared by the HTTP client and the router
//!
//! Network-facing operations (login, logout, token refresh) live in
//! `novelhub-client`; they drive the store through [`SessionStore::establish`],
//! [`SessionStore::replace_access_token`] and [`SessionStore::clear_auth`].
//!
//! # Example
//!
//! ```rust
//! use novelhub_session::{MemoryStorage, SessionStore};
//!
//! let store = SessionStore::new(MemoryStorage::new());
//! store.load_stored_token().unwrap();
//! assert!(!store.is_authenticated());
//! ```

mod error;
mod session;
mod storage;
mod store;

pub use error::{Error, Result};
pub use session::{ADMIN_ROLE, Session, Tokens};
pub use storage::{
    FileStorage, MemoryStorage, REFRESH_TOKEN_KEY, ROLES_KEY, SESSION_FILE, SessionStorage,
    TOKEN_KEY,
};
pub use store::{MutationGuard, SessionStore};

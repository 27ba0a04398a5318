//! HTTP client SDK for the NovelHub content platform.
//!
//! This crate provides an authenticated client for the NovelHub REST API.
//! The client shares a [`SessionStore`] with the router: requests carry the
//! session's bearer token, and a 401 from the server ends the session and
//! sends the navigator to the login route.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use novelhub_client::{NovelHubClient, PageQuery, Result};
//! use novelhub_router::History;
//! use novelhub_session::{MemoryStorage, SessionStore};
//!
//! # async fn example() -> Result<()> {
//! let session = SessionStore::new(MemoryStorage::new());
//! let history = Arc::new(History::new());
//!
//! let client = NovelHubClient::builder()
//!     .base_url("http://127.0.0.1:17788/api/v1/")
//!     .session(session.clone())
//!     .navigator(history.clone())
//!     .build()?;
//!
//! client.auth().login("alice", "secret").await?;
//! assert!(session.is_authenticated());
//!
//! let novels = client.novels().list_fields(&["id", "name"]).await?;
//! println!("{}", novels);
//!
//! let langs = client.supports().list_page(&PageQuery::default().page(1)).await?;
//! println!("{}", langs);
//!
//! client.auth().logout().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Auth**: login, logout (token revocation), access token refresh
//! - **Novels**: novels, chapters, styles
//! - **Translation**: machine translations, user corrections, conversion history
//! - **Media**: generated audio, images and videos, audio styles
//! - **Users**: users, roles, permissions, comments, collections, likes
//! - **Generation settings**: prompt templates, image generation parameters
//! - **Reference data**: supported languages, translation engines, choice lists

pub mod api;
pub mod client;
pub mod error;
pub mod middleware;
pub mod types;

pub use client::{ClientBuilder, NovelHubClient};
pub use error::{Error, Result};
pub use middleware::Authorization;
pub use types::*;

pub use novelhub_session::SessionStore;

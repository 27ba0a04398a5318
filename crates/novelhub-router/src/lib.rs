//! Routing for the NovelHub client.
//!
//! - [`route`]: static route descriptors and path resolution
//! - [`table`]: the application's route table
//! - [`guard`]: the per-navigation authentication/authorization check
//! - [`navigator`]: the sink navigation requests are pushed to
//!
//! The guard reads the session through a [`novelhub_session::SessionStore`]
//! handed to [`Router::navigate`]; nothing here mutates the session except
//! reloading persisted tokens at the start of a navigation.

pub mod error;
pub mod guard;
pub mod navigator;
pub mod route;
pub mod table;

pub use error::{Error, Result};
pub use guard::{GuardOutcome, Navigation, Router};
pub use navigator::{History, Navigator};
pub use route::{ResolvedRoute, RouteDescriptor, RouteMeta};
pub use table::{HOME, INDEX, LOGIN, default_routes};

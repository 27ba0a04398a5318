//! Router error types.

/// Result type alias for routing.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while navigating.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No route matches the requested path or name.
    #[error("no route matches '{0}'")]
    NotFound(String),

    /// Redirects did not settle on a route.
    #[error("too many redirects navigating to '{0}'")]
    RedirectLoop(String),
}

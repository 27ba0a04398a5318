//! API endpoint implementations.

mod auth;
mod choices;
mod novels;
mod resource;

pub use auth::AuthApi;
pub use choices::ChoicesApi;
pub use novels::NovelsApi;
pub use resource::ResourceApi;

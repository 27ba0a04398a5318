//! Configuration for the NovelHub client.
//!
//! Provides TOML-based configuration with:
//! - Per-environment API base URLs (`[api]`)
//! - Request timeout and session file location
//! - Config file layering (user config dir + project-local overrides)
//! - `NOVELHUB_*` environment variable overrides

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    LoadedConfig, config_dir, load_config, load_config_file, load_config_with_options,
};
pub use error::{ConfigError, Result};
pub use types::*;

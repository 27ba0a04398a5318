//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Environment name is neither development nor production.
    #[error("unknown environment '{0}' (expected 'development' or 'production')")]
    UnknownEnvironment(String),

    /// No config directory could be determined for this platform.
    #[error("could not determine a config directory; set NOVELHUB_CONFIG_DIR")]
    NoConfigDir,
}

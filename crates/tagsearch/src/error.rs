//! Error types
//!
//! Matching itself never fails: malformed input is sanitized and blank input
//! simply matches nothing. Only configuration can be rejected.

use thiserror::Error;

/// Errors raised while building an engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Environment variable present but not parseable
    #[error("invalid value for {var}: '{value}'")]
    InvalidEnvValue { var: &'static str, value: String },

    /// A length limit that must be positive was zero
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

//! Error types for storage access, configuration, and theme parsing.
//!
//! Storage failures never abort initialization: the theme controller turns
//! them into a session-only preference and logs them.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failure reading or writing the persisted theme preference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("local storage read failed: {0}")]
    Read(String),
    #[error("local storage write failed: {0}")]
    Write(String),
}

/// Invalid configuration passed to the initializer.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config field `{0}` must not be empty")]
    Empty(&'static str),
    #[error("scroll duration must be a positive number of milliseconds, got {0}")]
    InvalidDuration(f64),
}

/// A string that names neither theme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme `{0}` (expected `dark` or `light`)")]
pub struct ParseThemeError(pub String);

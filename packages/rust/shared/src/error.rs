//! Error types for vaultsite.
//!
//! Library crates use [`VaultSiteError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all vaultsite operations.
#[derive(Debug, thiserror::Error)]
pub enum VaultSiteError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while talking to the paper search API.
    #[error("network error: {0}")]
    Network(String),

    /// Response body or document could not be decoded.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad config value, malformed output, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, VaultSiteError>;

impl VaultSiteError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = VaultSiteError::config("per_page must be positive");
        assert_eq!(err.to_string(), "config error: per_page must be positive");

        let err = VaultSiteError::Network("api.openalex.org: HTTP 503".into());
        assert!(err.to_string().starts_with("network error:"));
    }

    #[test]
    fn io_error_carries_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = VaultSiteError::io("docs/index.md", source);
        let msg = err.to_string();
        assert!(msg.contains("docs/index.md"));
        assert!(msg.contains("gone"));
    }
}

//! Error types for shipcheck operations.
//!
//! This module defines [`ShipcheckError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ShipcheckError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `ShipcheckError::Other`) for unexpected errors
//! - Errors raised inside a check never escape the scan: the runner converts
//!   them into a failing result (see [`crate::checks::run_checks`])

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for shipcheck operations.
#[derive(Debug, Error)]
pub enum ShipcheckError {
    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Project directory does not exist or is not a directory.
    #[error("Project directory not found: {path}")]
    ProjectNotFound { path: PathBuf },

    /// A configured URL could not be parsed.
    #[error("Invalid URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// TLS connection or certificate inspection failed.
    #[error("TLS handshake with {host} failed: {message}")]
    Tls { host: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for shipcheck operations.
pub type Result<T> = std::result::Result<T, ShipcheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ShipcheckError::ConfigNotFound {
            path: PathBuf::from("/foo/shipcheck.yml"),
        };
        assert!(err.to_string().contains("/foo/shipcheck.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ShipcheckError::ConfigParseError {
            path: PathBuf::from("/shipcheck.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/shipcheck.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn invalid_url_displays_url_and_message() {
        let err = ShipcheckError::InvalidUrl {
            url: "not a url".into(),
            message: "relative URL without a base".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("not a url"));
        assert!(msg.contains("relative URL"));
    }

    #[test]
    fn tls_error_displays_host() {
        let err = ShipcheckError::Tls {
            host: "example.com".into(),
            message: "certificate expired".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("example.com"));
        assert!(msg.contains("certificate expired"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ShipcheckError = io_err.into();
        assert!(matches!(err, ShipcheckError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts() {
        let err: ShipcheckError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, ShipcheckError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}

//! # Error Taxonomy
//!
//! Unified error handling for all Joplin MCP operations. Every fault that can
//! surface to a tool caller is one of these variants; the server adapter is
//! the single place that converts them into the wire-level
//! [`crate::models::ErrorResponse`] shape.

use thiserror::Error;

/// Result type for all gateway and tool-layer operations.
pub type Result<T> = std::result::Result<T, JoplinError>;

/// Error taxonomy for Joplin MCP operations.
///
/// Backend-facing variants carry a short user-facing message plus an optional
/// raw detail string preserved for diagnostics.
#[derive(Debug, Error)]
pub enum JoplinError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}")]
    Connection {
        message: String,
        detail: Option<String>,
    },

    #[error("{message}")]
    Auth {
        message: String,
        detail: Option<String>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        detail: Option<String>,
    },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{message}")]
    Api {
        message: String,
        detail: Option<String>,
    },
}

impl JoplinError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error with raw detail.
    pub fn connection(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    /// Create an authentication error with raw detail.
    pub fn auth(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    /// Create a not-found error with raw detail.
    pub fn not_found(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    /// Create a validation error for caller-supplied input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a generic API error with raw detail.
    pub fn api(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            detail: Some(detail.into()),
        }
    }

    /// Wire-level category tag for this error kind.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Connection { .. } => "connection_error",
            Self::Auth { .. } => "auth_error",
            Self::NotFound { .. } => "not_found",
            Self::Validation(_) => "validation_error",
            Self::Api { .. } => "joplin_error",
        }
    }

    /// Raw detail string preserved from the underlying failure, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Connection { detail, .. }
            | Self::Auth { detail, .. }
            | Self::NotFound { detail, .. }
            | Self::Api { detail, .. } => detail.as_deref(),
            Self::Config(_) | Self::Validation(_) => None,
        }
    }
}

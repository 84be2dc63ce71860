// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Orrery catalogue client.

use thiserror::Error;

/// The primary error type used across the catalogue client, the activity
/// reconciler, and the command-line front end.
#[derive(Debug, Error)]
pub enum OrreryError {
    /// Configuration errors (invalid base URL, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failures (connection refused, TLS, timeouts).
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The catalogue API answered with a non-2xx status.
    #[error("HTTP {status} @ {url}\n{body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("decode error: {message}")]
    Decode {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An admin-protected operation was attempted without an API key.
    #[error("admin API key required for {operation}")]
    MissingCredential { operation: &'static str },

    /// Caller supplied an argument the API would reject anyway.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OrreryError {
    /// HTTP status code for [`OrreryError::Api`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body for [`OrreryError::Api`] errors.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// True for 401/403 answers from the API.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

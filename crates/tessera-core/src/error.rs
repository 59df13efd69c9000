//! Error types for Tessera operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Tessera crates. Uses `thiserror` for derive macros.

use thiserror::Error;

/// Errors that can occur in Tessera operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or transport failure while requesting a URL.
    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Underlying failure.
        message: String,
    },

    /// Non-success HTTP status.
    #[error("Unexpected status {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Parsing error (markup, CSV, JSON).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Operation not allowed in the current lifecycle state.
    #[error("Invalid state: {0}")]
    State(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a fetch error for a URL.
    pub fn fetch(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Create a status error for a URL.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a lifecycle state error.
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Whether the request never produced a usable HTTP answer.
    ///
    /// Network failures and undecodable bodies are transport failures; a
    /// server that answered with a status code is not.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Parse(_) | Self::Io(_))
    }
}

/// Result type alias using Tessera's Error type.
pub type Result<T> = std::result::Result<T, Error>;

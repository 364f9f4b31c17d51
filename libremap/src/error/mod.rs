//! Error types for Remap
//!
//! This module provides error handling for all Remap operations. All errors
//! implement the standard Error trait and carry context-rich messages.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for Remap operations
#[derive(Error, Debug)]
pub enum RemapError {
    /// Configuration errors (unreadable or malformed override configuration)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Image reference errors (a reference string does not match the grammar)
    #[error("Invalid image reference: {message}")]
    InvalidReference { message: String },
}

/// Result type alias for Remap operations
pub type Result<T> = std::result::Result<T, RemapError>;

impl RemapError {
    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libremap::RemapError;
    ///
    /// let err = RemapError::config("override configuration is malformed");
    /// assert!(matches!(err, RemapError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libremap::RemapError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::InvalidData, "invalid data");
    /// let err = RemapError::config_with_source("failed to read overrides", io_err);
    /// assert!(matches!(err, RemapError::Config { .. }));
    /// ```
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new invalid-reference error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libremap::RemapError;
    ///
    /// let err = RemapError::invalid_reference("image reference is empty");
    /// assert!(matches!(err, RemapError::InvalidReference { .. }));
    /// ```
    pub fn invalid_reference<S: Into<String>>(message: S) -> Self {
        Self::InvalidReference {
            message: message.into(),
        }
    }
}

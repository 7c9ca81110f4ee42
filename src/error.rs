//! Error types and handling for the EMT portal

use thiserror::Error;

use crate::distance::DistanceError;

/// Main error type for the EMT portal
#[derive(Error, Debug)]
pub enum EmtPortalError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Hospital or protocol content could not be loaded
    #[error("Directory error: {message}")]
    Directory { message: String },

    /// Distance resolution failures that reach the caller
    #[error(transparent)]
    Distance(#[from] DistanceError),
}

impl EmtPortalError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new directory error
    pub fn directory<S: Into<String>>(message: S) -> Self {
        Self::Directory {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            EmtPortalError::Config { .. } => {
                "Configuration error. Please check your config file and routing settings."
                    .to_string()
            }
            EmtPortalError::Validation { message } => format!("Invalid input: {message}"),
            EmtPortalError::Directory { .. } => {
                "Hospital directory could not be loaded. Please check the configured content files."
                    .to_string()
            }
            EmtPortalError::Distance(err) => err.to_string(),
        }
    }
}

//! Error types for the `AirCast` forecasting library

use thiserror::Error;

/// Main error type for the `AirCast` library
///
/// The numeric core is total and never fails; these errors only come from
/// the configuration layer and the opt-in input validation boundary.
#[derive(Error, Debug)]
pub enum AirCastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },
}

impl AirCastError {
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

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AirCastError::Config { .. } => {
                "Configuration error. Please check your config file and calibration factors."
                    .to_string()
            }
            AirCastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
        }
    }
}

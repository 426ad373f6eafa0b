//! Call-center domain errors

use thiserror::Error;

/// Errors that can occur in the call-center domain
#[derive(Debug, Error)]
pub enum CallCenterError {
    /// Invalid queue or agent data provided
    #[error("Invalid call-center data: {0}")]
    InvalidData(String),
}

impl CallCenterError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        CallCenterError::InvalidData(message.into())
    }
}

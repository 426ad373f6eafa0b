//! Func-key domain errors

use thiserror::Error;

/// Errors that can occur in the func-key domain
#[derive(Debug, Error)]
pub enum FuncKeyError {
    /// Key position already mapped in the template
    #[error("Position {0} is already mapped in the template")]
    PositionTaken(u16),

    /// Positions are 1-based
    #[error("Position 0 is invalid; key positions start at 1")]
    PositionZero,

    /// The stored column pair does not decode to a destination
    #[error("Unknown destination: type='{0}' typeval='{1}'")]
    UnknownDestination(String, String),

    /// Invalid func-key data provided
    #[error("Invalid func-key data: {0}")]
    InvalidData(String),
}

impl FuncKeyError {
    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        FuncKeyError::InvalidData(message.into())
    }
}

//! Dial-plan domain errors

use thiserror::Error;

/// Errors that can occur in the dial-plan domain
#[derive(Debug, Error)]
pub enum DialplanError {
    /// Range is malformed (inverted, or a DID length too wide to store)
    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

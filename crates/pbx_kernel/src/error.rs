//! Core error types used across the system

use thiserror::Error;

/// Core error type for the kernel
///
/// This mirrors the error taxonomy of the data-access layer: lookups that
/// miss return `NotFound`, malformed requests return `Input`, and the two
/// parameter variants carry the offending field names so callers can report
/// every problem at once.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Invalid parameters: {}", .0.join(", "))]
    InvalidParameters(Vec<String>),

    #[error("Missing parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    #[error("Resource already exists: {0}")]
    ResourceExists(String),
}

impl KernelError {
    pub fn not_found(message: impl Into<String>) -> Self {
        KernelError::NotFound(message.into())
    }

    pub fn input(message: impl Into<String>) -> Self {
        KernelError::Input(message.into())
    }

    pub fn invalid_parameters(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        KernelError::InvalidParameters(fields.into_iter().map(Into::into).collect())
    }

    pub fn missing_parameters(fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        KernelError::MissingParameters(fields.into_iter().map(Into::into).collect())
    }

    pub fn resource_exists(message: impl Into<String>) -> Self {
        KernelError::ResourceExists(message.into())
    }

    /// Checks if this error indicates a missing resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, KernelError::NotFound(_))
    }

    /// Checks if this error came from caller-supplied data
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            KernelError::Input(_)
                | KernelError::InvalidParameters(_)
                | KernelError::MissingParameters(_)
        )
    }
}

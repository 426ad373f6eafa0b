//! Endpoint domain errors

use thiserror::Error;

/// Errors that can occur in the endpoint domain
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The user/line pair is already associated
    #[error("User {0} is already associated to line {1}")]
    AlreadyAssociated(String, String),

    /// The user/line pair is not associated
    #[error("User {0} is not associated to line {1}")]
    NotAssociated(String, String),

    /// Main user cannot leave while secondary users remain on the line
    #[error("Line {0} still has secondary users; dissociate them first")]
    MainUserHasSecondaries(String),

    /// Voicemail still referenced by users
    #[error("Voicemail {0} is still attached to {1} users")]
    VoicemailInUse(String, usize),
}

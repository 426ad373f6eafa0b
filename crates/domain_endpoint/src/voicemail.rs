//! Voicemail entity
//!
//! A voicemail box is addressed by `number@context`; the pair is unique.
//! Deleting a box still referenced by a user is refused at the service
//! level and by the foreign key underneath.

use serde::{Deserialize, Serialize};

use pbx_kernel::VoicemailId;

use crate::error::EndpointError;
use crate::user::User;

/// A voicemail box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voicemail {
    pub id: VoicemailId,
    /// Display name announced in the directory
    pub name: String,
    /// Mailbox number dialed to reach the box
    pub number: String,
    pub context: String,
    /// Access PIN; digits only when set
    pub password: Option<String>,
    /// Address notified on new messages
    pub email: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub max_messages: Option<u32>,
    /// Attach the recording to the notification mail
    pub attach_audio: bool,
    /// Drop the message from the box once mailed out
    pub delete_after_notify: bool,
    /// Prompt for the PIN even from the owner's own line
    pub ask_password: bool,
    pub enabled: bool,
}

impl Voicemail {
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            id: VoicemailId::new(),
            name: name.into(),
            number: number.into(),
            context: context.into(),
            password: None,
            email: None,
            language: None,
            timezone: None,
            max_messages: None,
            attach_audio: false,
            delete_after_notify: false,
            ask_password: true,
            enabled: true,
        }
    }

    /// The `number@context` address of the box
    pub fn address(&self) -> String {
        format!("{}@{}", self.number, self.context)
    }
}

/// Checks that no user still points at the box before it is deleted
///
/// The repository enforces the same rule through the foreign key; this is
/// the in-memory counterpart for callers holding the users already.
pub fn ensure_voicemail_deletable(id: VoicemailId, users: &[User]) -> Result<(), EndpointError> {
    let owners = users.iter().filter(|u| u.voicemail_id == Some(id)).count();
    if owners > 0 {
        return Err(EndpointError::VoicemailInUse(id.to_string(), owners));
    }
    Ok(())
}

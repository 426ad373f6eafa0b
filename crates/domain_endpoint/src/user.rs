//! User entity
//!
//! A user is a person configured on the PBX. Telephony behavior lives
//! here (caller id, ring time, simultaneous calls, DND); how the user is
//! reached lives in the line and association modules.

use serde::{Deserialize, Serialize};
use validator::Validate;

use pbx_kernel::{CtiProfileId, UserId, VoicemailId};

/// A PBX user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: UserId,
    #[validate(length(min = 1))]
    pub first_name: String,
    pub last_name: String,
    /// Explicit caller id; when `None` it derives from the name
    pub caller_id: Option<String>,
    /// Caller id presented on outbound trunk calls
    pub outgoing_caller_id: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub mobile_phone: Option<String>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    pub music_on_hold: Option<String>,
    /// How long the user's lines ring before no-answer handling
    pub ring_seconds: u16,
    /// Concurrent calls accepted before busy treatment
    pub simultaneous_calls: u8,
    pub dnd_enabled: bool,
    pub call_record_enabled: bool,
    pub cti_enabled: bool,
    pub cti_profile_id: Option<CtiProfileId>,
    pub voicemail_id: Option<VoicemailId>,
    pub description: Option<String>,
}

impl User {
    /// Creates a user with default telephony settings
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            caller_id: None,
            outgoing_caller_id: None,
            email: None,
            mobile_phone: None,
            language: None,
            timezone: None,
            music_on_hold: None,
            ring_seconds: 30,
            simultaneous_calls: 5,
            dnd_enabled: false,
            call_record_enabled: false,
            cti_enabled: false,
            cti_profile_id: None,
            voicemail_id: None,
            description: None,
        }
    }

    /// Full name as shown in directories
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Effective caller id, derived from the name when not set explicitly
    ///
    /// The derived form is the quoted display-name convention:
    /// `"Alice Wonder"`.
    pub fn effective_caller_id(&self) -> String {
        match &self.caller_id {
            Some(cid) => cid.clone(),
            None => format!("\"{}\"", self.full_name()),
        }
    }

    /// Whether voicemail is configured for this user
    pub fn has_voicemail(&self) -> bool {
        self.voicemail_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let user = User::new("Alice", "Wonder");
        assert_eq!(user.full_name(), "Alice Wonder");
    }

    #[test]
    fn test_full_name_without_last_name() {
        let user = User::new("Alice", "");
        assert_eq!(user.full_name(), "Alice");
    }

    #[test]
    fn test_caller_id_derived_from_name() {
        let user = User::new("Alice", "Wonder");
        assert_eq!(user.effective_caller_id(), "\"Alice Wonder\"");
    }

    #[test]
    fn test_explicit_caller_id_wins() {
        let mut user = User::new("Alice", "Wonder");
        user.caller_id = Some("\"Support\" <1000>".to_string());
        assert_eq!(user.effective_caller_id(), "\"Support\" <1000>");
    }
}

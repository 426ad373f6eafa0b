//! Strongly-typed identifiers for PBX resources
//!
//! Each resource gets its own UUID newtype so a `LineId` can never stand in
//! for a `UserId` at a call site. The legacy schema keeps integer primary
//! keys on most tables; these identifiers are the public handles used
//! across crate boundaries. Displayed with a short resource prefix
//! (`USR-`, `QUE-`, ...) that parsing strips again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random identifier for a newly provisioned resource
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// A time-ordered identifier (v7), sortable by creation
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Wraps a UUID read back from storage
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The raw UUID, as bound into queries
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// The resource prefix shown in the display form
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                // Accepts both the display form and a bare UUID
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Ok(Self(Uuid::parse_str(uuid_str)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

// Endpoint domain identifiers
define_id!(UserId, "USR");
define_id!(LineId, "LIN");
define_id!(VoicemailId, "VM");
define_id!(CtiProfileId, "CTI");
define_id!(CallFilterId, "FLT");

// Dial-plan domain identifiers
define_id!(ContextId, "CTX");
define_id!(ExtensionId, "EXT");

// Call-center domain identifiers
define_id!(QueueId, "QUE");
define_id!(AgentId, "AGT");

// Func-key domain identifiers
define_id!(FuncKeyTemplateId, "FKT");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        let id = UserId::new();
        let display = id.to_string();
        assert!(display.starts_with("USR-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = QueueId::new();
        let parsed: QueueId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_uuid_conversion() {
        let uuid = Uuid::new_v4();
        let line_id = LineId::from(uuid);
        let back: Uuid = line_id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_parsing_without_prefix() {
        let uuid = Uuid::new_v4();
        let parsed: ExtensionId = uuid.to_string().parse().unwrap();
        assert_eq!(parsed.as_uuid(), &uuid);
    }
}

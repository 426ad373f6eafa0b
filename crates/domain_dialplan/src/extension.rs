//! Extension entity
//!
//! An extension binds a dialable number inside a context to a destination:
//! a user's line, a queue, a conference room, or a custom dial-plan entry.

use serde::{Deserialize, Serialize};

use pbx_kernel::{ExtenNumber, ExtensionId, QueueId, UserId};

use crate::range::RangeKind;

/// What an extension points at when dialed
///
/// Persisted as the schema's `(type, typeval)` column pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ExtensionDestination {
    User(UserId),
    Queue(QueueId),
    /// Conference room, addressed by room number
    Conference(u32),
    /// Raw dial-plan entry with no backing resource row
    Custom(String),
}

impl ExtensionDestination {
    /// The range kind this destination must be validated against
    ///
    /// Custom entries are not range-constrained.
    pub fn range_kind(&self) -> Option<RangeKind> {
        match self {
            ExtensionDestination::User(_) => Some(RangeKind::User),
            ExtensionDestination::Queue(_) => Some(RangeKind::Queue),
            ExtensionDestination::Conference(_) => Some(RangeKind::Conference),
            ExtensionDestination::Custom(_) => None,
        }
    }

    /// Legacy `type` column value
    pub fn type_str(&self) -> &'static str {
        match self {
            ExtensionDestination::User(_) => "user",
            ExtensionDestination::Queue(_) => "queue",
            ExtensionDestination::Conference(_) => "conference",
            ExtensionDestination::Custom(_) => "custom",
        }
    }

    /// Legacy `typeval` column value
    pub fn type_val(&self) -> String {
        match self {
            ExtensionDestination::User(id) => id.as_uuid().to_string(),
            ExtensionDestination::Queue(id) => id.as_uuid().to_string(),
            ExtensionDestination::Conference(room) => room.to_string(),
            ExtensionDestination::Custom(val) => val.clone(),
        }
    }

    /// Rebuilds a destination from the legacy column pair
    pub fn from_columns(dest_type: &str, type_val: &str) -> Option<Self> {
        match dest_type {
            "user" => type_val.parse().ok().map(ExtensionDestination::User),
            "queue" => type_val.parse().ok().map(ExtensionDestination::Queue),
            "conference" => type_val.parse().ok().map(ExtensionDestination::Conference),
            "custom" => Some(ExtensionDestination::Custom(type_val.to_string())),
            _ => None,
        }
    }
}

/// An extension registered in a context
///
/// The `(exten, context)` pair is unique across the dial plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extension {
    pub id: ExtensionId,
    pub exten: ExtenNumber,
    pub context: String,
    pub destination: ExtensionDestination,
    pub enabled: bool,
}

impl Extension {
    pub fn new(
        exten: ExtenNumber,
        context: impl Into<String>,
        destination: ExtensionDestination,
    ) -> Self {
        Self {
            id: ExtensionId::new(),
            exten,
            context: context.into(),
            destination,
            enabled: true,
        }
    }

    /// The `exten@context` form used in logs and error messages
    pub fn address(&self) -> String {
        format!("{}@{}", self.exten, self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_column_round_trip() {
        let destinations = vec![
            ExtensionDestination::User(UserId::new()),
            ExtensionDestination::Queue(QueueId::new()),
            ExtensionDestination::Conference(4000),
            ExtensionDestination::Custom("s".to_string()),
        ];

        for dest in destinations {
            let rebuilt =
                ExtensionDestination::from_columns(dest.type_str(), &dest.type_val()).unwrap();
            assert_eq!(rebuilt, dest);
        }
    }

    #[test]
    fn test_unknown_type_column() {
        assert!(ExtensionDestination::from_columns("meetme", "1").is_none());
        assert!(ExtensionDestination::from_columns("user", "not-a-uuid").is_none());
    }

    #[test]
    fn test_range_kind_mapping() {
        assert_eq!(
            ExtensionDestination::Queue(QueueId::new()).range_kind(),
            Some(RangeKind::Queue)
        );
        assert_eq!(ExtensionDestination::Custom("s".into()).range_kind(), None);
    }

    #[test]
    fn test_address() {
        let extension = Extension::new(
            ExtenNumber::parse("1000").unwrap(),
            "default",
            ExtensionDestination::Custom("s".into()),
        );
        assert_eq!(extension.address(), "1000@default");
    }
}

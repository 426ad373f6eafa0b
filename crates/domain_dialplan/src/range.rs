//! Context numbering ranges
//!
//! Each context declares the intervals its extension numbers may come from,
//! per resource kind. A range with no end is a single-value range matching
//! exactly its start. Ranges may overlap; containment is satisfied by any
//! one of them.

use serde::{Deserialize, Serialize};

use pbx_kernel::ExtenNumber;

use crate::error::DialplanError;

/// The resource kind a numbering range constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKind {
    User,
    Group,
    Queue,
    Conference,
    Incall,
}

impl RangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKind::User => "user",
            RangeKind::Group => "group",
            RangeKind::Queue => "queue",
            RangeKind::Conference => "conference",
            RangeKind::Incall => "incall",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(RangeKind::User),
            "group" => Some(RangeKind::Group),
            "queue" => Some(RangeKind::Queue),
            "conference" => Some(RangeKind::Conference),
            "incall" => Some(RangeKind::Incall),
            _ => None,
        }
    }
}

/// An inclusive numbering interval inside a context
///
/// `end = None` denotes a single-value range containing exactly `start`.
/// `did_length` applies to incall ranges where only the last N digits of
/// the dialed DID are significant; zero means the full number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRange {
    pub start: u32,
    pub end: Option<u32>,
    pub did_length: u16,
}

impl ContextRange {
    /// Creates a range; pass `end = None` for a single-value range
    pub fn new(start: u32, end: Option<u32>) -> Self {
        Self {
            start,
            end,
            did_length: 0,
        }
    }

    /// Creates a single-value range containing exactly `value`
    pub fn single(value: u32) -> Self {
        Self::new(value, None)
    }

    /// Largest accepted DID length; the column storing it is a smallint
    pub const MAX_DID_LENGTH: u16 = i16::MAX as u16;

    /// Checks the range is not inverted and its DID length is storable
    pub fn validate(&self) -> Result<(), DialplanError> {
        if let Some(end) = self.end {
            if end < self.start {
                return Err(DialplanError::InvalidRange(format!(
                    "{}-{} is inverted",
                    self.start, end
                )));
            }
        }
        if self.did_length > Self::MAX_DID_LENGTH {
            return Err(DialplanError::InvalidRange(format!(
                "DID length {} exceeds {}",
                self.did_length,
                Self::MAX_DID_LENGTH
            )));
        }
        Ok(())
    }

    /// Inclusive interval containment; single-value ranges match exactly
    pub fn contains(&self, n: u32) -> bool {
        match self.end {
            Some(end) => self.start <= n && n <= end,
            None => self.start == n,
        }
    }

    /// Number of values covered by the range
    pub fn len(&self) -> u64 {
        match self.end {
            Some(end) if end >= self.start => u64::from(end - self.start) + 1,
            Some(_) => 0,
            None => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns true if the extension falls inside any of the given ranges
///
/// Pattern extensions carry no numeric value and are never inside a range.
/// This is the membership check behind dial-plan validation: an O(n) scan,
/// with overlapping ranges permitted.
///
/// # Arguments
///
/// * `exten` - The candidate extension
/// * `ranges` - The context's ranges for the relevant resource kind
pub fn is_extension_inside_range(exten: &ExtenNumber, ranges: &[ContextRange]) -> bool {
    match exten.value() {
        Some(n) => ranges.iter().any(|r| r.contains(n)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exten(s: &str) -> ExtenNumber {
        ExtenNumber::parse(s).unwrap()
    }

    #[test]
    fn test_contains_inclusive_bounds() {
        let range = ContextRange::new(1000, Some(1999));
        assert!(range.contains(1000));
        assert!(range.contains(1999));
        assert!(!range.contains(999));
        assert!(!range.contains(2000));
    }

    #[test]
    fn test_single_value_range() {
        let range = ContextRange::single(4242);
        assert!(range.contains(4242));
        assert!(!range.contains(4243));
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_inside_overlapping_ranges() {
        let ranges = vec![
            ContextRange::new(1400, Some(2000)),
            ContextRange::new(1000, Some(1500)),
        ];
        assert!(is_extension_inside_range(&exten("1450"), &ranges));
        assert!(is_extension_inside_range(&exten("1999"), &ranges));
        assert!(!is_extension_inside_range(&exten("2001"), &ranges));
    }

    #[test]
    fn test_outside_all_ranges() {
        let ranges = vec![ContextRange::new(1000, Some(1099))];
        assert!(!is_extension_inside_range(&exten("2500"), &ranges));
    }

    #[test]
    fn test_empty_range_list_contains_nothing() {
        assert!(!is_extension_inside_range(&exten("1000"), &[]));
    }

    #[test]
    fn test_pattern_never_inside() {
        let ranges = vec![ContextRange::new(0, Some(u32::MAX))];
        assert!(!is_extension_inside_range(&exten("_1XXX"), &ranges));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let range = ContextRange::new(2000, Some(1000));
        assert!(range.validate().is_err());
        assert!(range.is_empty());
    }

    #[test]
    fn test_oversized_did_length_rejected() {
        let mut range = ContextRange::new(1000, Some(1999));
        range.did_length = ContextRange::MAX_DID_LENGTH;
        assert!(range.validate().is_ok());

        range.did_length = ContextRange::MAX_DID_LENGTH + 1;
        let err = range.validate().unwrap_err();
        assert!(err.to_string().contains("DID length"));
    }
}

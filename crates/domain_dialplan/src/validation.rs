//! Dial-plan validation rules
//!
//! This module validates extensions against their context before they are
//! persisted.
//!
//! # Validation Rules
//!
//! - The context must exist and be enabled
//! - Plain extensions must fall inside a context range whose kind matches
//!   the destination (user extensions in user ranges, and so on)
//! - Pattern extensions skip range containment but must be well-formed
//! - Ranges themselves must not be inverted

pub use pbx_kernel::ValidationResult;

use crate::context::Context;
use crate::extension::Extension;
use crate::range::{is_extension_inside_range, ContextRange};

/// Validator for dial-plan entities
///
/// # Examples
///
/// ```rust
/// use domain_dialplan::{Context, ContextRange, DialplanValidator, Extension,
///     ExtensionDestination, RangeKind};
/// use pbx_kernel::{ExtenNumber, UserId};
///
/// let context = Context::new("default")
///     .with_range(RangeKind::User, ContextRange::new(1000, Some(1999)));
/// let extension = Extension::new(
///     ExtenNumber::parse("1450").unwrap(),
///     "default",
///     ExtensionDestination::User(UserId::new()),
/// );
///
/// let result = DialplanValidator::validate_extension(&extension, &context);
/// assert!(result.is_valid);
/// ```
pub struct DialplanValidator;

impl DialplanValidator {
    /// Validates an extension against the context it is registered in
    ///
    /// # Arguments
    ///
    /// * `extension` - The extension to validate
    /// * `context` - The context the extension claims to live in
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate_extension(extension: &Extension, context: &Context) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if extension.context != context.name {
            result.add_error(format!(
                "Extension context '{}' does not match context '{}'",
                extension.context, context.name
            ));
            return result;
        }

        if !context.enabled {
            result.add_error(format!("Context '{}' is disabled", context.name));
        }

        // Patterns are not range-constrained
        if extension.exten.is_pattern() {
            return result;
        }

        let Some(kind) = extension.destination.range_kind() else {
            // Custom destinations dial whatever the admin wrote
            return result;
        };

        let ranges: Vec<ContextRange> = context
            .ranges_of_kind(kind)
            .into_iter()
            .copied()
            .collect();

        if ranges.is_empty() {
            result.add_error(format!(
                "Context '{}' declares no {} ranges",
                context.name,
                kind.as_str()
            ));
            return result;
        }

        if !is_extension_inside_range(&extension.exten, &ranges) {
            result.add_error(format!(
                "Extension {} is outside the {} ranges of context '{}'",
                extension.exten,
                kind.as_str(),
                context.name
            ));
        }

        result
    }

    /// Validates a context and all of its ranges
    ///
    /// # Arguments
    ///
    /// * `context` - The context to validate
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate_context(context: &Context) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if context.name.trim().is_empty() {
            result.add_error("Context name is required");
        }

        if context
            .name
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() && c != '_' && c != '-')
        {
            result.add_error(format!(
                "Context name '{}' may only contain alphanumerics, '-' and '_'",
                context.name
            ));
        }

        for (kind, range) in &context.ranges {
            if let Err(e) = range.validate() {
                result.add_error(format!("{} range: {}", kind.as_str(), e));
            }
            if range.did_length > 0 && *kind != crate::range::RangeKind::Incall {
                result.add_warning(format!(
                    "did_length is only meaningful on incall ranges, found on {}",
                    kind.as_str()
                ));
            }
        }

        result
    }

    /// Finds the lowest free extension number inside the given ranges
    ///
    /// Used when provisioning a user without an explicit number. Scans the
    /// ranges in order and skips numbers already present in `taken`.
    ///
    /// # Arguments
    ///
    /// * `ranges` - Candidate ranges, typically the context's user ranges
    /// * `taken` - Numbers already registered in the context
    ///
    /// # Returns
    ///
    /// The first available number, or `None` when every slot is used
    pub fn first_available_exten(ranges: &[ContextRange], taken: &[u32]) -> Option<u32> {
        for range in ranges {
            let end = range.end.unwrap_or(range.start);
            for n in range.start..=end {
                if !taken.contains(&n) {
                    return Some(n);
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::ExtensionDestination;
    use crate::range::RangeKind;
    use pbx_kernel::{ExtenNumber, QueueId, UserId};

    fn user_context() -> Context {
        Context::new("default")
            .with_range(RangeKind::User, ContextRange::new(1400, Some(2000)))
            .with_range(RangeKind::User, ContextRange::new(1000, Some(1500)))
            .with_range(RangeKind::Queue, ContextRange::new(3000, Some(3099)))
    }

    fn user_exten(s: &str) -> Extension {
        Extension::new(
            ExtenNumber::parse(s).unwrap(),
            "default",
            ExtensionDestination::User(UserId::new()),
        )
    }

    #[test]
    fn test_extension_inside_user_range() {
        let result = DialplanValidator::validate_extension(&user_exten("1450"), &user_context());
        assert!(result.is_valid, "Errors: {:?}", result.errors);
    }

    #[test]
    fn test_extension_outside_every_range() {
        let result = DialplanValidator::validate_extension(&user_exten("2500"), &user_context());
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("outside")));
    }

    #[test]
    fn test_queue_extension_checked_against_queue_ranges() {
        let extension = Extension::new(
            ExtenNumber::parse("3042").unwrap(),
            "default",
            ExtensionDestination::Queue(QueueId::new()),
        );
        let result = DialplanValidator::validate_extension(&extension, &user_context());
        assert!(result.is_valid, "Errors: {:?}", result.errors);

        // A queue number in the user range is not acceptable
        let extension = Extension::new(
            ExtenNumber::parse("1450").unwrap(),
            "default",
            ExtensionDestination::Queue(QueueId::new()),
        );
        let result = DialplanValidator::validate_extension(&extension, &user_context());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_pattern_bypasses_ranges() {
        let extension = Extension::new(
            ExtenNumber::parse("_14XX").unwrap(),
            "default",
            ExtensionDestination::User(UserId::new()),
        );
        let result = DialplanValidator::validate_extension(&extension, &user_context());
        assert!(result.is_valid);
    }

    #[test]
    fn test_disabled_context_rejected() {
        let mut context = user_context();
        context.enabled = false;
        let result = DialplanValidator::validate_extension(&user_exten("1450"), &context);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("disabled")));
    }

    #[test]
    fn test_context_mismatch_rejected() {
        let extension = Extension::new(
            ExtenNumber::parse("1450").unwrap(),
            "sales",
            ExtensionDestination::User(UserId::new()),
        );
        let result = DialplanValidator::validate_extension(&extension, &user_context());
        assert!(!result.is_valid);
    }

    #[test]
    fn test_context_with_inverted_range_invalid() {
        let context =
            Context::new("default").with_range(RangeKind::User, ContextRange::new(2000, Some(1000)));
        let result = DialplanValidator::validate_context(&context);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_did_length_warning_outside_incall() {
        let mut range = ContextRange::new(1000, Some(1999));
        range.did_length = 4;
        let context = Context::new("default").with_range(RangeKind::User, range);
        let result = DialplanValidator::validate_context(&context);
        assert!(result.is_valid);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_first_available_exten_skips_taken() {
        let ranges = vec![ContextRange::new(1000, Some(1003))];
        let taken = vec![1000, 1001];
        assert_eq!(
            DialplanValidator::first_available_exten(&ranges, &taken),
            Some(1002)
        );
    }

    #[test]
    fn test_first_available_exten_exhausted() {
        let ranges = vec![ContextRange::new(1000, Some(1001))];
        let taken = vec![1000, 1001];
        assert_eq!(DialplanValidator::first_available_exten(&ranges, &taken), None);
    }
}

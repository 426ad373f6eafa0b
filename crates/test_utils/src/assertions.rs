//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_callcenter::{HourlyQueueStats, QueueEventKind};
use pbx_kernel::ValidationResult;

/// Asserts that a validation result passed with no errors
///
/// # Panics
///
/// Panics with the collected error messages when validation failed
pub fn assert_validation_ok(result: &ValidationResult) {
    assert!(
        result.is_valid,
        "Expected validation to pass, got errors: {:?}",
        result.errors
    );
}

/// Asserts that a validation result failed and mentions a fragment
///
/// # Arguments
///
/// * `result` - The validation result under test
/// * `fragment` - Text expected inside at least one error message
pub fn assert_validation_fails(result: &ValidationResult, fragment: &str) {
    assert!(
        !result.is_valid,
        "Expected validation to fail mentioning '{}', but it passed",
        fragment
    );
    assert!(
        result.errors.iter().any(|e| e.contains(fragment)),
        "No validation error mentions '{}': {:?}",
        fragment,
        result.errors
    );
}

/// Asserts that a validation result passed but raised a warning
pub fn assert_validation_warns(result: &ValidationResult, fragment: &str) {
    assert!(
        result.is_valid,
        "Expected a warning, got errors: {:?}",
        result.errors
    );
    assert!(
        result.warnings.iter().any(|w| w.contains(fragment)),
        "No warning mentions '{}': {:?}",
        fragment,
        result.warnings
    );
}

/// Asserts the per-kind count of one stats bucket
pub fn assert_kind_count(stats: &HourlyQueueStats, kind: QueueEventKind, expected: u64) {
    assert_eq!(
        stats.count(kind),
        expected,
        "Bucket {}@{:?}: expected {} {:?} events, got {}",
        stats.queue,
        stats.hour,
        expected,
        kind,
        stats.count(kind)
    );
}

/// Asserts that stats buckets are sorted by queue then hour
pub fn assert_stats_sorted(stats: &[HourlyQueueStats]) {
    for pair in stats.windows(2) {
        let key_a = (&pair[0].queue, pair[0].hour);
        let key_b = (&pair[1].queue, pair[1].hour);
        assert!(
            key_a <= key_b,
            "Stats out of order: {:?} before {:?}",
            key_a,
            key_b
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbx_kernel::ValidationResult;

    #[test]
    fn test_assert_validation_ok() {
        assert_validation_ok(&ValidationResult::ok());
    }

    #[test]
    #[should_panic(expected = "Expected validation to pass")]
    fn test_assert_validation_ok_panics_on_error() {
        let mut result = ValidationResult::ok();
        result.add_error("broken");
        assert_validation_ok(&result);
    }

    #[test]
    fn test_assert_validation_fails_matches_fragment() {
        let mut result = ValidationResult::ok();
        result.add_error("name contains invalid characters");
        assert_validation_fails(&result, "invalid characters");
    }
}

//! Property tests for numbering range containment

use domain_dialplan::{is_extension_inside_range, ContextRange};
use pbx_kernel::ExtenNumber;
use proptest::prelude::*;

proptest! {
    #[test]
    fn value_inside_bounds_is_contained(start in 0u32..50_000, span in 0u32..5_000, offset in 0u32..5_000) {
        let end = start + span;
        let range = ContextRange::new(start, Some(end));
        let n = start + offset.min(span);
        prop_assert!(range.contains(n));
    }

    #[test]
    fn value_above_end_is_not_contained(start in 0u32..50_000, span in 0u32..5_000, above in 1u32..5_000) {
        let end = start + span;
        let range = ContextRange::new(start, Some(end));
        prop_assert!(!range.contains(end + above));
    }

    #[test]
    fn single_value_range_matches_only_itself(v in 0u32..100_000, other in 0u32..100_000) {
        let range = ContextRange::single(v);
        prop_assert_eq!(range.contains(other), v == other);
    }

    #[test]
    fn containment_matches_any_range(n in 1000u32..2000) {
        let ranges = vec![
            ContextRange::new(1400, Some(2000)),
            ContextRange::new(1000, Some(1500)),
        ];
        let exten = ExtenNumber::parse(&n.to_string()).unwrap();
        prop_assert!(is_extension_inside_range(&exten, &ranges));
    }
}

#[test]
fn spec_example_1450_inside_overlapping_ranges() {
    let ranges = vec![
        ContextRange::new(1400, Some(2000)),
        ContextRange::new(1000, Some(1500)),
    ];
    let exten = ExtenNumber::parse("1450").unwrap();
    assert!(is_extension_inside_range(&exten, &ranges));
}

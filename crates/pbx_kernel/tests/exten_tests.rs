//! Unit tests for the extension number value type
//!
//! Tests cover plain extensions, dial patterns, rejection of malformed
//! input, and the error taxonomy helpers.

use pbx_kernel::{ExtenNumber, KernelError};
use proptest::prelude::*;

mod parsing {
    use super::*;

    #[test]
    fn test_plain_digit_string_parses() {
        let exten = ExtenNumber::parse("2000").unwrap();
        assert_eq!(exten.value(), Some(2000));
    }

    #[test]
    fn test_from_str_round_trip() {
        let exten: ExtenNumber = "1450".parse().unwrap();
        assert_eq!(exten.to_string(), "1450");
    }

    #[test]
    fn test_pattern_has_no_value() {
        let exten = ExtenNumber::parse("_6XXX").unwrap();
        assert!(exten.is_pattern());
        assert!(exten.value().is_none());
    }

    #[test]
    fn test_pattern_rejects_letters_outside_alphabet() {
        assert!(ExtenNumber::parse("_6AAA").is_err());
    }

    #[test]
    fn test_whitespace_rejected() {
        assert!(ExtenNumber::parse("12 34").is_err());
        assert!(ExtenNumber::parse(" 1234").is_err());
    }
}

mod errors {
    use super::*;

    #[test]
    fn test_empty_is_input_error() {
        let err = ExtenNumber::parse("").unwrap_err();
        assert!(matches!(err, KernelError::Input(_)));
    }

    #[test]
    fn test_invalid_parameters_lists_fields() {
        let err = KernelError::invalid_parameters(["exten", "context"]);
        assert!(err.to_string().contains("exten"));
        assert!(err.to_string().contains("context"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_not_found_predicate() {
        let err = KernelError::not_found("Extension 1000@default");
        assert!(err.is_not_found());
        assert!(!err.is_input_error());
    }
}

proptest! {
    #[test]
    fn any_u32_survives_a_round_trip(n in 0u32..=99_999_999) {
        let exten = ExtenNumber::parse(&n.to_string()).unwrap();
        prop_assert_eq!(exten.value(), Some(n));
    }

    #[test]
    fn non_digit_strings_never_parse_as_plain(s in "[a-zA-Z!@# ]{1,8}") {
        prop_assert!(ExtenNumber::parse(&s).is_err());
    }
}

//! Validation result accumulator
//!
//! Business-rule validators collect every problem they find instead of
//! stopping at the first one, so callers can report a complete list.
//! Warnings flag suspicious but acceptable configuration.

/// Result of a business-rule validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validated value is acceptable
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
    /// List of validation warnings (non-fatal issues)
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result with errors
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Adds a warning to the result
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_is_valid() {
        let result = ValidationResult::ok();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_add_error_invalidates() {
        let mut result = ValidationResult::ok();
        result.add_error("bad");
        assert!(!result.is_valid);
    }

    #[test]
    fn test_warning_keeps_valid() {
        let mut result = ValidationResult::ok();
        result.add_warning("odd");
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_merge_propagates_failure() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::fail(vec!["bad".into()]));
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }
}

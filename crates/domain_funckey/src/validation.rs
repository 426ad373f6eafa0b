//! Func-key validation rules
//!
//! # Validation Rules
//!
//! - Template name is required for shared templates
//! - BLF on an unsupervisable destination is flagged as a warning
//! - Forward keys with a pre-filled extension need a digit string

use pbx_kernel::ValidationResult;

use crate::destination::FuncKeyDestination;
use crate::template::FuncKeyTemplate;

/// Validator for func-key templates
pub struct FuncKeyValidator;

impl FuncKeyValidator {
    /// Validates a template and all of its mappings
    ///
    /// # Arguments
    ///
    /// * `template` - The template to validate
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate_template(template: &FuncKeyTemplate) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if !template.private && template.name.trim().is_empty() {
            result.add_error("Shared func-key templates must have a name");
        }

        for key in &template.keys {
            if key.blf && !key.destination.is_supervisable() {
                result.add_warning(format!(
                    "Key {} enables BLF on an unsupervisable {} destination",
                    key.position,
                    key.destination.type_str()
                ));
            }

            if let FuncKeyDestination::Forward {
                exten: Some(exten), ..
            } = &key.destination
            {
                if !exten.chars().all(|c| c.is_ascii_digit()) {
                    result.add_error(format!(
                        "Key {} forwards to a non-numeric extension '{}'",
                        key.position, exten
                    ));
                }
            }

            if let FuncKeyDestination::Service(code) = &key.destination {
                if code.trim().is_empty() {
                    result.add_error(format!("Key {} has an empty service code", key.position));
                }
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::ForwardKind;
    use crate::template::FuncKeyMapping;
    use pbx_kernel::QueueId;

    #[test]
    fn test_valid_template() {
        let mut template = FuncKeyTemplate::new("desk");
        template
            .add_key(FuncKeyMapping::new(
                1,
                FuncKeyDestination::Queue(QueueId::new()),
            ))
            .unwrap();
        let result = FuncKeyValidator::validate_template(&template);
        assert!(result.is_valid, "Errors: {:?}", result.errors);
    }

    #[test]
    fn test_unnamed_shared_template_rejected() {
        let template = FuncKeyTemplate::new("  ");
        let result = FuncKeyValidator::validate_template(&template);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_unnamed_private_template_accepted() {
        let mut template = FuncKeyTemplate::new("");
        template.private = true;
        let result = FuncKeyValidator::validate_template(&template);
        assert!(result.is_valid);
    }

    #[test]
    fn test_blf_on_queue_warns() {
        let mut template = FuncKeyTemplate::new("desk");
        let mut key = FuncKeyMapping::new(1, FuncKeyDestination::Queue(QueueId::new()));
        key.blf = true;
        template.add_key(key).unwrap();
        let result = FuncKeyValidator::validate_template(&template);
        assert!(result.is_valid);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_non_numeric_forward_rejected() {
        let mut template = FuncKeyTemplate::new("desk");
        template
            .add_key(FuncKeyMapping::new(
                1,
                FuncKeyDestination::Forward {
                    kind: ForwardKind::Busy,
                    exten: Some("12a4".to_string()),
                },
            ))
            .unwrap();
        let result = FuncKeyValidator::validate_template(&template);
        assert!(!result.is_valid);
    }
}

//! Endpoint validation rules
//!
//! # Validation Rules
//!
//! ## Users
//! - First name is required
//! - Ring time within 0-60 seconds, simultaneous calls within 1-20
//! - Email must look like an address when provided
//!
//! ## Lines
//! - Registration name and context are required
//! - Device key position is 1-based
//!
//! ## Voicemail
//! - Name, number, and context are required
//! - Number and PIN are digits only

use pbx_kernel::ValidationResult;
use validator::Validate;

use crate::line::Line;
use crate::user::User;
use crate::voicemail::Voicemail;

/// Validator for endpoint entities
pub struct EndpointValidator;

impl EndpointValidator {
    /// Validates a user's telephony settings
    ///
    /// # Arguments
    ///
    /// * `user` - The user to validate
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate_user(user: &User) -> ValidationResult {
        let mut result = ValidationResult::ok();

        // Field-shape rules live on the derive; fold its findings in first.
        if let Err(derive_errors) = user.validate() {
            for (field, errors) in derive_errors.field_errors() {
                let field = field.replace('_', " ");
                for error in errors {
                    result.add_error(match error.code.as_ref() {
                        "length" => format!("User {field} is required"),
                        "email" => format!("Invalid {field} address"),
                        code => format!("User {field} failed {code} check"),
                    });
                }
            }
        }

        if user.ring_seconds > 60 {
            result.add_error(format!(
                "Ring time must be at most 60 seconds, found {}",
                user.ring_seconds
            ));
        }

        if user.simultaneous_calls == 0 || user.simultaneous_calls > 20 {
            result.add_error(format!(
                "Simultaneous calls must be within 1-20, found {}",
                user.simultaneous_calls
            ));
        }

        if let Some(ref mobile) = user.mobile_phone {
            if !mobile.chars().all(|c| c.is_ascii_digit() || c == '+') {
                result.add_error(format!("Invalid mobile number: {}", mobile));
            }
        }

        if user.cti_enabled && user.cti_profile_id.is_none() {
            result.add_warning("CTI is enabled but no profile is assigned");
        }

        result
    }

    /// Validates a line
    pub fn validate_line(line: &Line) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if line.name.trim().is_empty() {
            result.add_error("Line name is required");
        }

        if line.context.trim().is_empty() {
            result.add_error("Line context is required");
        }

        if line.position == 0 {
            result.add_error("Line position is 1-based");
        }

        if line.device_id.is_none() && line.position > 1 {
            result.add_warning("Key position set on an unprovisioned line");
        }

        result
    }

    /// Validates a voicemail box
    pub fn validate_voicemail(voicemail: &Voicemail) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if voicemail.name.trim().is_empty() {
            result.add_error("Voicemail name is required");
        }

        if voicemail.number.is_empty() || !voicemail.number.chars().all(|c| c.is_ascii_digit()) {
            result.add_error(format!(
                "Voicemail number must be digits only, found '{}'",
                voicemail.number
            ));
        }

        if voicemail.context.trim().is_empty() {
            result.add_error("Voicemail context is required");
        }

        if let Some(ref password) = voicemail.password {
            if !password.chars().all(|c| c.is_ascii_digit()) {
                result.add_error("Voicemail password must be digits only");
            } else if password.len() < 4 {
                result.add_warning("Voicemail password shorter than 4 digits");
            }
        }

        if let Some(max) = voicemail.max_messages {
            if max == 0 {
                result.add_error("max_messages must be positive when set");
            }
        }

        result
    }
}

//! Call-center validation rules
//!
//! # Validation Rules
//!
//! ## Queues
//! - Name is lowercase alphanumeric plus `-` and `_`, not digit-leading
//! - Reserved section names of the queue configuration file are refused
//! - Member timeout within 1-300 seconds
//!
//! ## Agents
//! - Login number is digits only

use pbx_kernel::ValidationResult;

use crate::agent::Agent;
use crate::queue::Queue;

/// Section names the queue configuration file reserves for itself
const RESERVED_QUEUE_NAMES: [&str; 2] = ["general", "default"];

/// Validator for call-center entities
pub struct CallCenterValidator;

impl CallCenterValidator {
    /// Validates a queue definition
    ///
    /// # Arguments
    ///
    /// * `queue` - The queue to validate
    ///
    /// # Returns
    ///
    /// A `ValidationResult` containing any errors or warnings
    pub fn validate_queue(queue: &Queue) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if queue.name.is_empty() {
            result.add_error("Queue name is required");
            return result;
        }

        if RESERVED_QUEUE_NAMES.contains(&queue.name.as_str()) {
            result.add_error(format!("Queue name '{}' is reserved", queue.name));
        }

        if queue.name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            result.add_error("Queue name must not start with a digit");
        }

        if !queue
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            result.add_error(format!(
                "Queue name '{}' may only contain lowercase alphanumerics, '-' and '_'",
                queue.name
            ));
        }

        if queue.member_timeout == 0 || queue.member_timeout > 300 {
            result.add_error(format!(
                "Member timeout must be within 1-300 seconds, found {}",
                queue.member_timeout
            ));
        }

        if let Some(max_wait) = queue.max_wait_time {
            if max_wait == 0 {
                result.add_error("max_wait_time must be positive when set");
            }
        }

        result
    }

    /// Validates an agent definition
    pub fn validate_agent(agent: &Agent) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if agent.number.is_empty() || !agent.number.chars().all(|c| c.is_ascii_digit()) {
            result.add_error(format!(
                "Agent number must be digits only, found '{}'",
                agent.number
            ));
        }

        if agent.first_name.trim().is_empty() {
            result.add_error("Agent first name is required");
        }

        if agent.context.trim().is_empty() {
            result.add_error("Agent context is required");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_queue() {
        let queue = Queue::new("support-l1");
        let result = CallCenterValidator::validate_queue(&queue);
        assert!(result.is_valid, "Errors: {:?}", result.errors);
    }

    #[test]
    fn test_reserved_name_rejected() {
        let result = CallCenterValidator::validate_queue(&Queue::new("general"));
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("reserved")));
    }

    #[test]
    fn test_digit_leading_name_rejected() {
        let result = CallCenterValidator::validate_queue(&Queue::new("1support"));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_uppercase_name_rejected() {
        let result = CallCenterValidator::validate_queue(&Queue::new("Support"));
        assert!(!result.is_valid);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut queue = Queue::new("support");
        queue.member_timeout = 0;
        let result = CallCenterValidator::validate_queue(&queue);
        assert!(!result.is_valid);
    }

    #[test]
    fn test_valid_agent() {
        let agent = Agent::new("8001", "Ann", "default");
        let result = CallCenterValidator::validate_agent(&agent);
        assert!(result.is_valid, "Errors: {:?}", result.errors);
    }

    #[test]
    fn test_agent_number_digits_only() {
        let agent = Agent::new("80a1", "Ann", "default");
        let result = CallCenterValidator::validate_agent(&agent);
        assert!(!result.is_valid);
    }
}

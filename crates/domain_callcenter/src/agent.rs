//! Agent entity

use serde::{Deserialize, Serialize};

use pbx_kernel::AgentId;

/// A call-center agent
///
/// Agents log in and out of queues by number; unlike users they are not
/// bound to a fixed line, so any phone in the agent's context can carry
/// their calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Login number, digits only, unique per context
    pub number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub context: String,
    pub language: Option<String>,
    pub description: Option<String>,
}

impl Agent {
    pub fn new(
        number: impl Into<String>,
        first_name: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            id: AgentId::new(),
            number: number.into(),
            first_name: first_name.into(),
            last_name: None,
            context: context.into(),
            language: None,
            description: None,
        }
    }

    /// The interface string queue members use for this agent
    pub fn interface(&self) -> String {
        format!("Agent/{}", self.number)
    }

    /// Full name as shown in supervision views
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface() {
        let agent = Agent::new("8001", "Ann", "default");
        assert_eq!(agent.interface(), "Agent/8001");
    }

    #[test]
    fn test_full_name_with_and_without_last() {
        let mut agent = Agent::new("8001", "Ann", "default");
        assert_eq!(agent.full_name(), "Ann");
        agent.last_name = Some("Operator".to_string());
        assert_eq!(agent.full_name(), "Ann Operator");
    }
}

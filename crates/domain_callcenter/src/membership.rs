//! Queue membership
//!
//! A member is either a user's line or an agent, never both. Penalty
//! orders members within a strategy: lower-penalty members are offered
//! calls first, and equal penalties are tried in `position` order.

use serde::{Deserialize, Serialize};

use pbx_kernel::{AgentId, QueueId, UserId};

use crate::error::CallCenterError;

/// Membership of a user or agent in a queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMember {
    pub queue_id: QueueId,
    pub user_id: Option<UserId>,
    pub agent_id: Option<AgentId>,
    /// Dial string of the member endpoint
    pub interface: String,
    pub penalty: u8,
    /// 1-based order within the same penalty tier
    pub position: u16,
}

impl QueueMember {
    /// Creates a user membership
    pub fn for_user(queue_id: QueueId, user_id: UserId, interface: impl Into<String>) -> Self {
        Self {
            queue_id,
            user_id: Some(user_id),
            agent_id: None,
            interface: interface.into(),
            penalty: 0,
            position: 1,
        }
    }

    /// Creates an agent membership
    pub fn for_agent(queue_id: QueueId, agent_id: AgentId, interface: impl Into<String>) -> Self {
        Self {
            queue_id,
            user_id: None,
            agent_id: Some(agent_id),
            interface: interface.into(),
            penalty: 0,
            position: 1,
        }
    }

    /// Checks the member references exactly one endpoint kind
    pub fn validate(&self) -> Result<(), CallCenterError> {
        match (self.user_id, self.agent_id) {
            (Some(_), Some(_)) => Err(CallCenterError::invalid(
                "queue member cannot be both a user and an agent",
            )),
            (None, None) => Err(CallCenterError::invalid(
                "queue member must reference a user or an agent",
            )),
            _ => Ok(()),
        }
    }
}

/// Orders members the way the queue offers them calls
///
/// Sorts by penalty first, then position. Stable for equal keys.
pub fn ring_order(members: &mut [QueueMember]) {
    members.sort_by_key(|m| (m.penalty, m.position));
}

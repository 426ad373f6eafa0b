//! Queue entity

use serde::{Deserialize, Serialize};

use pbx_kernel::QueueId;

/// How waiting calls are offered to members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RingStrategy {
    /// Ring every available member
    RingAll,
    /// Ring the member idle the longest
    LeastRecent,
    /// Ring the member with the fewest completed calls
    FewestCalls,
    /// Ring a random member
    Random,
    /// Round robin remembering the last member tried
    RoundRobinMemory,
    /// Walk the member list in configured order
    Linear,
    /// Random, weighted by penalty
    WeightRandom,
}

impl RingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RingStrategy::RingAll => "ringall",
            RingStrategy::LeastRecent => "leastrecent",
            RingStrategy::FewestCalls => "fewestcalls",
            RingStrategy::Random => "random",
            RingStrategy::RoundRobinMemory => "rrmemory",
            RingStrategy::Linear => "linear",
            RingStrategy::WeightRandom => "wrandom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ringall" => Some(RingStrategy::RingAll),
            "leastrecent" => Some(RingStrategy::LeastRecent),
            "fewestcalls" => Some(RingStrategy::FewestCalls),
            "random" => Some(RingStrategy::Random),
            "rrmemory" => Some(RingStrategy::RoundRobinMemory),
            "linear" => Some(RingStrategy::Linear),
            "wrandom" => Some(RingStrategy::WeightRandom),
            _ => None,
        }
    }
}

/// A call queue
///
/// The queue name is the natural key used by queue-log rows and member
/// rows; the surrogate `id` is the handle the rest of the configuration
/// points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    pub display_name: Option<String>,
    pub music_on_hold: Option<String>,
    pub strategy: RingStrategy,
    /// Seconds each member is rung before trying the next
    pub member_timeout: u16,
    /// Callers abandoning after this many seconds are diverted, when set
    pub max_wait_time: Option<u32>,
    /// Subroutine run before the call is offered to a member
    pub preprocess_subroutine: Option<String>,
    pub enabled: bool,
}

impl Queue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: QueueId::new(),
            name: name.into(),
            display_name: None,
            music_on_hold: None,
            strategy: RingStrategy::RingAll,
            member_timeout: 15,
            max_wait_time: None,
            preprocess_subroutine: None,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_round_trip() {
        for s in [
            RingStrategy::RingAll,
            RingStrategy::LeastRecent,
            RingStrategy::FewestCalls,
            RingStrategy::Random,
            RingStrategy::RoundRobinMemory,
            RingStrategy::Linear,
            RingStrategy::WeightRandom,
        ] {
            assert_eq!(RingStrategy::parse(s.as_str()), Some(s));
        }
        assert_eq!(RingStrategy::parse("everyone"), None);
    }

    #[test]
    fn test_new_queue_defaults() {
        let queue = Queue::new("support");
        assert_eq!(queue.strategy, RingStrategy::RingAll);
        assert!(queue.enabled);
        assert!(queue.max_wait_time.is_none());
    }
}

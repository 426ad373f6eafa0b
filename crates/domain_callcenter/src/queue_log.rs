//! Queue-log event stream
//!
//! The PBX appends one row per call event on a queue. Rows are never
//! updated; statistics are derived by aggregation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal classification of a call seen by a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueEventKind {
    /// Answered by a member
    Answered,
    /// Caller hung up while waiting
    Abandoned,
    /// Waited past the queue timeout
    Timeout,
    /// Rejected, queue at capacity
    Full,
    /// Rejected, queue closed by schedule
    Closed,
    /// Rejected on entry, no member logged in
    JoinEmpty,
    /// Dropped mid-wait when the last member logged out
    LeaveEmpty,
    /// Diverted, abandonment ratio over threshold
    DivertCaRatio,
    /// Diverted, estimated wait over threshold
    DivertWaitTime,
}

impl QueueEventKind {
    /// Every kind, in reporting column order
    pub const ALL: [QueueEventKind; 9] = [
        QueueEventKind::Answered,
        QueueEventKind::Abandoned,
        QueueEventKind::Timeout,
        QueueEventKind::Full,
        QueueEventKind::Closed,
        QueueEventKind::JoinEmpty,
        QueueEventKind::LeaveEmpty,
        QueueEventKind::DivertCaRatio,
        QueueEventKind::DivertWaitTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueueEventKind::Answered => "answered",
            QueueEventKind::Abandoned => "abandoned",
            QueueEventKind::Timeout => "timeout",
            QueueEventKind::Full => "full",
            QueueEventKind::Closed => "closed",
            QueueEventKind::JoinEmpty => "joinempty",
            QueueEventKind::LeaveEmpty => "leaveempty",
            QueueEventKind::DivertCaRatio => "divert_ca_ratio",
            QueueEventKind::DivertWaitTime => "divert_waittime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "answered" => Some(QueueEventKind::Answered),
            "abandoned" => Some(QueueEventKind::Abandoned),
            "timeout" => Some(QueueEventKind::Timeout),
            "full" => Some(QueueEventKind::Full),
            "closed" => Some(QueueEventKind::Closed),
            "joinempty" => Some(QueueEventKind::JoinEmpty),
            "leaveempty" => Some(QueueEventKind::LeaveEmpty),
            "divert_ca_ratio" => Some(QueueEventKind::DivertCaRatio),
            "divert_waittime" => Some(QueueEventKind::DivertWaitTime),
            _ => None,
        }
    }

    /// Whether the call reached a member
    pub fn is_answered(&self) -> bool {
        matches!(self, QueueEventKind::Answered)
    }
}

/// One queue-log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueLogEvent {
    pub time: DateTime<Utc>,
    /// PBX call id, shared by all rows of one call
    pub call_id: String,
    pub queue: String,
    /// Member that handled the call, empty for unanswered kinds
    pub agent: Option<String>,
    pub kind: QueueEventKind,
    /// Seconds spent waiting, when the PBX logged it
    pub wait_time: Option<u32>,
    /// Seconds of conversation, answered calls only
    pub talk_time: Option<u32>,
}

impl QueueLogEvent {
    pub fn new(
        time: DateTime<Utc>,
        call_id: impl Into<String>,
        queue: impl Into<String>,
        kind: QueueEventKind,
    ) -> Self {
        Self {
            time,
            call_id: call_id.into(),
            queue: queue.into(),
            agent: None,
            kind,
            wait_time: None,
            talk_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in QueueEventKind::ALL {
            assert_eq!(QueueEventKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(QueueEventKind::parse("ringnoanswer"), None);
    }

    #[test]
    fn test_all_covers_every_kind() {
        assert_eq!(QueueEventKind::ALL.len(), 9);
    }
}

//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the PBX
//! configuration system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use domain_callcenter::{Agent, Queue, QueueEventKind, QueueLogEvent};
use domain_dialplan::{Context, ContextRange, Extension, ExtensionDestination, RangeKind};
use domain_endpoint::{Line, LineProtocol, User, Voicemail};
use pbx_kernel::ExtenNumber;

/// Fixture for dial-plan test data
pub struct DialplanFixtures;

impl DialplanFixtures {
    /// A standard internal context with user and queue ranges
    ///
    /// Users live in 1000-1999, queues in 3000-3099.
    pub fn internal_context() -> Context {
        Context::new("default")
            .with_range(RangeKind::User, ContextRange::new(1000, Some(1999)))
            .with_range(RangeKind::Queue, ContextRange::new(3000, Some(3099)))
    }

    /// A context with no ranges at all
    pub fn unconstrained_context() -> Context {
        Context::new("services")
    }

    /// A plain extension number inside the user range
    pub fn exten(raw: &str) -> ExtenNumber {
        ExtenNumber::parse(raw).expect("fixture extension must parse")
    }

    /// A custom extension at 1000@default
    pub fn custom_extension() -> Extension {
        Extension::new(
            Self::exten("1000"),
            "default",
            ExtensionDestination::Custom("s".to_string()),
        )
    }
}

/// Fixture for endpoint test data
pub struct EndpointFixtures;

impl EndpointFixtures {
    /// A standard user with default telephony settings
    pub fn alice() -> User {
        User::new("Alice", "Wonder")
    }

    /// A second user for association scenarios
    pub fn bob() -> User {
        User::new("Bob", "Carpenter")
    }

    /// A SIP line in the default context
    pub fn sip_line() -> Line {
        Line::new("abc123xy", LineProtocol::Sip, "default")
    }

    /// A voicemail box at 1000@default
    pub fn voicemail() -> Voicemail {
        Voicemail::new("Alice Wonder", "1000", "default")
    }
}

/// Fixture for call-center test data
pub struct CallCenterFixtures;

impl CallCenterFixtures {
    /// A support queue with default strategy
    pub fn support_queue() -> Queue {
        Queue::new("support")
    }

    /// An agent logged in as 8001
    pub fn agent() -> Agent {
        Agent::new("8001", "Ann", "default")
    }

    /// An answered call event on the support queue
    pub fn answered_event(time: DateTime<Utc>) -> QueueLogEvent {
        let mut event = QueueLogEvent::new(time, "call-0001", "support", QueueEventKind::Answered);
        event.agent = Some("Agent/8001".to_string());
        event.wait_time = Some(12);
        event.talk_time = Some(95);
        event
    }

    /// An abandoned call event on the support queue
    pub fn abandoned_event(time: DateTime<Utc>) -> QueueLogEvent {
        let mut event =
            QueueLogEvent::new(time, "call-0002", "support", QueueEventKind::Abandoned);
        event.wait_time = Some(47);
        event
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A fixed reference day, start of business (Mar 5 2024, 09:00 UTC)
    pub fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap()
    }

    /// A timestamp within the same hour as `morning`
    pub fn later_same_hour() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 9, 42, 11).unwrap()
    }

    /// A timestamp in the following hour
    pub fn next_hour() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 10, 3, 0).unwrap()
    }

    /// Start of the reference day
    pub fn day_start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap()
    }

    /// Start of the following day
    pub fn day_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 6, 0, 0, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_context_ranges() {
        let ctx = DialplanFixtures::internal_context();
        assert!(ctx.has_ranges_for(RangeKind::User));
        assert!(ctx.has_ranges_for(RangeKind::Queue));
        assert!(!ctx.has_ranges_for(RangeKind::Conference));
    }

    #[test]
    fn test_temporal_fixtures_ordering() {
        assert!(TemporalFixtures::morning() < TemporalFixtures::later_same_hour());
        assert!(TemporalFixtures::later_same_hour() < TemporalFixtures::next_hour());
    }
}

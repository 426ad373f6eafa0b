//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, Utc};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use domain_callcenter::{QueueEventKind, QueueLogEvent};
use domain_dialplan::{Context, ContextRange, ContextType, RangeKind};
use domain_endpoint::User;
use pbx_kernel::{CtiProfileId, VoicemailId};

/// Builder for constructing test users
pub struct TestUserBuilder {
    first_name: String,
    last_name: String,
    ring_seconds: u16,
    dnd_enabled: bool,
    cti_profile_id: Option<CtiProfileId>,
    voicemail_id: Option<VoicemailId>,
}

impl Default for TestUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestUserBuilder {
    /// Creates a new builder with a random but plausible name
    pub fn new() -> Self {
        Self {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            ring_seconds: 30,
            dnd_enabled: false,
            cti_profile_id: None,
            voicemail_id: None,
        }
    }

    /// Sets the user's name
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Sets the ring time in seconds
    pub fn with_ring_seconds(mut self, seconds: u16) -> Self {
        self.ring_seconds = seconds;
        self
    }

    /// Enables do-not-disturb
    pub fn with_dnd(mut self) -> Self {
        self.dnd_enabled = true;
        self
    }

    /// Attaches a CTI profile
    pub fn with_cti_profile(mut self, id: CtiProfileId) -> Self {
        self.cti_profile_id = Some(id);
        self
    }

    /// Attaches a voicemail box
    pub fn with_voicemail(mut self, id: VoicemailId) -> Self {
        self.voicemail_id = Some(id);
        self
    }

    /// Builds the user
    pub fn build(self) -> User {
        let mut user = User::new(self.first_name, self.last_name);
        user.ring_seconds = self.ring_seconds;
        user.dnd_enabled = self.dnd_enabled;
        user.cti_enabled = self.cti_profile_id.is_some();
        user.cti_profile_id = self.cti_profile_id;
        user.voicemail_id = self.voicemail_id;
        user
    }
}

/// Builder for constructing test contexts
pub struct TestContextBuilder {
    name: String,
    context_type: ContextType,
    ranges: Vec<(RangeKind, ContextRange)>,
}

impl TestContextBuilder {
    /// Creates a builder for an internal context
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context_type: ContextType::Internal,
            ranges: Vec::new(),
        }
    }

    /// Sets the context type
    pub fn with_type(mut self, context_type: ContextType) -> Self {
        self.context_type = context_type;
        self
    }

    /// Adds a user numbering range
    pub fn with_user_range(mut self, start: u32, end: u32) -> Self {
        self.ranges
            .push((RangeKind::User, ContextRange::new(start, Some(end))));
        self
    }

    /// Adds a queue numbering range
    pub fn with_queue_range(mut self, start: u32, end: u32) -> Self {
        self.ranges
            .push((RangeKind::Queue, ContextRange::new(start, Some(end))));
        self
    }

    /// Builds the context
    pub fn build(self) -> Context {
        let mut context = Context::new(self.name);
        context.context_type = self.context_type;
        context.ranges = self.ranges;
        context
    }
}

/// Builder for constructing queue-log events
pub struct TestQueueLogBuilder {
    time: DateTime<Utc>,
    call_id: String,
    queue: String,
    agent: Option<String>,
    kind: QueueEventKind,
    wait_time: Option<u32>,
    talk_time: Option<u32>,
}

impl TestQueueLogBuilder {
    /// Creates a builder for one event
    pub fn new(time: DateTime<Utc>, queue: impl Into<String>, kind: QueueEventKind) -> Self {
        Self {
            time,
            call_id: format!("call-{}", time.timestamp()),
            queue: queue.into(),
            agent: None,
            kind,
            wait_time: None,
            talk_time: None,
        }
    }

    /// Sets the PBX call id
    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = call_id.into();
        self
    }

    /// Sets the member that handled the call
    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Sets the wait time in seconds
    pub fn with_wait_time(mut self, seconds: u32) -> Self {
        self.wait_time = Some(seconds);
        self
    }

    /// Sets the talk time in seconds
    pub fn with_talk_time(mut self, seconds: u32) -> Self {
        self.talk_time = Some(seconds);
        self
    }

    /// Builds the event
    pub fn build(self) -> QueueLogEvent {
        let mut event = QueueLogEvent::new(self.time, self.call_id, self.queue, self.kind);
        event.agent = self.agent;
        event.wait_time = self.wait_time;
        event.talk_time = self.talk_time;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TemporalFixtures;

    #[test]
    fn test_user_builder_defaults() {
        let user = TestUserBuilder::new().build();
        assert!(!user.first_name.is_empty());
        assert_eq!(user.ring_seconds, 30);
        assert!(!user.cti_enabled);
    }

    #[test]
    fn test_user_builder_cti_enables_flag() {
        let user = TestUserBuilder::new()
            .with_cti_profile(CtiProfileId::new())
            .build();
        assert!(user.cti_enabled);
    }

    #[test]
    fn test_context_builder() {
        let context = TestContextBuilder::new("office")
            .with_user_range(1000, 1999)
            .with_queue_range(3000, 3099)
            .build();
        assert_eq!(context.ranges.len(), 2);
    }

    #[test]
    fn test_queue_log_builder() {
        let event = TestQueueLogBuilder::new(
            TemporalFixtures::morning(),
            "support",
            QueueEventKind::Answered,
        )
        .with_agent("Agent/8001")
        .with_wait_time(10)
        .with_talk_time(60)
        .build();

        assert_eq!(event.queue, "support");
        assert_eq!(event.wait_time, Some(10));
        assert_eq!(event.agent.as_deref(), Some("Agent/8001"));
    }
}

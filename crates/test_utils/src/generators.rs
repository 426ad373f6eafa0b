//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use domain_callcenter::{QueueEventKind, QueueLogEvent};
use domain_dialplan::ContextRange;
use pbx_kernel::ExtenNumber;

/// Strategy for generating plain four-digit extension numbers
pub fn exten_strategy() -> impl Strategy<Value = ExtenNumber> {
    (1000u32..10000u32).prop_map(|n| {
        ExtenNumber::parse(&n.to_string()).expect("generated digits always parse")
    })
}

/// Strategy for generating valid (non-inverted) numbering ranges
pub fn range_strategy() -> impl Strategy<Value = ContextRange> {
    (0u32..10000u32, 0u32..5000u32, prop::bool::ANY).prop_map(|(start, span, single)| {
        if single {
            ContextRange::single(start)
        } else {
            ContextRange::new(start, Some(start + span))
        }
    })
}

/// Strategy for generating queue event kinds
pub fn event_kind_strategy() -> impl Strategy<Value = QueueEventKind> {
    prop::sample::select(QueueEventKind::ALL.to_vec())
}

/// Strategy for generating timestamps inside one reference day
pub fn timestamp_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0u32..24u32, 0u32..60u32, 0u32..60u32).prop_map(|(h, m, s)| {
        Utc.with_ymd_and_hms(2024, 3, 5, h, m, s)
            .single()
            .expect("in-range civil time")
    })
}

/// Strategy for generating whole queue-log events
///
/// Talk time is only attached to answered events, mirroring what the PBX
/// actually logs.
pub fn queue_log_event_strategy() -> impl Strategy<Value = QueueLogEvent> {
    (
        timestamp_strategy(),
        event_kind_strategy(),
        prop::sample::select(vec!["support", "sales", "billing"]),
        proptest::option::of(0u32..600u32),
        0u32..3600u32,
    )
        .prop_map(|(time, kind, queue, wait_time, talk)| {
            let mut event =
                QueueLogEvent::new(time, format!("call-{}", time.timestamp()), queue, kind);
            event.wait_time = wait_time;
            if kind.is_answered() {
                event.talk_time = Some(talk);
                event.agent = Some("Agent/8001".to_string());
            }
            event
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_extens_have_values(exten in exten_strategy()) {
            prop_assert!(exten.value().is_some());
        }

        #[test]
        fn generated_ranges_validate(range in range_strategy()) {
            prop_assert!(range.validate().is_ok());
            prop_assert!(range.contains(range.start));
        }

        #[test]
        fn talk_time_only_on_answered(event in queue_log_event_strategy()) {
            if event.talk_time.is_some() {
                prop_assert_eq!(event.kind, QueueEventKind::Answered);
            }
        }
    }
}

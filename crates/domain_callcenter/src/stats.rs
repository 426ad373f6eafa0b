//! Hourly queue statistics
//!
//! Buckets raw queue-log events by (queue, hour) and counts them per event
//! kind. This is the in-memory twin of the queue-log repository's GROUP BY
//! query; both produce `HourlyQueueStats` so reports can mix sources.
//!
//! The per-kind counters mirror the periodic stat table of the legacy
//! reporting schema, one column per terminal classification.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::queue_log::{QueueEventKind, QueueLogEvent};

/// Aggregated counts for one queue over one hour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyQueueStats {
    pub queue: String,
    /// Start of the hour bucket, UTC
    pub hour: Option<DateTime<Utc>>,
    pub answered: u64,
    pub abandoned: u64,
    pub timeout: u64,
    pub full: u64,
    pub closed: u64,
    pub joinempty: u64,
    pub leaveempty: u64,
    pub divert_ca_ratio: u64,
    pub divert_waittime: u64,
    /// Sum of logged wait seconds across counted events
    pub total_wait_time: u64,
    /// Sum of logged talk seconds across answered events
    pub total_talk_time: u64,
}

impl HourlyQueueStats {
    /// Counts one event into the bucket
    pub fn record(&mut self, event: &QueueLogEvent) {
        match event.kind {
            QueueEventKind::Answered => self.answered += 1,
            QueueEventKind::Abandoned => self.abandoned += 1,
            QueueEventKind::Timeout => self.timeout += 1,
            QueueEventKind::Full => self.full += 1,
            QueueEventKind::Closed => self.closed += 1,
            QueueEventKind::JoinEmpty => self.joinempty += 1,
            QueueEventKind::LeaveEmpty => self.leaveempty += 1,
            QueueEventKind::DivertCaRatio => self.divert_ca_ratio += 1,
            QueueEventKind::DivertWaitTime => self.divert_waittime += 1,
        }
        if let Some(wait) = event.wait_time {
            self.total_wait_time += u64::from(wait);
        }
        if event.kind.is_answered() {
            if let Some(talk) = event.talk_time {
                self.total_talk_time += u64::from(talk);
            }
        }
    }

    /// Total events counted in the bucket
    pub fn total(&self) -> u64 {
        self.answered
            + self.abandoned
            + self.timeout
            + self.full
            + self.closed
            + self.joinempty
            + self.leaveempty
            + self.divert_ca_ratio
            + self.divert_waittime
    }

    /// Count for a single event kind
    pub fn count(&self, kind: QueueEventKind) -> u64 {
        match kind {
            QueueEventKind::Answered => self.answered,
            QueueEventKind::Abandoned => self.abandoned,
            QueueEventKind::Timeout => self.timeout,
            QueueEventKind::Full => self.full,
            QueueEventKind::Closed => self.closed,
            QueueEventKind::JoinEmpty => self.joinempty,
            QueueEventKind::LeaveEmpty => self.leaveempty,
            QueueEventKind::DivertCaRatio => self.divert_ca_ratio,
            QueueEventKind::DivertWaitTime => self.divert_waittime,
        }
    }

    /// Mean wait in seconds over counted events, `None` for empty buckets
    pub fn mean_wait_time(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            None
        } else {
            Some(self.total_wait_time as f64 / total as f64)
        }
    }

    /// Mean talk time in seconds over answered calls
    pub fn mean_talk_time(&self) -> Option<f64> {
        if self.answered == 0 {
            None
        } else {
            Some(self.total_talk_time as f64 / self.answered as f64)
        }
    }
}

/// Floors a timestamp to the start of its hour
fn hour_floor(time: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let secs = time.timestamp();
    DateTime::from_timestamp(secs - secs.rem_euclid(3600), 0)
}

/// Aggregates queue-log events into per-queue, per-hour buckets
///
/// Buckets come back sorted by queue name then hour. Events whose
/// timestamp cannot be floored (out of chrono's range) are skipped.
///
/// # Arguments
///
/// * `events` - Raw queue-log rows, any order
pub fn aggregate_by_hour(events: &[QueueLogEvent]) -> Vec<HourlyQueueStats> {
    let mut buckets: BTreeMap<(String, DateTime<Utc>), HourlyQueueStats> = BTreeMap::new();

    for event in events {
        let Some(hour) = hour_floor(event.time) else {
            continue;
        };
        let bucket = buckets
            .entry((event.queue.clone(), hour))
            .or_insert_with(|| HourlyQueueStats {
                queue: event.queue.clone(),
                hour: Some(hour),
                ..Default::default()
            });
        bucket.record(event);
    }

    buckets.into_values().collect()
}

//! Call-Center Domain
//!
//! This crate models call queues, the agents staffing them, queue
//! membership, and the queue-log event stream from which per-hour
//! statistics are aggregated.
//!
//! # Queue statistics
//!
//! The PBX appends one queue-log row per call event (answered, abandoned,
//! timeout, diverted...). Reporting buckets those rows by queue and hour
//! and counts them per event kind. The aggregation exists twice on
//! purpose: `stats::aggregate_by_hour` is the pure in-memory form, and the
//! queue-log repository runs the equivalent GROUP BY on the server for
//! large windows.

pub mod agent;
pub mod error;
pub mod membership;
pub mod queue;
pub mod queue_log;
pub mod stats;
pub mod validation;

pub use agent::Agent;
pub use error::CallCenterError;
pub use membership::QueueMember;
pub use queue::{Queue, RingStrategy};
pub use queue_log::{QueueEventKind, QueueLogEvent};
pub use stats::{aggregate_by_hour, HourlyQueueStats};
pub use validation::CallCenterValidator;

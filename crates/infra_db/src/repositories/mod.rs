//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for each domain. Repositories encapsulate SQL queries
//! and map between database rows and domain types.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries mapped through `sqlx::FromRow` row structs
//! - Transaction support for multi-row mutations
//! - Constraint violations surfaced as typed `DatabaseError` variants

pub mod callcenter;
pub mod dialplan;
pub mod endpoint;
pub mod funckey;
pub mod queue_log;

pub use callcenter::CallCenterRepository;
pub use dialplan::DialplanRepository;
pub use endpoint::EndpointRepository;
pub use funckey::FuncKeyRepository;
pub use queue_log::QueueLogRepository;

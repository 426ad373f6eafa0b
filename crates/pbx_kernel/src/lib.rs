//! PBX Kernel - Foundational types and utilities for the PBX configuration system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for every configurable resource
//! - Extension number parsing and pattern handling
//! - The shared error taxonomy used by the data-access layer

pub mod error;
pub mod exten;
pub mod identifiers;
pub mod validation;

pub use error::KernelError;
pub use exten::ExtenNumber;
pub use validation::ValidationResult;
pub use identifiers::{
    AgentId, CallFilterId, ContextId, CtiProfileId, ExtensionId, FuncKeyTemplateId, LineId,
    QueueId, UserId, VoicemailId,
};

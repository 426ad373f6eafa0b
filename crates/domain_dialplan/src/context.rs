//! Context entity
//!
//! A context is a dial-plan namespace. Every line, extension, queue, and
//! inbound route lives inside one, and numbers are only comparable within
//! the same context: `1000@internal` and `1000@sales` are distinct.

use serde::{Deserialize, Serialize};

use crate::range::{ContextRange, RangeKind};

/// The role a context plays in the dial plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextType {
    /// Internal extensions (users, groups, queues)
    Internal,
    /// Inbound DID routing
    Incall,
    /// Outbound call routing
    Outcall,
    /// Feature/service codes
    Services,
    /// Anything else (legacy contexts, includes)
    Others,
}

impl ContextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextType::Internal => "internal",
            ContextType::Incall => "incall",
            ContextType::Outcall => "outcall",
            ContextType::Services => "services",
            ContextType::Others => "others",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "internal" => Some(ContextType::Internal),
            "incall" => Some(ContextType::Incall),
            "outcall" => Some(ContextType::Outcall),
            "services" => Some(ContextType::Services),
            "others" => Some(ContextType::Others),
            _ => None,
        }
    }
}

/// A dial-plan context with its numbering ranges
///
/// The context name is the natural key used by the rest of the
/// configuration; `display_name` is what operators see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    pub display_name: Option<String>,
    pub context_type: ContextType,
    pub description: Option<String>,
    pub enabled: bool,
    /// Numbering ranges grouped with the resource kind they constrain
    pub ranges: Vec<(RangeKind, ContextRange)>,
}

impl Context {
    /// Creates an enabled internal context with no ranges
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            context_type: ContextType::Internal,
            description: None,
            enabled: true,
            ranges: Vec::new(),
        }
    }

    /// Adds a numbering range for the given resource kind
    pub fn with_range(mut self, kind: RangeKind, range: ContextRange) -> Self {
        self.ranges.push((kind, range));
        self
    }

    /// Returns the ranges constraining one resource kind
    pub fn ranges_of_kind(&self, kind: RangeKind) -> Vec<&ContextRange> {
        self.ranges
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, r)| r)
            .collect()
    }

    /// Whether the context declares any range for the given kind
    pub fn has_ranges_for(&self, kind: RangeKind) -> bool {
        self.ranges.iter().any(|(k, _)| *k == kind)
    }
}

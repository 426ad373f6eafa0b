//! Func-key destinations
//!
//! A destination is what a key does when pressed. The legacy schema stores
//! it as a `(type, typeval)` string pair; this module is the codec between
//! that pair and the typed enum.

use serde::{Deserialize, Serialize};

use pbx_kernel::{AgentId, CallFilterId, QueueId, UserId};

use crate::error::FuncKeyError;

/// Agent state change triggered by an agent key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentAction {
    Login,
    Logout,
    Toggle,
}

impl AgentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentAction::Login => "login",
            AgentAction::Logout => "logout",
            AgentAction::Toggle => "toggle",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "login" => Some(AgentAction::Login),
            "logout" => Some(AgentAction::Logout),
            "toggle" => Some(AgentAction::Toggle),
            _ => None,
        }
    }
}

/// Which call-forward mode a forward key toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForwardKind {
    Busy,
    NoAnswer,
    Unconditional,
}

impl ForwardKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForwardKind::Busy => "busy",
            ForwardKind::NoAnswer => "noanswer",
            ForwardKind::Unconditional => "unconditional",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "busy" => Some(ForwardKind::Busy),
            "noanswer" => Some(ForwardKind::NoAnswer),
            "unconditional" => Some(ForwardKind::Unconditional),
            _ => None,
        }
    }
}

/// What a func key does when pressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FuncKeyDestination {
    /// Dial / supervise a user
    User(UserId),
    /// Dial a queue
    Queue(QueueId),
    /// Agent state key
    Agent {
        agent_id: AgentId,
        action: AgentAction,
    },
    /// Dial a conference room by number
    Conference(i32),
    /// Feature service code (DND toggle, call record, ...)
    Service(String),
    /// Raw extension dialed verbatim
    Custom(String),
    /// Toggle a call-forward mode, optionally pre-filled
    Forward {
        kind: ForwardKind,
        exten: Option<String>,
    },
    /// Park the current call
    Park,
    /// Supervise / retrieve a parking position
    ParkPosition(u32),
    /// Toggle boss/secretary filtering for a filter member
    BsFilter(CallFilterId),
}

impl FuncKeyDestination {
    /// Legacy `type` column value
    pub fn type_str(&self) -> &'static str {
        match self {
            FuncKeyDestination::User(_) => "user",
            FuncKeyDestination::Queue(_) => "queue",
            FuncKeyDestination::Agent { .. } => "agent",
            FuncKeyDestination::Conference(_) => "conference",
            FuncKeyDestination::Service(_) => "service",
            FuncKeyDestination::Custom(_) => "custom",
            FuncKeyDestination::Forward { .. } => "forward",
            FuncKeyDestination::Park => "park",
            FuncKeyDestination::ParkPosition(_) => "parkpos",
            FuncKeyDestination::BsFilter(_) => "bsfilter",
        }
    }

    /// Legacy `typeval` column value
    pub fn type_val(&self) -> String {
        match self {
            FuncKeyDestination::User(id) => id.as_uuid().to_string(),
            FuncKeyDestination::Queue(id) => id.as_uuid().to_string(),
            FuncKeyDestination::Agent { agent_id, action } => {
                format!("{}:{}", action.as_str(), agent_id.as_uuid())
            }
            FuncKeyDestination::Conference(n) => n.to_string(),
            FuncKeyDestination::Service(code) => code.clone(),
            FuncKeyDestination::Custom(exten) => exten.clone(),
            FuncKeyDestination::Forward { kind, exten } => match exten {
                Some(e) => format!("{}:{}", kind.as_str(), e),
                None => kind.as_str().to_string(),
            },
            FuncKeyDestination::Park => String::new(),
            FuncKeyDestination::ParkPosition(n) => n.to_string(),
            FuncKeyDestination::BsFilter(id) => id.as_uuid().to_string(),
        }
    }

    /// Rebuilds a destination from the legacy column pair
    ///
    /// # Errors
    ///
    /// Returns `UnknownDestination` when the pair does not decode.
    pub fn from_columns(dest_type: &str, type_val: &str) -> Result<Self, FuncKeyError> {
        let unknown =
            || FuncKeyError::UnknownDestination(dest_type.to_string(), type_val.to_string());

        match dest_type {
            "user" => type_val
                .parse()
                .map(FuncKeyDestination::User)
                .map_err(|_| unknown()),
            "queue" => type_val
                .parse()
                .map(FuncKeyDestination::Queue)
                .map_err(|_| unknown()),
            "agent" => {
                let (action, id) = type_val.split_once(':').ok_or_else(unknown)?;
                let action = AgentAction::parse(action).ok_or_else(unknown)?;
                let agent_id: AgentId = id.parse().map_err(|_| unknown())?;
                Ok(FuncKeyDestination::Agent { agent_id, action })
            }
            "conference" => type_val
                .parse()
                .map(FuncKeyDestination::Conference)
                .map_err(|_| unknown()),
            "service" => Ok(FuncKeyDestination::Service(type_val.to_string())),
            "custom" => Ok(FuncKeyDestination::Custom(type_val.to_string())),
            "forward" => {
                let (kind, exten) = match type_val.split_once(':') {
                    Some((kind, exten)) => (kind, Some(exten.to_string())),
                    None => (type_val, None),
                };
                let kind = ForwardKind::parse(kind).ok_or_else(unknown)?;
                Ok(FuncKeyDestination::Forward { kind, exten })
            }
            "park" => Ok(FuncKeyDestination::Park),
            "parkpos" => type_val
                .parse()
                .map(FuncKeyDestination::ParkPosition)
                .map_err(|_| unknown()),
            "bsfilter" => type_val
                .parse()
                .map(FuncKeyDestination::BsFilter)
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }

    /// Whether a BLF lamp can track this destination's state
    pub fn is_supervisable(&self) -> bool {
        matches!(
            self,
            FuncKeyDestination::User(_)
                | FuncKeyDestination::Agent { .. }
                | FuncKeyDestination::BsFilter(_)
                | FuncKeyDestination::ParkPosition(_)
                | FuncKeyDestination::Custom(_)
        )
    }
}

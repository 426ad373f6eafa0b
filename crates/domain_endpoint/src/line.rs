//! Line entity
//!
//! A line is a registrable endpoint: the SIP (or SCCP) account a physical
//! or soft phone signs into. Lines live inside a dial-plan context and are
//! bound to users and extensions through the association module.

use serde::{Deserialize, Serialize};

use pbx_kernel::LineId;

/// Signaling protocol of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineProtocol {
    Sip,
    Sccp,
    Custom,
}

impl LineProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineProtocol::Sip => "sip",
            LineProtocol::Sccp => "sccp",
            LineProtocol::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sip" => Some(LineProtocol::Sip),
            "sccp" => Some(LineProtocol::Sccp),
            "custom" => Some(LineProtocol::Custom),
            _ => None,
        }
    }
}

/// A registrable line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    /// Registration name / SIP username
    pub name: String,
    pub protocol: LineProtocol,
    pub context: String,
    /// Device the line is provisioned on, when any
    pub device_id: Option<String>,
    /// Key position on a multi-line device, 1-based
    pub position: u8,
    pub registrar: Option<String>,
    /// Caller id override at the line level
    pub caller_id: Option<String>,
    pub enabled: bool,
}

impl Line {
    pub fn new(
        name: impl Into<String>,
        protocol: LineProtocol,
        context: impl Into<String>,
    ) -> Self {
        Self {
            id: LineId::new(),
            name: name.into(),
            protocol,
            context: context.into(),
            device_id: None,
            position: 1,
            registrar: None,
            caller_id: None,
            enabled: true,
        }
    }

    /// The interface string Asterisk dials for this line
    pub fn interface(&self) -> String {
        match self.protocol {
            LineProtocol::Sip => format!("PJSIP/{}", self.name),
            LineProtocol::Sccp => format!("SCCP/{}", self.name),
            LineProtocol::Custom => self.name.clone(),
        }
    }

    /// Whether the line is currently provisioned on a device
    pub fn is_provisioned(&self) -> bool {
        self.device_id.is_some()
    }
}

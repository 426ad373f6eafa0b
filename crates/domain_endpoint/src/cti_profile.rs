//! CTI profile entity

use serde::{Deserialize, Serialize};

use pbx_kernel::CtiProfileId;

/// A CTI client profile
///
/// Groups the desktop-client capabilities granted to users assigned the
/// profile. A user with `cti_enabled` but no profile gets no client access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtiProfile {
    pub id: CtiProfileId,
    pub name: String,
    pub description: Option<String>,
}

impl CtiProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CtiProfileId::new(),
            name: name.into(),
            description: None,
        }
    }
}

//! Station model

use serde::{Deserialize, Serialize};

/// Station entity (a reservable device: console, PC, VR rig...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_working: Option<bool>,
}

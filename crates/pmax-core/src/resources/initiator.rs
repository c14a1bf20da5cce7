//! Initiator resource.

use serde::{Deserialize, Serialize};

use super::port_group::PortKey;

/// List of initiator ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InitiatorList {
    #[serde(rename = "initiatorId", default)]
    pub initiator_ids: Vec<String>,
}

/// Information about an initiator.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Initiator {
    #[serde(rename = "initiatorId")]
    pub initiator_id: String,
    #[serde(rename = "symmetrixPortKey", default)]
    pub symmetrix_port_key: Vec<PortKey>,
    #[serde(rename = "type", default)]
    pub initiator_type: String,
    #[serde(default)]
    pub alias: String,
    #[serde(rename = "host", default, skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(rename = "host_id", default)]
    pub host_id: String,
    #[serde(rename = "logged_in", default)]
    pub logged_in: bool,
    #[serde(rename = "on_fabric", default)]
    pub on_fabric: bool,
    #[serde(rename = "num_of_vols", default)]
    pub num_of_vols: i64,
    #[serde(rename = "maskingview", default)]
    pub masking_views: Vec<String>,
}

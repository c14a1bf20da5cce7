//! Host resource and payloads.

use serde::{Deserialize, Serialize};

use super::storage_group::ExecutionOption;

/// List of host ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HostList {
    #[serde(rename = "hostId", default)]
    pub host_ids: Vec<String>,
}

/// Information about a host.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Host {
    #[serde(rename = "hostId")]
    pub host_id: String,
    #[serde(rename = "num_of_masking_views", default)]
    pub num_of_masking_views: i64,
    #[serde(rename = "num_of_initiators", default)]
    pub num_of_initiators: i64,
    #[serde(rename = "type", default)]
    pub host_type: String,
    #[serde(rename = "initiator", default)]
    pub initiators: Vec<String>,
    #[serde(rename = "maskingview", default)]
    pub masking_view_ids: Vec<String>,
    #[serde(rename = "enabled_flags", default)]
    pub enabled_flags: String,
    #[serde(rename = "disabled_flags", default)]
    pub disabled_flags: String,
    #[serde(rename = "consistent_lun", default)]
    pub consistent_lun: bool,
}

/// One host flag with an override marker.
///
/// The wire name "override" is a Rust keyword, hence the rename.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HostFlag {
    pub enabled: bool,
    #[serde(rename = "override")]
    pub override_flag: bool,
}

/// Host flag set for host creation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HostFlags {
    #[serde(rename = "volume_set_addressing", skip_serializing_if = "Option::is_none")]
    pub volume_set_addressing: Option<HostFlag>,
    #[serde(rename = "disable_q_reset_on_ua", skip_serializing_if = "Option::is_none")]
    pub disable_q_reset_on_ua: Option<HostFlag>,
    #[serde(rename = "avoid_reset_broadcast", skip_serializing_if = "Option::is_none")]
    pub avoid_reset_broadcast: Option<HostFlag>,
    #[serde(rename = "openvms", skip_serializing_if = "Option::is_none")]
    pub openvms: Option<HostFlag>,
    #[serde(rename = "scsi_3", skip_serializing_if = "Option::is_none")]
    pub scsi_3: Option<HostFlag>,
    #[serde(rename = "spc2_protocol_version", skip_serializing_if = "Option::is_none")]
    pub spc2_protocol_version: Option<HostFlag>,
    #[serde(rename = "consistent_lun", default)]
    pub consistent_lun: bool,
}

/// `POST .../host` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateHostParam {
    #[serde(rename = "hostId")]
    pub host_id: String,
    #[serde(rename = "initiatorId", default)]
    pub initiator_ids: Vec<String>,
    #[serde(rename = "hostFlags", skip_serializing_if = "Option::is_none")]
    pub host_flags: Option<HostFlags>,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

/// `PUT .../host/{id}` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateHostParam {
    #[serde(rename = "editHostActionParam")]
    pub edit_host_action_param: EditHostActionParam,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EditHostActionParam {
    #[serde(rename = "addInitiatorParam", skip_serializing_if = "Option::is_none")]
    pub add_initiator_param: Option<ChangeInitiatorParam>,
    #[serde(rename = "removeInitiatorParam", skip_serializing_if = "Option::is_none")]
    pub remove_initiator_param: Option<ChangeInitiatorParam>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChangeInitiatorParam {
    #[serde(rename = "initiator", default)]
    pub initiators: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_host_omits_absent_flags() {
        let payload = CreateHostParam {
            host_id: "csi-host".to_string(),
            initiator_ids: vec!["iqn.1993-08.org.debian:01:abc".to_string()],
            host_flags: None,
            execution_option: ExecutionOption::Synchronous,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.as_object().unwrap().get("hostFlags").is_none());
        assert_eq!(json["hostId"], "csi-host");
    }
}

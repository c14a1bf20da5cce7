//! SnapVX snapshot resources and payloads.

use serde::{Deserialize, Serialize};

use super::storage_group::ExecutionOption;

/// Snapshot modify actions.
pub const SNAPSHOT_ACTION_RENAME: &str = "Rename";
pub const SNAPSHOT_ACTION_LINK: &str = "Link";
pub const SNAPSHOT_ACTION_UNLINK: &str = "Unlink";

/// A volume referenced by name in snapshot payloads.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VolumeList {
    pub name: String,
}

/// SnapVX information associated with a source volume.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SnapshotVolumeGeneration {
    #[serde(rename = "deviceName", default)]
    pub device_name: String,
    #[serde(rename = "snapshotSrcs", default)]
    pub snapshot_srcs: Vec<VolumeSnapshotSource>,
    #[serde(rename = "snapshotLnks", default)]
    pub snapshot_links: Vec<VolumeSnapshotLink>,
}

/// A snapshot taken of a source volume.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VolumeSnapshotSource {
    #[serde(rename = "snapshotName")]
    pub snapshot_name: String,
    #[serde(default)]
    pub generation: i64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub expired: bool,
}

/// A target volume linked to a snapshot.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VolumeSnapshotLink {
    #[serde(rename = "targetDevice", default)]
    pub target_device: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub defined: bool,
}

/// `POST .../snapshot/{name}` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateVolumesSnapshot {
    #[serde(rename = "sourceVolumeList", default)]
    pub source_volume_list: Vec<VolumeList>,
    #[serde(rename = "bothSides", default)]
    pub both_sides: bool,
    #[serde(rename = "timeToLive", skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<i64>,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

/// `PUT .../snapshot/{name}` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModifyVolumeSnapshot {
    #[serde(rename = "volumeNameListSource", default)]
    pub volume_name_list_source: Vec<VolumeList>,
    #[serde(rename = "volumeNameListTarget", default)]
    pub volume_name_list_target: Vec<VolumeList>,
    pub action: String,
    #[serde(rename = "newSnapshotName", skip_serializing_if = "Option::is_none")]
    pub new_snapshot_name: Option<String>,
    #[serde(default)]
    pub generation: i64,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

/// `DELETE .../snapshot/{name}` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteVolumeSnapshot {
    #[serde(rename = "deviceNameListSource", default)]
    pub device_name_list_source: Vec<VolumeList>,
    #[serde(default)]
    pub generation: i64,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_snapshot_wire_shape() {
        let payload = CreateVolumesSnapshot {
            source_volume_list: vec![VolumeList {
                name: "00001".to_string(),
            }],
            both_sides: false,
            time_to_live: None,
            execution_option: ExecutionOption::Synchronous,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["sourceVolumeList"][0]["name"], "00001");
        assert!(json.as_object().unwrap().get("timeToLive").is_none());
    }
}

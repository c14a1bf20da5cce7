//! Volume resource and edit payloads.

use serde::{Deserialize, Serialize};

use super::storage_group::ExecutionOption;

/// Capacity unit constants used in volume attributes.
pub const CAPACITY_UNIT_CYL: &str = "CYL";
pub const CAPACITY_UNIT_GB: &str = "GB";

/// Information about a volume.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Volume {
    #[serde(rename = "volumeId")]
    pub volume_id: String,
    #[serde(rename = "type", default)]
    pub volume_type: String,
    #[serde(default)]
    pub emulation: String,
    #[serde(rename = "allocated_percent", default)]
    pub allocated_percent: i64,
    #[serde(rename = "cap_gb", default)]
    pub capacity_gb: f64,
    #[serde(rename = "cap_cyl", default)]
    pub capacity_cyl: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub reserved: bool,
    #[serde(rename = "volume_identifier", default)]
    pub volume_identifier: String,
    #[serde(default)]
    pub wwn: String,
    #[serde(rename = "num_of_storage_groups", default)]
    pub num_of_storage_groups: i64,
    #[serde(rename = "storageGroupId", default)]
    pub storage_group_id_list: Vec<String>,
    #[serde(rename = "snapvx_source", default)]
    pub snapvx_source: bool,
    #[serde(rename = "snapvx_target", default)]
    pub snapvx_target: bool,
}

/// Identifier choice used when naming volumes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VolumeIdentifierType {
    #[serde(rename = "volumeIdentifierChoice", skip_serializing_if = "String::is_empty", default)]
    pub volume_identifier_choice: String,
    #[serde(rename = "identifier_name", skip_serializing_if = "String::is_empty", default)]
    pub identifier_name: String,
}

impl VolumeIdentifierType {
    /// An `identifier_name` choice for the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            volume_identifier_choice: "identifier_name".to_string(),
            identifier_name: name.into(),
        }
    }
}

/// Size and identity attributes for new or resized volumes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VolumeAttributeType {
    #[serde(rename = "num_of_vols", skip_serializing_if = "Option::is_none")]
    pub num_of_vols: Option<u32>,
    #[serde(rename = "volumeIdentifier", skip_serializing_if = "Option::is_none")]
    pub volume_identifier: Option<VolumeIdentifierType>,
    #[serde(rename = "capacityUnit")]
    pub capacity_unit: String,
    #[serde(rename = "volume_size")]
    pub volume_size: String,
}

/// `PUT .../volume/{id}` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditVolumeParam {
    #[serde(rename = "editVolumeActionParam")]
    pub edit_volume_action_param: EditVolumeActionParam,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

/// Exactly one action is set per edit request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EditVolumeActionParam {
    #[serde(rename = "freeVolumeParam", skip_serializing_if = "Option::is_none")]
    pub free_volume_param: Option<FreeVolumeParam>,
    #[serde(
        rename = "modifyVolumeIdentifierParam",
        skip_serializing_if = "Option::is_none"
    )]
    pub modify_volume_identifier_param: Option<ModifyVolumeIdentifierParam>,
    #[serde(rename = "expandVolumeParam", skip_serializing_if = "Option::is_none")]
    pub expand_volume_param: Option<ExpandVolumeParam>,
}

/// Deallocate all tracks of a volume.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FreeVolumeParam {
    #[serde(rename = "free_volume")]
    pub free_volume: bool,
}

/// Rename a volume.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModifyVolumeIdentifierParam {
    #[serde(rename = "volumeIdentifier")]
    pub volume_identifier: VolumeIdentifierType,
}

/// Expand a volume to a new size.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExpandVolumeParam {
    #[serde(rename = "volumeAttribute")]
    pub volume_attribute: VolumeAttributeType,
}

//! Storage group resource and update payloads.

use serde::{Deserialize, Serialize};

use super::volume::VolumeAttributeType;

/// Execution mode for mutating requests.
///
/// Asynchronous requests answer with a job body instead of the mutated
/// resource; the caller polls the job to completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionOption {
    Synchronous,
    Asynchronous,
}

/// Optional caller-supplied request metadata, forwarded as HTTP headers.
///
/// Carried on the payload as a typed field and applied by the transport;
/// it never appears in the JSON body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestMetadata {
    headers: Vec<(String, String)>,
}

impl RequestMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header pair.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.push((name.into(), value.into()));
    }

    /// Iterate over the header pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// List of storage group ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorageGroupIdList {
    #[serde(rename = "storageGroupId", default)]
    pub storage_group_ids: Vec<String>,
}

/// Information about a storage group.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StorageGroup {
    #[serde(rename = "storageGroupId")]
    pub storage_group_id: String,
    #[serde(default)]
    pub slo: String,
    #[serde(default)]
    pub srp: String,
    #[serde(rename = "service_level", default)]
    pub service_level: String,
    #[serde(rename = "num_of_vols", default)]
    pub num_of_volumes: i64,
    #[serde(rename = "num_of_masking_views", default)]
    pub num_of_masking_views: i64,
    #[serde(rename = "cap_gb", default)]
    pub capacity_gb: f64,
    #[serde(rename = "type", default)]
    pub sg_type: String,
    #[serde(default)]
    pub unprotected: bool,
    #[serde(rename = "maskingview", default)]
    pub masking_views: Vec<String>,
}

/// Service-level parameters for storage group creation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SloBasedStorageGroupParam {
    #[serde(rename = "sloId", skip_serializing_if = "String::is_empty", default)]
    pub slo_id: String,
    #[serde(rename = "workloadSelection", skip_serializing_if = "String::is_empty", default)]
    pub workload_selection: String,
    #[serde(rename = "noCompression", default)]
    pub no_compression: bool,
    #[serde(rename = "volumeAttributes", default)]
    pub volume_attributes: Vec<VolumeAttributeType>,
}

/// `POST .../storagegroup` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateStorageGroupParam {
    #[serde(rename = "storageGroupId")]
    pub storage_group_id: String,
    #[serde(rename = "srpId")]
    pub srp_id: String,
    #[serde(default)]
    pub emulation: String,
    #[serde(
        rename = "sloBasedStorageGroupParam",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub slo_based_storage_group_param: Vec<SloBasedStorageGroupParam>,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

/// `PUT .../storagegroup/{id}` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateStorageGroupPayload {
    #[serde(rename = "editStorageGroupActionParam")]
    pub edit_storage_group_action_param: EditStorageGroupActionParam,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
    /// Optional request metadata; never serialized into the body.
    #[serde(skip)]
    pub metadata: Option<RequestMetadata>,
}

/// Exactly one action is set per update request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EditStorageGroupActionParam {
    #[serde(
        rename = "expandStorageGroupParam",
        skip_serializing_if = "Option::is_none"
    )]
    pub expand_storage_group_param: Option<ExpandStorageGroupParam>,
    #[serde(rename = "removeVolumeParam", skip_serializing_if = "Option::is_none")]
    pub remove_volume_param: Option<RemoveVolumeParam>,
}

/// Grow a storage group, either with new volumes or existing ones.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExpandStorageGroupParam {
    #[serde(rename = "addVolumeParam", skip_serializing_if = "Option::is_none")]
    pub add_volume_param: Option<AddVolumeParam>,
    #[serde(
        rename = "addSpecificVolumeParam",
        skip_serializing_if = "Option::is_none"
    )]
    pub add_specific_volume_param: Option<AddSpecificVolumeParam>,
}

/// Create new volumes directly in the storage group.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddVolumeParam {
    #[serde(rename = "create_new_volumes")]
    pub create_new_volumes: bool,
    #[serde(default)]
    pub emulation: String,
    #[serde(rename = "volumeAttributes", default)]
    pub volume_attributes: Vec<VolumeAttributeType>,
}

/// Add existing volumes, by id, to the storage group.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddSpecificVolumeParam {
    #[serde(rename = "volumeId", default)]
    pub volume_ids: Vec<String>,
    #[serde(default)]
    pub force: bool,
}

/// Remove volumes, by id, from the storage group.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RemoveVolumeParam {
    #[serde(rename = "volumeId", default)]
    pub volume_ids: Vec<String>,
    #[serde(default)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_option_wire_form() {
        assert_eq!(
            serde_json::to_string(&ExecutionOption::Asynchronous).unwrap(),
            "\"ASYNCHRONOUS\""
        );
        assert_eq!(
            serde_json::to_string(&ExecutionOption::Synchronous).unwrap(),
            "\"SYNCHRONOUS\""
        );
    }

    #[test]
    fn metadata_never_reaches_the_wire() {
        let mut metadata = RequestMetadata::new();
        metadata.insert("x-example-volume-name", "pv-1");
        let payload = UpdateStorageGroupPayload {
            edit_storage_group_action_param: EditStorageGroupActionParam::default(),
            execution_option: ExecutionOption::Asynchronous,
            metadata: Some(metadata),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.as_object().unwrap().get("metadata").is_none());
        assert_eq!(json["executionOption"], "ASYNCHRONOUS");
    }

    #[test]
    fn add_specific_volume_wire_shape() {
        let payload = UpdateStorageGroupPayload {
            edit_storage_group_action_param: EditStorageGroupActionParam {
                expand_storage_group_param: Some(ExpandStorageGroupParam {
                    add_specific_volume_param: Some(AddSpecificVolumeParam {
                        volume_ids: vec!["00001".to_string(), "00002".to_string()],
                        force: true,
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            },
            execution_option: ExecutionOption::Asynchronous,
            metadata: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        let add = &json["editStorageGroupActionParam"]["expandStorageGroupParam"]
            ["addSpecificVolumeParam"];
        assert_eq!(add["volumeId"][1], "00002");
        assert_eq!(add["force"], true);
    }
}

//! Masking view resource and payloads.

use serde::{Deserialize, Serialize};

/// List of masking view ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaskingViewList {
    #[serde(rename = "maskingViewId", default)]
    pub masking_view_ids: Vec<String>,
}

/// A masking view binding a storage group, a host or host group, and a
/// port group into one access-control unit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaskingView {
    #[serde(rename = "maskingViewId")]
    pub masking_view_id: String,
    #[serde(rename = "hostId", default, skip_serializing_if = "String::is_empty")]
    pub host_id: String,
    #[serde(rename = "hostGroupId", default, skip_serializing_if = "String::is_empty")]
    pub host_group_id: String,
    #[serde(rename = "portGroupId", default)]
    pub port_group_id: String,
    #[serde(rename = "storageGroupId", default)]
    pub storage_group_id: String,
}

/// `POST .../maskingview` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MaskingViewCreateParam {
    #[serde(rename = "maskingViewId")]
    pub masking_view_id: String,
    #[serde(rename = "hostOrHostGroupSelection")]
    pub host_or_host_group_selection: HostOrHostGroupSelection,
    #[serde(rename = "portGroupSelection")]
    pub port_group_selection: PortGroupSelection,
    #[serde(rename = "storageGroupSelection")]
    pub storage_group_selection: StorageGroupSelection,
}

/// Select an existing host or host group for a masking view.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HostOrHostGroupSelection {
    #[serde(rename = "useExistingHostParam", skip_serializing_if = "Option::is_none")]
    pub use_existing_host_param: Option<UseExistingHostParam>,
    #[serde(
        rename = "useExistingHostGroupParam",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_existing_host_group_param: Option<UseExistingHostGroupParam>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UseExistingHostParam {
    #[serde(rename = "hostId")]
    pub host_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UseExistingHostGroupParam {
    #[serde(rename = "hostGroupId")]
    pub host_group_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortGroupSelection {
    #[serde(rename = "useExistingPortGroupParam")]
    pub use_existing_port_group_param: UseExistingPortGroupParam,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UseExistingPortGroupParam {
    #[serde(rename = "portGroupId")]
    pub port_group_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageGroupSelection {
    #[serde(rename = "useExistingStorageGroupParam")]
    pub use_existing_storage_group_param: UseExistingStorageGroupParam,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UseExistingStorageGroupParam {
    #[serde(rename = "storageGroupId")]
    pub storage_group_id: String,
}

/// A single volume/initiator path through a masking view.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaskingViewConnection {
    #[serde(rename = "volumeId", default)]
    pub volume_id: String,
    #[serde(rename = "host_lun_address", default)]
    pub host_lun_address: String,
    #[serde(rename = "initiatorId", default)]
    pub initiator_id: String,
    #[serde(rename = "dir_port", default)]
    pub dir_port: String,
    #[serde(rename = "logged_in", default)]
    pub logged_in: bool,
}

/// Wrapper for the connections listing body.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MaskingViewConnectionsResult {
    #[serde(rename = "maskingViewConnection", default)]
    pub connections: Vec<MaskingViewConnection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_param_selects_host_not_host_group() {
        let param = MaskingViewCreateParam {
            masking_view_id: "csi-mv".to_string(),
            host_or_host_group_selection: HostOrHostGroupSelection {
                use_existing_host_param: Some(UseExistingHostParam {
                    host_id: "csi-host".to_string(),
                }),
                use_existing_host_group_param: None,
            },
            port_group_selection: PortGroupSelection {
                use_existing_port_group_param: UseExistingPortGroupParam {
                    port_group_id: "csi-pg".to_string(),
                },
            },
            storage_group_selection: StorageGroupSelection {
                use_existing_storage_group_param: UseExistingStorageGroupParam {
                    storage_group_id: "csi-sg".to_string(),
                },
            },
        };
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(
            json["hostOrHostGroupSelection"]["useExistingHostParam"]["hostId"],
            "csi-host"
        );
        assert!(
            json["hostOrHostGroupSelection"]
                .as_object()
                .unwrap()
                .get("useExistingHostGroupParam")
                .is_none()
        );
    }
}

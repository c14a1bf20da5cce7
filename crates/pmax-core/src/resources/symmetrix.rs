//! Symmetrix array resources.

use serde::{Deserialize, Serialize};

/// Response from `GET /univmax/restapi/version`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Version {
    pub version: String,
}

/// List of array ids known to this Unisphere instance.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SymmetrixIdList {
    #[serde(rename = "symmetrixId", default)]
    pub symmetrix_ids: Vec<String>,
}

/// Information about a Symmetrix array.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Symmetrix {
    #[serde(rename = "symmetrixId")]
    pub symmetrix_id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub ucode: String,
    #[serde(rename = "device_count", default)]
    pub device_count: i64,
    #[serde(default)]
    pub local: bool,
    #[serde(rename = "all_flash", default)]
    pub all_flash: bool,
    #[serde(rename = "display_name", default)]
    pub display_name: String,
    #[serde(rename = "disk_count", default)]
    pub disk_count: i64,
    #[serde(rename = "cache_size_mb", default)]
    pub cache_size_mb: i64,
}

/// List of storage resource pools on an array.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoragePoolList {
    #[serde(rename = "srpID", default)]
    pub storage_pool_ids: Vec<String>,
}

/// Information about a storage resource pool.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoragePool {
    #[serde(rename = "srpId")]
    pub storage_pool_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emulation: String,
    #[serde(rename = "reserved_cap_percent", default)]
    pub reserved_cap_percent: i64,
    #[serde(rename = "diskGroupId", default)]
    pub disk_group_ids: Vec<String>,
    #[serde(rename = "service_levels", default)]
    pub service_levels: Vec<String>,
}

//! Port group resource and payloads.

use serde::{Deserialize, Serialize};

use super::storage_group::ExecutionOption;

/// A director/port pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortKey {
    #[serde(rename = "directorId")]
    pub director_id: String,
    #[serde(rename = "portId")]
    pub port_id: String,
}

/// List of port group ids.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PortGroupList {
    #[serde(rename = "portGroupId", default)]
    pub port_group_ids: Vec<String>,
}

/// Information about a port group.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PortGroup {
    #[serde(rename = "portGroupId")]
    pub port_group_id: String,
    #[serde(rename = "symmetrixPortKey", default)]
    pub symmetrix_port_key: Vec<PortKey>,
    #[serde(rename = "num_of_ports", default)]
    pub num_of_ports: i64,
    #[serde(rename = "number_of_masking_views", default)]
    pub num_of_masking_views: i64,
    #[serde(rename = "type", default)]
    pub port_group_type: String,
    #[serde(rename = "maskingview", default)]
    pub masking_views: Vec<String>,
}

/// `POST .../portgroup` payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatePortGroupParams {
    #[serde(rename = "portGroupId")]
    pub port_group_id: String,
    #[serde(rename = "symmetrixPortKey", default)]
    pub symmetrix_port_key: Vec<PortKey>,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

/// `PUT .../portgroup/{id}` payload, replacing the port membership.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditPortGroupParam {
    #[serde(rename = "editPortGroupActionParam")]
    pub edit_port_group_action_param: EditPortGroupActionParam,
    #[serde(rename = "executionOption")]
    pub execution_option: ExecutionOption,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EditPortGroupActionParam {
    #[serde(rename = "addPortParam", skip_serializing_if = "Option::is_none")]
    pub add_port_param: Option<ChangePortParam>,
    #[serde(rename = "removePortParam", skip_serializing_if = "Option::is_none")]
    pub remove_port_param: Option<ChangePortParam>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ChangePortParam {
    #[serde(rename = "port", default)]
    pub ports: Vec<PortKey>,
}

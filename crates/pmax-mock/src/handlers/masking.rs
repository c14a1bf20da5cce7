//! Port group and masking view endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use pmax_core::resources::masking_view::{
    MaskingView, MaskingViewConnection, MaskingViewConnectionsResult, MaskingViewCreateParam,
    MaskingViewList,
};
use pmax_core::resources::port_group::{
    CreatePortGroupParams, EditPortGroupParam, PortGroup, PortGroupList,
};

use crate::error::{MockError, MockResult};
use crate::store::MockArray;

#[derive(Debug, Deserialize)]
pub struct PortGroupListQuery {
    #[serde(rename = "type")]
    port_group_type: Option<String>,
}

/// GET .../portgroup
pub async fn list_port_groups(
    State(array): State<MockArray>,
    Query(query): Query<PortGroupListQuery>,
) -> Json<PortGroupList> {
    let data = array.read();
    let mut ids: Vec<String> = data
        .port_groups
        .values()
        .filter(|pg| match &query.port_group_type {
            Some(pg_type) => pg.port_group_type == *pg_type,
            None => true,
        })
        .map(|pg| pg.port_group_id.clone())
        .collect();
    ids.sort();
    Json(PortGroupList { port_group_ids: ids })
}

/// GET .../portgroup/{pgId}
pub async fn get_port_group(
    State(array): State<MockArray>,
    Path((_version, _sym_id, pg_id)): Path<(String, String, String)>,
) -> MockResult<Json<PortGroup>> {
    let data = array.read();
    data.port_groups
        .get(&pg_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Port Group not found: {pg_id}")))
}

/// POST .../portgroup
pub async fn create_port_group(
    State(array): State<MockArray>,
    Path((_version, _sym_id)): Path<(String, String)>,
    Json(payload): Json<CreatePortGroupParams>,
) -> MockResult<Json<PortGroup>> {
    let mut data = array.write();
    if data.port_groups.contains_key(&payload.port_group_id) {
        return Err(MockError::Conflict(
            "The requested port group resource already exists".to_string(),
        ));
    }
    let group = PortGroup {
        port_group_id: payload.port_group_id.clone(),
        num_of_ports: payload.symmetrix_port_key.len() as i64,
        symmetrix_port_key: payload.symmetrix_port_key,
        port_group_type: "Fibre".to_string(),
        ..Default::default()
    };
    data.port_groups
        .insert(payload.port_group_id.clone(), group.clone());
    Ok(Json(group))
}

/// PUT .../portgroup/{pgId}
pub async fn update_port_group(
    State(array): State<MockArray>,
    Path((_version, _sym_id, pg_id)): Path<(String, String, String)>,
    Json(payload): Json<EditPortGroupParam>,
) -> MockResult<Json<PortGroup>> {
    let mut data = array.write();
    let group = data
        .port_groups
        .get_mut(&pg_id)
        .ok_or_else(|| MockError::NotFound(format!("Port Group not found: {pg_id}")))?;

    let action = payload.edit_port_group_action_param;
    if let Some(add) = action.add_port_param {
        for port in add.ports {
            if !group.symmetrix_port_key.contains(&port) {
                group.symmetrix_port_key.push(port);
            }
        }
    } else if let Some(remove) = action.remove_port_param {
        group
            .symmetrix_port_key
            .retain(|port| !remove.ports.contains(port));
    } else {
        return Err(MockError::BadRequest(
            "no edit action in PUT PortGroup payload".to_string(),
        ));
    }
    group.num_of_ports = group.symmetrix_port_key.len() as i64;
    Ok(Json(group.clone()))
}

/// DELETE .../portgroup/{pgId}
pub async fn delete_port_group(
    State(array): State<MockArray>,
    Path((_version, _sym_id, pg_id)): Path<(String, String, String)>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    if data.port_groups.remove(&pg_id).is_none() {
        return Err(MockError::NotFound(format!("Port Group not found: {pg_id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET .../maskingview
pub async fn list_masking_views(State(array): State<MockArray>) -> Json<MaskingViewList> {
    let data = array.read();
    let mut ids: Vec<String> = data.masking_views.keys().cloned().collect();
    ids.sort();
    Json(MaskingViewList {
        masking_view_ids: ids,
    })
}

/// GET .../maskingview/{mvId}
pub async fn get_masking_view(
    State(array): State<MockArray>,
    Path((_version, _sym_id, mv_id)): Path<(String, String, String)>,
) -> MockResult<Json<MaskingView>> {
    let data = array.read();
    data.masking_views
        .get(&mv_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Masking View not found: {mv_id}")))
}

/// POST .../maskingview
///
/// All three referenced resources must exist before the view can bind
/// them.
pub async fn create_masking_view(
    State(array): State<MockArray>,
    Path((_version, _sym_id)): Path<(String, String)>,
    Json(payload): Json<MaskingViewCreateParam>,
) -> MockResult<Json<MaskingView>> {
    let mut data = array.write();
    if data.masking_views.contains_key(&payload.masking_view_id) {
        return Err(MockError::Conflict(
            "The requested masking view resource already exists".to_string(),
        ));
    }

    let sg_id = payload
        .storage_group_selection
        .use_existing_storage_group_param
        .storage_group_id;
    if !data.storage_groups.contains_key(&sg_id) {
        return Err(MockError::NotFound(
            "Storage Group on Symmetrix cannot be found".to_string(),
        ));
    }
    let pg_id = payload
        .port_group_selection
        .use_existing_port_group_param
        .port_group_id;
    if !data.port_groups.contains_key(&pg_id) {
        return Err(MockError::NotFound(
            "Port Group on Symmetrix cannot be found".to_string(),
        ));
    }

    let selection = payload.host_or_host_group_selection;
    let (host_id, host_group_id) = match (
        selection.use_existing_host_param,
        selection.use_existing_host_group_param,
    ) {
        (Some(host), None) => {
            if !data.hosts.contains_key(&host.host_id) {
                return Err(MockError::NotFound(
                    "Initiator Group on Symmetrix cannot be found".to_string(),
                ));
            }
            (host.host_id, String::new())
        }
        (None, Some(group)) => (String::new(), group.host_group_id),
        _ => {
            return Err(MockError::BadRequest(
                "exactly one of host or host group must be selected".to_string(),
            ));
        }
    };

    let view = MaskingView {
        masking_view_id: payload.masking_view_id.clone(),
        host_id: host_id.clone(),
        host_group_id,
        port_group_id: pg_id.clone(),
        storage_group_id: sg_id.clone(),
    };
    data.masking_views
        .insert(payload.masking_view_id.clone(), view.clone());

    if let Some(group) = data.storage_groups.get_mut(&sg_id) {
        group.masking_views.push(payload.masking_view_id.clone());
        group.num_of_masking_views += 1;
    }
    if let Some(group) = data.port_groups.get_mut(&pg_id) {
        group.masking_views.push(payload.masking_view_id.clone());
        group.num_of_masking_views += 1;
    }
    if let Some(host) = data.hosts.get_mut(&host_id) {
        host.masking_view_ids.push(payload.masking_view_id.clone());
        host.num_of_masking_views += 1;
    }

    Ok(Json(view))
}

/// DELETE .../maskingview/{mvId}
pub async fn delete_masking_view(
    State(array): State<MockArray>,
    Path((_version, _sym_id, mv_id)): Path<(String, String, String)>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    let view = data
        .masking_views
        .remove(&mv_id)
        .ok_or_else(|| MockError::NotFound(format!("Masking View not found: {mv_id}")))?;

    if let Some(group) = data.storage_groups.get_mut(&view.storage_group_id) {
        group.masking_views.retain(|id| id != &mv_id);
        group.num_of_masking_views -= 1;
    }
    if let Some(group) = data.port_groups.get_mut(&view.port_group_id) {
        group.masking_views.retain(|id| id != &mv_id);
        group.num_of_masking_views -= 1;
    }
    if let Some(host) = data.hosts.get_mut(&view.host_id) {
        host.masking_view_ids.retain(|id| id != &mv_id);
        host.num_of_masking_views -= 1;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct ConnectionsQuery {
    volume_id: Option<String>,
}

/// GET .../maskingview/{mvId}/connections
///
/// Synthesizes one connection per volume/initiator path through the
/// view's storage group and host.
pub async fn get_masking_view_connections(
    State(array): State<MockArray>,
    Path((_version, _sym_id, mv_id)): Path<(String, String, String)>,
    Query(query): Query<ConnectionsQuery>,
) -> MockResult<Json<MaskingViewConnectionsResult>> {
    let data = array.read();
    let view = data
        .masking_views
        .get(&mv_id)
        .ok_or_else(|| MockError::NotFound(format!("Masking View not found: {mv_id}")))?;

    let initiators: Vec<String> = data
        .hosts
        .get(&view.host_id)
        .map(|host| host.initiators.clone())
        .unwrap_or_default();

    let mut volume_ids: Vec<String> = data
        .volumes
        .values()
        .filter(|vol| {
            vol.storage_group_id_list
                .iter()
                .any(|sg| sg == &view.storage_group_id)
        })
        .filter(|vol| match &query.volume_id {
            Some(wanted) => vol.volume_id == *wanted,
            None => true,
        })
        .map(|vol| vol.volume_id.clone())
        .collect();
    volume_ids.sort();

    let mut connections = Vec::new();
    for (lun, volume_id) in volume_ids.iter().enumerate() {
        for initiator_id in &initiators {
            connections.push(MaskingViewConnection {
                volume_id: volume_id.clone(),
                host_lun_address: format!("{:04x}", lun),
                initiator_id: initiator_id.clone(),
                dir_port: "FA-1D:4".to_string(),
                logged_in: true,
            });
        }
    }
    Ok(Json(MaskingViewConnectionsResult { connections }))
}

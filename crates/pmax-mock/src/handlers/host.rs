//! Host and initiator endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use pmax_core::resources::host::{CreateHostParam, Host, HostList, UpdateHostParam};
use pmax_core::resources::initiator::{Initiator, InitiatorList};

use crate::error::{MockError, MockResult};
use crate::store::MockArray;

/// GET .../host
pub async fn list_hosts(State(array): State<MockArray>) -> Json<HostList> {
    let data = array.read();
    let mut ids: Vec<String> = data.hosts.keys().cloned().collect();
    ids.sort();
    Json(HostList { host_ids: ids })
}

/// GET .../host/{hostId}
pub async fn get_host(
    State(array): State<MockArray>,
    Path((_version, _sym_id, host_id)): Path<(String, String, String)>,
) -> MockResult<Json<Host>> {
    let data = array.read();
    data.hosts
        .get(&host_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Host not found: {host_id}")))
}

/// POST .../host
pub async fn create_host(
    State(array): State<MockArray>,
    Path((_version, _sym_id)): Path<(String, String)>,
    Json(payload): Json<CreateHostParam>,
) -> MockResult<Json<Host>> {
    let mut data = array.write();
    if data.hosts.contains_key(&payload.host_id) {
        return Err(MockError::Conflict(
            "The requested host resource already exists".to_string(),
        ));
    }
    // An initiator cannot be a member of more than one host.
    for initiator_id in &payload.initiator_ids {
        if let Some(init) = data.initiators.get(initiator_id) {
            if !init.host_id.is_empty() {
                return Err(MockError::Conflict(format!(
                    "initiator already assigned to a host: {initiator_id}"
                )));
            }
        }
    }

    let host = Host {
        host_id: payload.host_id.clone(),
        num_of_initiators: payload.initiator_ids.len() as i64,
        host_type: "Fibre".to_string(),
        initiators: payload.initiator_ids.clone(),
        ..Default::default()
    };
    for initiator_id in &payload.initiator_ids {
        if let Some(init) = data.initiators.get_mut(initiator_id) {
            init.host_id = payload.host_id.clone();
            init.host = payload.host_id.clone();
        }
    }
    data.hosts.insert(payload.host_id.clone(), host.clone());
    Ok(Json(host))
}

/// PUT .../host/{hostId}
pub async fn update_host(
    State(array): State<MockArray>,
    Path((_version, _sym_id, host_id)): Path<(String, String, String)>,
    Json(payload): Json<UpdateHostParam>,
) -> MockResult<Json<Host>> {
    let mut data = array.write();
    if !data.hosts.contains_key(&host_id) {
        return Err(MockError::NotFound(format!("Host not found: {host_id}")));
    }

    let action = payload.edit_host_action_param;
    if let Some(add) = action.add_initiator_param {
        for initiator_id in add.initiators {
            if let Some(init) = data.initiators.get_mut(&initiator_id) {
                init.host_id = host_id.clone();
                init.host = host_id.clone();
            }
            let host = data.hosts.get_mut(&host_id).expect("checked above");
            if !host.initiators.contains(&initiator_id) {
                host.initiators.push(initiator_id);
                host.num_of_initiators += 1;
            }
        }
    } else if let Some(remove) = action.remove_initiator_param {
        for initiator_id in remove.initiators {
            if let Some(init) = data.initiators.get_mut(&initiator_id) {
                init.host_id.clear();
                init.host.clear();
            }
            let host = data.hosts.get_mut(&host_id).expect("checked above");
            let before = host.initiators.len();
            host.initiators.retain(|id| id != &initiator_id);
            if host.initiators.len() < before {
                host.num_of_initiators -= 1;
            }
        }
    } else {
        return Err(MockError::BadRequest(
            "no edit action in PUT Host payload".to_string(),
        ));
    }

    let host = data.hosts.get(&host_id).expect("checked above").clone();
    Ok(Json(host))
}

/// DELETE .../host/{hostId}
pub async fn delete_host(
    State(array): State<MockArray>,
    Path((_version, _sym_id, host_id)): Path<(String, String, String)>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    let host = data
        .hosts
        .remove(&host_id)
        .ok_or_else(|| MockError::NotFound(format!("Host not found: {host_id}")))?;
    for initiator_id in &host.initiators {
        if let Some(init) = data.initiators.get_mut(initiator_id) {
            init.host_id.clear();
            init.host.clear();
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct InitiatorListQuery {
    initiator_hba: Option<String>,
    iscsi: Option<bool>,
    in_a_host: Option<bool>,
}

/// GET .../initiator
pub async fn list_initiators(
    State(array): State<MockArray>,
    Query(query): Query<InitiatorListQuery>,
) -> Json<InitiatorList> {
    let data = array.read();
    let mut ids: Vec<String> = data
        .initiators
        .values()
        .filter(|init| match &query.initiator_hba {
            Some(hba) => init.initiator_id.contains(hba.as_str()),
            None => true,
        })
        .filter(|init| match query.iscsi {
            Some(true) => init.initiator_type == "iSCSI",
            Some(false) => init.initiator_type != "iSCSI",
            None => true,
        })
        .filter(|init| match query.in_a_host {
            Some(true) => !init.host_id.is_empty(),
            Some(false) => init.host_id.is_empty(),
            None => true,
        })
        .map(|init| init.initiator_id.clone())
        .collect();
    ids.sort();
    Json(InitiatorList { initiator_ids: ids })
}

/// GET .../initiator/{initId}
pub async fn get_initiator(
    State(array): State<MockArray>,
    Path((_version, _sym_id, initiator_id)): Path<(String, String, String)>,
) -> MockResult<Json<Initiator>> {
    let data = array.read();
    data.initiators
        .get(&initiator_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Initiator not found: {initiator_id}")))
}

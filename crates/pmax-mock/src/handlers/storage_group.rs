//! Storage group endpoints, including the asynchronous update actions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use pmax_core::resources::storage_group::{
    AddSpecificVolumeParam, AddVolumeParam, CreateStorageGroupParam, RemoveVolumeParam,
    StorageGroup, StorageGroupIdList, UpdateStorageGroupPayload,
};

use crate::error::{MockError, MockResult};
use crate::store::{ArrayData, DEFAULT_SRP_ID, MockArray};

/// GET .../storagegroup
pub async fn list_storage_groups(State(array): State<MockArray>) -> Json<StorageGroupIdList> {
    let data = array.read();
    let mut ids: Vec<String> = data.storage_groups.keys().cloned().collect();
    ids.sort();
    Json(StorageGroupIdList {
        storage_group_ids: ids,
    })
}

/// GET .../storagegroup/{sgId}
pub async fn get_storage_group(
    State(array): State<MockArray>,
    Path((_version, _sym_id, sg_id)): Path<(String, String, String)>,
) -> MockResult<Json<StorageGroup>> {
    let data = array.read();
    if data.induced.get_storage_group_error {
        return Err(MockError::Induced(
            "Error retrieving Storage Group(s): induced error".to_string(),
        ));
    }
    data.storage_groups
        .get(&sg_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Storage Group not found: {sg_id}")))
}

/// POST .../storagegroup
pub async fn create_storage_group(
    State(array): State<MockArray>,
    Path((_version, _sym_id)): Path<(String, String)>,
    Json(payload): Json<CreateStorageGroupParam>,
) -> MockResult<Json<StorageGroup>> {
    let mut data = array.write();
    if data.storage_groups.contains_key(&payload.storage_group_id) {
        return Err(MockError::Conflict(
            "The requested storage group resource already exists".to_string(),
        ));
    }
    let service_level = payload
        .slo_based_storage_group_param
        .first()
        .map(|slo| slo.slo_id.clone())
        .unwrap_or_default();
    let srp = if payload.srp_id.is_empty() {
        DEFAULT_SRP_ID.to_string()
    } else {
        payload.srp_id.clone()
    };
    let group = StorageGroup {
        storage_group_id: payload.storage_group_id.clone(),
        slo: service_level.clone(),
        service_level,
        srp,
        sg_type: "Standalone".to_string(),
        unprotected: true,
        ..Default::default()
    };
    data.storage_groups
        .insert(payload.storage_group_id.clone(), group.clone());
    Ok(Json(group))
}

/// PUT .../storagegroup/{sgId}
///
/// Dispatches on the single edit action in the payload. Volume-adding
/// actions are asynchronous: the mutation is applied to the store and a
/// flip-flop job is answered with 202. Volume removal is synchronous and
/// answers the updated group.
pub async fn update_storage_group(
    State(array): State<MockArray>,
    Path((_version, sym_id, sg_id)): Path<(String, String, String)>,
    Json(payload): Json<UpdateStorageGroupPayload>,
) -> MockResult<Response> {
    let mut data = array.write();
    if data.induced.update_storage_group_error {
        return Err(MockError::Induced(
            "Error updating Storage Group: induced error".to_string(),
        ));
    }
    if !data.storage_groups.contains_key(&sg_id) {
        return Err(MockError::NotFound(format!(
            "Storage Group not found: {sg_id}"
        )));
    }

    let action = payload.edit_storage_group_action_param;
    if let Some(expand) = action.expand_storage_group_param {
        if let Some(add) = expand.add_volume_param {
            return add_new_volumes(&mut data, &sym_id, &sg_id, add);
        }
        if let Some(add) = expand.add_specific_volume_param {
            return add_specific_volumes(&mut data, &sym_id, &sg_id, add);
        }
    }
    if let Some(remove) = action.remove_volume_param {
        return remove_volumes(&mut data, &sg_id, remove);
    }

    Err(MockError::BadRequest(
        "no edit action in PUT StorageGroup payload".to_string(),
    ))
}

fn add_new_volumes(
    data: &mut ArrayData,
    sym_id: &str,
    sg_id: &str,
    add: AddVolumeParam,
) -> MockResult<Response> {
    let attributes = add
        .volume_attributes
        .first()
        .ok_or_else(|| MockError::BadRequest("missing volumeAttributes".to_string()))?;
    let name = attributes
        .volume_identifier
        .as_ref()
        .map(|ident| ident.identifier_name.clone())
        .unwrap_or_default();
    let size: u64 = attributes
        .volume_size
        .parse()
        .map_err(|_| MockError::BadRequest("unable to parse volume_size".to_string()))?;
    if name.is_empty() {
        return Err(MockError::BadRequest("null name or size".to_string()));
    }

    if !data.induced.volume_not_created {
        let volume_id = data.next_volume_id();
        data.insert_volume(&volume_id, &name, size, &[sg_id.to_string()]);
    }

    let link = format!("sloprovisioning/symmetrix/{sym_id}/storagegroup/{sg_id}");
    let job = data.new_job(&link);
    Ok((StatusCode::ACCEPTED, Json(job)).into_response())
}

fn add_specific_volumes(
    data: &mut ArrayData,
    sym_id: &str,
    sg_id: &str,
    add: AddSpecificVolumeParam,
) -> MockResult<Response> {
    for volume_id in &add.volume_ids {
        let volume = data
            .volumes
            .get_mut(volume_id)
            .ok_or_else(|| MockError::NotFound(format!("Volume not found: {volume_id}")))?;
        if !volume.storage_group_id_list.iter().any(|sg| sg == sg_id) {
            volume.storage_group_id_list.push(sg_id.to_string());
            volume.num_of_storage_groups += 1;
            if let Some(group) = data.storage_groups.get_mut(sg_id) {
                group.num_of_volumes += 1;
            }
        }
    }

    let link = format!("sloprovisioning/symmetrix/{sym_id}/storagegroup/{sg_id}");
    let job = data.new_job(&link);
    Ok((StatusCode::ACCEPTED, Json(job)).into_response())
}

fn remove_volumes(
    data: &mut ArrayData,
    sg_id: &str,
    remove: RemoveVolumeParam,
) -> MockResult<Response> {
    for volume_id in &remove.volume_ids {
        let volume = data
            .volumes
            .get_mut(volume_id)
            .ok_or_else(|| MockError::NotFound(format!("Volume not found: {volume_id}")))?;
        let before = volume.storage_group_id_list.len();
        volume.storage_group_id_list.retain(|sg| sg != sg_id);
        if volume.storage_group_id_list.len() < before {
            volume.num_of_storage_groups -= 1;
            if let Some(group) = data.storage_groups.get_mut(sg_id) {
                group.num_of_volumes -= 1;
            }
        }
    }

    let group = data
        .storage_groups
        .get(sg_id)
        .cloned()
        .ok_or_else(|| MockError::NotFound(format!("Storage Group not found: {sg_id}")))?;
    Ok(Json(group).into_response())
}

/// DELETE .../storagegroup/{sgId}
pub async fn delete_storage_group(
    State(array): State<MockArray>,
    Path((_version, _sym_id, sg_id)): Path<(String, String, String)>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    if data.storage_groups.remove(&sg_id).is_none() {
        return Err(MockError::NotFound(format!(
            "Storage Group not found: {sg_id}"
        )));
    }
    for volume in data.volumes.values_mut() {
        let before = volume.storage_group_id_list.len();
        volume.storage_group_id_list.retain(|sg| sg != &sg_id);
        if volume.storage_group_id_list.len() < before {
            volume.num_of_storage_groups -= 1;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

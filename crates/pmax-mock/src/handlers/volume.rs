//! Volume endpoints, including iterator creation for listings.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;

use pmax_core::resources::iterator::{VolumeIdEntry, VolumeResultList};
use pmax_core::resources::volume::{EditVolumeParam, Volume};
use pmax_core::resources::storage_group::ExecutionOption;
use pmax_core::{Job, VolumeIterator};

use crate::error::{MockError, MockResult};
use crate::store::{ITERATOR_PAGE_SIZE, MockArray};

#[derive(Debug, Deserialize)]
pub struct VolumeListQuery {
    volume_identifier: Option<String>,
    #[serde(rename = "storageGroupId")]
    storage_group_id: Option<String>,
}

/// GET .../volume
///
/// Answers a volume iterator with the first page inline. The matching
/// volume ids are snapshotted into per-iterator server state which the
/// page endpoint serves until the iterator is deleted.
pub async fn list_volumes(
    State(array): State<MockArray>,
    Path((_version, _sym_id)): Path<(String, String)>,
    Query(query): Query<VolumeListQuery>,
) -> MockResult<Json<VolumeIterator>> {
    let mut data = array.write();
    if data.induced.get_volume_iterator_error {
        return Err(MockError::Induced(
            "Error getting VolumeIterator: induced error".to_string(),
        ));
    }

    // The <like> prefix turns the identifier filter into a substring match.
    let (identifier, like) = match query.volume_identifier.as_deref() {
        Some(raw) => match raw.strip_prefix("<like>") {
            Some(rest) => (Some(rest.to_string()), true),
            None => (Some(raw.to_string()), false),
        },
        None => (None, false),
    };

    let matching: Vec<String> = data
        .volumes
        .values()
        .filter(|vol| match &identifier {
            Some(ident) if like => vol.volume_identifier.contains(ident.as_str()),
            Some(ident) => vol.volume_identifier == *ident,
            None => true,
        })
        .filter(|vol| match &query.storage_group_id {
            Some(sg_id) => vol.storage_group_id_list.iter().any(|sg| sg == sg_id),
            None => true,
        })
        .map(|vol| vol.volume_id.clone())
        .collect();

    let (iterator_id, ids) = data.new_iterator(matching);
    let count = ids.len() as u32 + data.induced.iterator_count_surplus;
    let first_page = ids.len().min(ITERATOR_PAGE_SIZE as usize);

    Ok(Json(VolumeIterator {
        id: iterator_id,
        count,
        max_page_size: ITERATOR_PAGE_SIZE,
        expiration_time: (Utc::now().timestamp_millis()) + 180_000,
        result_list: VolumeResultList {
            from: 1,
            to: first_page as u32,
            volumes: ids[..first_page]
                .iter()
                .map(|volume_id| VolumeIdEntry {
                    volume_id: volume_id.clone(),
                })
                .collect(),
        },
    }))
}

/// GET .../volume/{volId}
pub async fn get_volume(
    State(array): State<MockArray>,
    Path((_version, _sym_id, vol_id)): Path<(String, String, String)>,
) -> MockResult<Json<Volume>> {
    let data = array.read();
    if data.induced.get_volume_error {
        return Err(MockError::Induced(
            "Error retrieving Volume: induced error".to_string(),
        ));
    }
    data.volumes
        .get(&vol_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Volume not found: {vol_id}")))
}

/// PUT .../volume/{volId}
///
/// Dispatches on the single edit action present in the payload. Free is
/// an asynchronous action and answers with a job; rename and expand are
/// synchronous and answer with the updated volume.
pub async fn edit_volume(
    State(array): State<MockArray>,
    Path((_version, sym_id, vol_id)): Path<(String, String, String)>,
    Json(payload): Json<EditVolumeParam>,
) -> MockResult<axum::response::Response> {
    use axum::response::IntoResponse;

    let mut data = array.write();
    if !data.volumes.contains_key(&vol_id) {
        return Err(MockError::NotFound(format!("Volume not found: {vol_id}")));
    }

    let action = payload.edit_volume_action_param;
    if action.free_volume_param.is_some() {
        if payload.execution_option != ExecutionOption::Asynchronous {
            return Err(MockError::BadRequest(
                "free volume requires asynchronous execution".to_string(),
            ));
        }
        let link = format!("sloprovisioning/symmetrix/{sym_id}/volume/{vol_id}");
        let job: Job = data.new_job(&link);
        return Ok((StatusCode::ACCEPTED, Json(job)).into_response());
    }

    if let Some(rename) = action.modify_volume_identifier_param {
        let volume = data.volumes.get_mut(&vol_id).expect("checked above");
        volume.volume_identifier = rename.volume_identifier.identifier_name;
        return Ok(Json(volume.clone()).into_response());
    }

    if let Some(expand) = action.expand_volume_param {
        let new_size: u64 = expand
            .volume_attribute
            .volume_size
            .parse()
            .map_err(|_| MockError::BadRequest("bad volume_size".to_string()))?;
        let volume = data.volumes.get_mut(&vol_id).expect("checked above");
        if new_size < volume.capacity_cyl {
            return Err(MockError::BadRequest(
                "volumes cannot shrink".to_string(),
            ));
        }
        volume.capacity_cyl = new_size;
        volume.capacity_gb = new_size as f64 / 1092.0;
        return Ok(Json(volume.clone()).into_response());
    }

    Err(MockError::BadRequest(
        "no edit action in PUT Volume payload".to_string(),
    ))
}

/// DELETE .../volume/{volId}
pub async fn delete_volume(
    State(array): State<MockArray>,
    Path((_version, _sym_id, vol_id)): Path<(String, String, String)>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    let volume = data
        .volumes
        .get(&vol_id)
        .ok_or_else(|| MockError::NotFound(format!("Volume not found: {vol_id}")))?;
    if !volume.storage_group_id_list.is_empty() {
        return Err(MockError::Conflict(
            "device is a member of a storage group".to_string(),
        ));
    }
    data.volumes.remove(&vol_id);
    Ok(StatusCode::NO_CONTENT)
}

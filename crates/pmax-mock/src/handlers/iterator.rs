//! Iterator page and release endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use pmax_core::resources::iterator::{VolumeIdEntry, VolumeResultList};

use crate::error::{MockError, MockResult};
use crate::store::MockArray;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    from: u32,
    to: u32,
}

/// GET /univmax/restapi/common/Iterator/{iterId}/page?from=&to=
///
/// Serves the requested offset range, 1-based inclusive, from the
/// iterator's snapshot. Ranges reaching past the snapshot are truncated
/// to the elements that exist — a desynced declared count shows up as a
/// short final page, exactly like a real stale cursor.
pub async fn get_page(
    State(array): State<MockArray>,
    Path(iter_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> MockResult<Json<VolumeResultList>> {
    if query.from == 0 {
        return Err(MockError::BadRequest("bad from query parameter".to_string()));
    }
    let data = array.read();
    let ids = data
        .iterators
        .get(&iter_id)
        .ok_or_else(|| MockError::NotFound(format!("Iterator not found: {iter_id}")))?;

    let from = query.from as usize;
    let to = (query.to as usize).min(ids.len());
    let volumes: Vec<VolumeIdEntry> = if from <= to {
        ids[from - 1..to]
            .iter()
            .map(|volume_id| VolumeIdEntry {
                volume_id: volume_id.clone(),
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Json(VolumeResultList {
        from: query.from,
        to: to as u32,
        volumes,
    }))
}

/// DELETE /univmax/restapi/common/Iterator/{iterId}
pub async fn delete_iterator(
    State(array): State<MockArray>,
    Path(iter_id): Path<String>,
) -> StatusCode {
    let mut data = array.write();
    if data.iterators.remove(&iter_id).is_some() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

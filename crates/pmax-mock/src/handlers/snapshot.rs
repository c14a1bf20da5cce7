//! SnapVX snapshot endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;

use pmax_core::resources::snapshot::{
    CreateVolumesSnapshot, DeleteVolumeSnapshot, ModifyVolumeSnapshot, SNAPSHOT_ACTION_LINK,
    SNAPSHOT_ACTION_RENAME, SNAPSHOT_ACTION_UNLINK, SnapshotVolumeGeneration,
    VolumeSnapshotSource,
};

use crate::error::{MockError, MockResult};
use crate::store::MockArray;

/// GET .../replication/.../volume/{volId}/snapshot
pub async fn get_volume_snap_info(
    State(array): State<MockArray>,
    Path((_version, _sym_id, vol_id)): Path<(String, String, String)>,
) -> MockResult<Json<SnapshotVolumeGeneration>> {
    let data = array.read();
    if !data.volumes.contains_key(&vol_id) {
        return Err(MockError::NotFound(format!("Volume not found: {vol_id}")));
    }
    let snapshot_srcs = data.snapshots.get(&vol_id).cloned().unwrap_or_default();
    Ok(Json(SnapshotVolumeGeneration {
        device_name: vol_id,
        snapshot_srcs,
        snapshot_links: Vec::new(),
    }))
}

/// GET .../replication/.../volume/{volId}/snapshot/{snapName}
pub async fn get_snapshot_info(
    State(array): State<MockArray>,
    Path((_version, _sym_id, vol_id, snap_name)): Path<(String, String, String, String)>,
) -> MockResult<Json<VolumeSnapshotSource>> {
    let data = array.read();
    data.snapshots
        .get(&vol_id)
        .and_then(|snaps| snaps.iter().find(|s| s.snapshot_name == snap_name))
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Snapshot not found: {snap_name}")))
}

/// POST .../replication/.../snapshot/{snapName}
pub async fn create_snapshot(
    State(array): State<MockArray>,
    Path((_version, _sym_id, snap_name)): Path<(String, String, String)>,
    Json(payload): Json<CreateVolumesSnapshot>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    for source in &payload.source_volume_list {
        if !data.volumes.contains_key(&source.name) {
            return Err(MockError::NotFound(format!(
                "Volume not found: {}",
                source.name
            )));
        }
    }
    for source in &payload.source_volume_list {
        let snaps = data.snapshots.entry(source.name.clone()).or_default();
        let generation = snaps
            .iter()
            .filter(|s| s.snapshot_name == snap_name)
            .count() as i64;
        snaps.push(VolumeSnapshotSource {
            snapshot_name: snap_name.clone(),
            generation,
            timestamp: Utc::now().to_rfc3339(),
            state: "Established".to_string(),
            expired: false,
        });
        if let Some(volume) = data.volumes.get_mut(&source.name) {
            volume.snapvx_source = true;
        }
    }
    Ok(StatusCode::CREATED)
}

/// PUT .../replication/.../snapshot/{snapName}
pub async fn modify_snapshot(
    State(array): State<MockArray>,
    Path((_version, _sym_id, snap_name)): Path<(String, String, String)>,
    Json(payload): Json<ModifyVolumeSnapshot>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    match payload.action.as_str() {
        SNAPSHOT_ACTION_RENAME => {
            let new_name = payload
                .new_snapshot_name
                .ok_or_else(|| MockError::BadRequest("missing newSnapshotName".to_string()))?;
            for source in &payload.volume_name_list_source {
                let snaps = data.snapshots.get_mut(&source.name).ok_or_else(|| {
                    MockError::NotFound(format!("Volume not found: {}", source.name))
                })?;
                for snap in snaps.iter_mut().filter(|s| s.snapshot_name == snap_name) {
                    snap.snapshot_name = new_name.clone();
                }
            }
            Ok(StatusCode::OK)
        }
        SNAPSHOT_ACTION_LINK | SNAPSHOT_ACTION_UNLINK => {
            let linked = payload.action == SNAPSHOT_ACTION_LINK;
            for source in &payload.volume_name_list_source {
                let snaps = data.snapshots.get_mut(&source.name).ok_or_else(|| {
                    MockError::NotFound(format!("Volume not found: {}", source.name))
                })?;
                for snap in snaps.iter_mut().filter(|s| s.snapshot_name == snap_name) {
                    snap.state = if linked { "Linked" } else { "Established" }.to_string();
                }
            }
            Ok(StatusCode::OK)
        }
        other => Err(MockError::BadRequest(format!(
            "unsupported snapshot action: {other}"
        ))),
    }
}

/// DELETE .../replication/.../snapshot/{snapName}
pub async fn delete_snapshot(
    State(array): State<MockArray>,
    Path((_version, _sym_id, snap_name)): Path<(String, String, String)>,
    Json(payload): Json<DeleteVolumeSnapshot>,
) -> MockResult<StatusCode> {
    let mut data = array.write();
    for source in &payload.device_name_list_source {
        let snaps = data
            .snapshots
            .get_mut(&source.name)
            .ok_or_else(|| MockError::NotFound(format!("Volume not found: {}", source.name)))?;
        let before = snaps.len();
        snaps.retain(|s| {
            !(s.snapshot_name == snap_name && s.generation == payload.generation)
        });
        if snaps.len() == before {
            return Err(MockError::NotFound(format!(
                "Snapshot not found: {snap_name}"
            )));
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

//! SnapVX snapshot operations.

use tracing::instrument;

use pmax_core::resources::snapshot::{
    CreateVolumesSnapshot, DeleteVolumeSnapshot, ModifyVolumeSnapshot, SnapshotVolumeGeneration,
    VolumeList, VolumeSnapshotSource,
};
use pmax_core::resources::storage_group::ExecutionOption;
use pmax_core::{Result, SymId};

use crate::client::Client;

impl Client {
    /// Get the SnapVX information associated with a source volume.
    #[instrument(skip(self))]
    pub async fn get_volume_snap_info(
        &self,
        sym_id: &SymId,
        volume_id: &str,
    ) -> Result<SnapshotVolumeGeneration> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.replication_path(sym_id, &format!("/volume/{}/snapshot", volume_id)))
            .await
    }

    /// Get one snapshot of a volume by name.
    #[instrument(skip(self))]
    pub async fn get_snapshot_info(
        &self,
        sym_id: &SymId,
        volume_id: &str,
        snapshot_name: &str,
    ) -> Result<VolumeSnapshotSource> {
        self.ensure_allowed(sym_id)?;
        let suffix = format!("/volume/{}/snapshot/{}", volume_id, snapshot_name);
        self.rest().get(&self.replication_path(sym_id, &suffix)).await
    }

    /// Take a named snapshot of the given source volumes.
    #[instrument(skip(self, source_volumes))]
    pub async fn create_snapshot(
        &self,
        sym_id: &SymId,
        snapshot_name: &str,
        source_volumes: &[String],
        time_to_live: Option<i64>,
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        let payload = CreateVolumesSnapshot {
            source_volume_list: volume_list(source_volumes),
            both_sides: false,
            time_to_live,
            execution_option: ExecutionOption::Synchronous,
        };
        let path = self.replication_path(sym_id, &format!("/snapshot/{}", snapshot_name));
        self.rest().post_no_response(&path, &payload).await
    }

    /// Execute an action (rename, link, unlink) on a snapshot.
    #[instrument(skip(self, source_volumes, target_volumes))]
    pub async fn modify_snapshot(
        &self,
        sym_id: &SymId,
        snapshot_name: &str,
        source_volumes: &[String],
        target_volumes: &[String],
        action: &str,
        new_snapshot_name: Option<&str>,
        generation: i64,
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        let payload = ModifyVolumeSnapshot {
            volume_name_list_source: volume_list(source_volumes),
            volume_name_list_target: volume_list(target_volumes),
            action: action.to_string(),
            new_snapshot_name: new_snapshot_name.map(str::to_string),
            generation,
            execution_option: ExecutionOption::Synchronous,
        };
        let path = self.replication_path(sym_id, &format!("/snapshot/{}", snapshot_name));
        self.rest().put_no_response(&path, &payload).await
    }

    /// Delete one generation of a snapshot from its source volumes.
    #[instrument(skip(self, source_volumes))]
    pub async fn delete_snapshot(
        &self,
        sym_id: &SymId,
        snapshot_name: &str,
        source_volumes: &[String],
        generation: i64,
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        let payload = DeleteVolumeSnapshot {
            device_name_list_source: volume_list(source_volumes),
            generation,
            execution_option: ExecutionOption::Synchronous,
        };
        let path = self.replication_path(sym_id, &format!("/snapshot/{}", snapshot_name));
        self.rest().delete_with_body(&path, &payload).await
    }
}

fn volume_list(names: &[String]) -> Vec<VolumeList> {
    names
        .iter()
        .map(|name| VolumeList { name: name.clone() })
        .collect()
}

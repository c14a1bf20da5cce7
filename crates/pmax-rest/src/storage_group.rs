//! Storage group operations, including the asynchronous job flows.

use tracing::{debug, instrument, warn};

use pmax_core::error::{InvalidInputError, JobError};
use pmax_core::resources::storage_group::{
    AddSpecificVolumeParam, AddVolumeParam, CreateStorageGroupParam, EditStorageGroupActionParam,
    ExecutionOption, ExpandStorageGroupParam, RemoveVolumeParam, RequestMetadata,
    SloBasedStorageGroupParam, StorageGroup, StorageGroupIdList, UpdateStorageGroupPayload,
};
use pmax_core::resources::volume::{
    CAPACITY_UNIT_CYL, Volume, VolumeAttributeType, VolumeIdentifierType,
};
use pmax_core::{Job, JobStatus, Result, SymId};

use crate::client::Client;

/// Longest accepted volume identifier.
const MAX_VOL_IDENTIFIER_LENGTH: usize = 64;

const EMULATION_FBA: &str = "FBA";

/// Payload creating one new named volume inside a storage group.
pub fn create_volume_in_sg_payload(
    volume_name: &str,
    size_in_cylinders: u64,
    execution_option: ExecutionOption,
    metadata: Option<RequestMetadata>,
) -> UpdateStorageGroupPayload {
    UpdateStorageGroupPayload {
        edit_storage_group_action_param: EditStorageGroupActionParam {
            expand_storage_group_param: Some(ExpandStorageGroupParam {
                add_volume_param: Some(AddVolumeParam {
                    create_new_volumes: true,
                    emulation: EMULATION_FBA.to_string(),
                    volume_attributes: vec![VolumeAttributeType {
                        num_of_vols: Some(1),
                        volume_identifier: Some(VolumeIdentifierType::named(volume_name)),
                        capacity_unit: CAPACITY_UNIT_CYL.to_string(),
                        volume_size: size_in_cylinders.to_string(),
                    }],
                }),
                add_specific_volume_param: None,
            }),
            remove_volume_param: None,
        },
        execution_option,
        metadata,
    }
}

/// Payload adding existing volumes, by id, to a storage group.
pub fn add_volumes_payload(
    volume_ids: &[String],
    force: bool,
    execution_option: ExecutionOption,
) -> UpdateStorageGroupPayload {
    UpdateStorageGroupPayload {
        edit_storage_group_action_param: EditStorageGroupActionParam {
            expand_storage_group_param: Some(ExpandStorageGroupParam {
                add_volume_param: None,
                add_specific_volume_param: Some(AddSpecificVolumeParam {
                    volume_ids: volume_ids.to_vec(),
                    force,
                }),
            }),
            remove_volume_param: None,
        },
        execution_option,
        metadata: None,
    }
}

/// Payload removing volumes, by id, from a storage group.
pub fn remove_volumes_payload(volume_ids: &[String], force: bool) -> UpdateStorageGroupPayload {
    UpdateStorageGroupPayload {
        edit_storage_group_action_param: EditStorageGroupActionParam {
            expand_storage_group_param: None,
            remove_volume_param: Some(RemoveVolumeParam {
                volume_ids: volume_ids.to_vec(),
                force,
            }),
        },
        execution_option: ExecutionOption::Synchronous,
        metadata: None,
    }
}

impl Client {
    /// List all storage group ids on an array.
    #[instrument(skip(self))]
    pub async fn get_storage_group_id_list(&self, sym_id: &SymId) -> Result<StorageGroupIdList> {
        self.ensure_allowed(sym_id)?;
        self.rest().get(&self.slo_path(sym_id, "/storagegroup")).await
    }

    /// Get one storage group by id.
    #[instrument(skip(self))]
    pub async fn get_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
    ) -> Result<StorageGroup> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.slo_path(sym_id, &format!("/storagegroup/{}", storage_group_id)))
            .await
    }

    /// Create a storage group bound to a storage resource pool and
    /// service level.
    #[instrument(skip(self))]
    pub async fn create_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        srp_id: &str,
        service_level: &str,
    ) -> Result<StorageGroup> {
        self.ensure_allowed(sym_id)?;
        let payload = CreateStorageGroupParam {
            storage_group_id: storage_group_id.to_string(),
            srp_id: srp_id.to_string(),
            emulation: EMULATION_FBA.to_string(),
            slo_based_storage_group_param: vec![SloBasedStorageGroupParam {
                slo_id: service_level.to_string(),
                ..Default::default()
            }],
            execution_option: ExecutionOption::Synchronous,
        };
        self.rest()
            .post(&self.slo_path(sym_id, "/storagegroup"), &payload)
            .await
    }

    /// Delete a storage group.
    #[instrument(skip(self))]
    pub async fn delete_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .delete(&self.slo_path(sym_id, &format!("/storagegroup/{}", storage_group_id)))
            .await
    }

    /// Submit a storage group update and decode the job the array answers
    /// with.
    ///
    /// The payload's execution option should be
    /// [`ExecutionOption::Asynchronous`]; the returned job must be polled
    /// to completion via [`Client::wait_on_job_completion`].
    #[instrument(skip(self, payload))]
    pub async fn update_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        payload: &UpdateStorageGroupPayload,
    ) -> Result<Job> {
        self.ensure_allowed(sym_id)?;
        let path = self.slo_path(sym_id, &format!("/storagegroup/{}", storage_group_id));
        self.rest()
            .put_with_metadata(&path, payload, payload.metadata.as_ref())
            .await
    }

    /// Submit a synchronous storage group update, discarding the
    /// response body.
    #[instrument(skip(self, payload))]
    pub async fn update_storage_group_sync(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        payload: &UpdateStorageGroupPayload,
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        let path = self.slo_path(sym_id, &format!("/storagegroup/{}", storage_group_id));
        self.rest().put_no_response(&path, payload).await
    }

    /// Create a named volume of the given size inside a storage group.
    ///
    /// Submits the mutation asynchronously, waits on the job, fails on a
    /// terminal FAILED status, then locates the created volume by its
    /// identifier. A timeout during the wait leaves the mutation
    /// indeterminate — the volume may still appear once the array
    /// finishes.
    #[instrument(skip(self))]
    pub async fn create_volume_in_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        volume_name: &str,
        size_in_cylinders: u64,
    ) -> Result<Volume> {
        self.ensure_allowed(sym_id)?;
        if volume_name.len() > MAX_VOL_IDENTIFIER_LENGTH {
            return Err(InvalidInputError::Other {
                message: format!(
                    "volume name exceeds {} characters",
                    MAX_VOL_IDENTIFIER_LENGTH
                ),
            }
            .into());
        }

        let payload = create_volume_in_sg_payload(
            volume_name,
            size_in_cylinders,
            ExecutionOption::Asynchronous,
            None,
        );
        let job = self
            .update_storage_group(sym_id, storage_group_id, &payload)
            .await?;
        let job = self.wait_on_job_completion(sym_id, &job.job_id).await?;
        if job.status == JobStatus::Failed {
            return Err(JobError::Failed {
                job_id: job.job_id,
                result: job.result,
            }
            .into());
        }

        match self
            .find_volume_by_identifier(sym_id, storage_group_id, volume_name, size_in_cylinders)
            .await?
        {
            Some(volume) => Ok(volume),
            None => Err(InvalidInputError::Other {
                message: format!(
                    "failed to find newly created volume {} in storage group {}",
                    volume_name, storage_group_id
                ),
            }
            .into()),
        }
    }

    /// Locate a volume by identifier, storage group membership, and size.
    ///
    /// Returns the first match, `None` when nothing matches.
    #[instrument(skip(self))]
    pub async fn find_volume_by_identifier(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        volume_name: &str,
        size_in_cylinders: u64,
    ) -> Result<Option<Volume>> {
        let volume_ids = self.get_volume_id_list(sym_id, volume_name, false).await?;
        if volume_ids.len() > 1 {
            warn!(volume_name, "multiple volumes match the identifier");
        }
        for volume_id in &volume_ids {
            let volume = self.get_volume(sym_id, volume_id).await?;
            let in_group = volume
                .storage_group_id_list
                .iter()
                .any(|sg| sg == storage_group_id);
            if in_group && volume.capacity_cyl == size_in_cylinders {
                return Ok(Some(volume));
            }
        }
        Ok(None)
    }

    /// Add existing volumes to a storage group, waiting on the array's
    /// job.
    ///
    /// A terminal FAILED job is surfaced as [`JobError::Failed`]; a poll
    /// failure or timeout leaves the mutation indeterminate.
    #[instrument(skip(self))]
    pub async fn add_volumes_to_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        force: bool,
        volume_ids: &[String],
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        if volume_ids.is_empty() {
            return Err(InvalidInputError::Other {
                message: "at least one volume id has to be specified".to_string(),
            }
            .into());
        }
        let payload = add_volumes_payload(volume_ids, force, ExecutionOption::Asynchronous);
        let job = self
            .update_storage_group(sym_id, storage_group_id, &payload)
            .await?;
        let job = self.wait_on_job_completion(sym_id, &job.job_id).await?;
        if job.status == JobStatus::Failed {
            return Err(JobError::Failed {
                job_id: job.job_id,
                result: job.result,
            }
            .into());
        }
        debug!(storage_group_id, ?volume_ids, "volumes added to storage group");
        Ok(())
    }

    /// Add existing volumes to a storage group synchronously.
    #[instrument(skip(self))]
    pub async fn add_volumes_to_storage_group_sync(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        force: bool,
        volume_ids: &[String],
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        if volume_ids.is_empty() {
            return Err(InvalidInputError::Other {
                message: "at least one volume id has to be specified".to_string(),
            }
            .into());
        }
        let payload = add_volumes_payload(volume_ids, force, ExecutionOption::Synchronous);
        self.update_storage_group_sync(sym_id, storage_group_id, &payload)
            .await
    }

    /// Remove volumes from a storage group, returning the updated group.
    #[instrument(skip(self))]
    pub async fn remove_volumes_from_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
        force: bool,
        volume_ids: &[String],
    ) -> Result<StorageGroup> {
        self.ensure_allowed(sym_id)?;
        if volume_ids.is_empty() {
            return Err(InvalidInputError::Other {
                message: "at least one volume id has to be specified".to_string(),
            }
            .into());
        }
        let payload = remove_volumes_payload(volume_ids, force);
        let path = self.slo_path(sym_id, &format!("/storagegroup/{}", storage_group_id));
        self.rest().put(&path, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume_payload_is_asynchronous() {
        let payload =
            create_volume_in_sg_payload("csi-vol", 547, ExecutionOption::Asynchronous, None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["executionOption"], "ASYNCHRONOUS");
        let add = &json["editStorageGroupActionParam"]["expandStorageGroupParam"]
            ["addVolumeParam"];
        assert_eq!(add["create_new_volumes"], true);
        assert_eq!(add["volumeAttributes"][0]["volume_size"], "547");
        assert_eq!(
            add["volumeAttributes"][0]["volumeIdentifier"]["identifier_name"],
            "csi-vol"
        );
    }

    #[test]
    fn remove_volumes_payload_is_synchronous() {
        let payload = remove_volumes_payload(&["00001".to_string()], false);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["executionOption"], "SYNCHRONOUS");
        assert_eq!(
            json["editStorageGroupActionParam"]["removeVolumeParam"]["volumeId"][0],
            "00001"
        );
    }
}

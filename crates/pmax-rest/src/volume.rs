//! Volume operations and iterator draining.

use tracing::{debug, instrument, warn};

use pmax_core::error::{InvalidInputError, IteratorError};
use pmax_core::resources::volume::{
    CAPACITY_UNIT_CYL, EditVolumeActionParam, EditVolumeParam, ExpandVolumeParam,
    FreeVolumeParam, ModifyVolumeIdentifierParam, Volume, VolumeAttributeType,
    VolumeIdentifierType,
};
use pmax_core::resources::storage_group::ExecutionOption;
use pmax_core::resources::iterator::VolumeResultList;
use pmax_core::{Job, Result, SymId, VolumeIterator};

use crate::client::Client;

impl Client {
    /// Start an iterator over volume ids, optionally filtered by volume
    /// identifier.
    ///
    /// With `like` set, `identifier_match` is a substring filter;
    /// otherwise it must match exactly. The returned iterator carries its
    /// first page inline.
    #[instrument(skip(self))]
    pub async fn get_volume_ids_iterator(
        &self,
        sym_id: &SymId,
        identifier_match: &str,
        like: bool,
    ) -> Result<VolumeIterator> {
        self.ensure_allowed(sym_id)?;
        let query = if identifier_match.is_empty() {
            String::new()
        } else if like {
            format!("?volume_identifier=%3Clike%3E{}", identifier_match)
        } else {
            format!("?volume_identifier={}", identifier_match)
        };
        self.volume_ids_iterator_base(sym_id, &query).await
    }

    /// Start an iterator over the volume ids of one storage group.
    #[instrument(skip(self))]
    pub async fn get_volumes_in_storage_group_iterator(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
    ) -> Result<VolumeIterator> {
        self.ensure_allowed(sym_id)?;
        if storage_group_id.is_empty() {
            return Err(InvalidInputError::Other {
                message: "storage group id must not be empty".to_string(),
            }
            .into());
        }
        let query = format!("?storageGroupId={}", storage_group_id);
        self.volume_ids_iterator_base(sym_id, &query).await
    }

    async fn volume_ids_iterator_base(
        &self,
        sym_id: &SymId,
        query: &str,
    ) -> Result<VolumeIterator> {
        let path = format!("{}{}", self.slo_path(sym_id, "/volume"), query);
        self.rest().get(&path).await
    }

    /// Fetch one page of an iterator's result.
    ///
    /// `from` is 1-based. `to` defaults to `from + maxPageSize - 1` when
    /// absent; oversized ranges are clamped to the page size, and the end
    /// is clamped to the iterator's element count. Requesting a page
    /// beyond the count is a range error, not an empty page.
    #[instrument(skip(self, iterator), fields(iterator = %iterator.id))]
    pub async fn get_volume_ids_iterator_page(
        &self,
        iterator: &VolumeIterator,
        from: u32,
        to: Option<u32>,
    ) -> Result<Vec<String>> {
        if from > iterator.count {
            return Err(IteratorError::RangeOutOfBounds {
                from,
                count: iterator.count,
            }
            .into());
        }
        let mut to = match to {
            Some(t) if t >= from && t - from + 1 <= iterator.max_page_size => t,
            _ => from + iterator.max_page_size - 1,
        };
        if to > iterator.count {
            to = iterator.count;
        }

        let path = format!(
            "{}?from={}&to={}",
            self.iterator_path(&iterator.id, "/page"),
            from,
            to
        );
        let page: VolumeResultList = self.rest().get(&path).await?;
        Ok(page.ids().map(str::to_string).collect())
    }

    /// Release a server-side iterator.
    #[instrument(skip(self, iterator), fields(iterator = %iterator.id))]
    pub async fn delete_volume_ids_iterator(&self, iterator: &VolumeIterator) -> Result<()> {
        self.rest()
            .delete(&self.iterator_path(&iterator.id, ""))
            .await
    }

    /// Drain an iterator into the complete, offset-ordered id list.
    ///
    /// Consumes the embedded first page, then fetches subsequent pages
    /// strictly sequentially until the running total reaches the declared
    /// count. A total that differs from the count is a
    /// [`IteratorError::CountMismatch`] — the walker never truncates or
    /// pads. The server-side iterator is released afterwards when more
    /// than one page existed; release failures are logged, not
    /// propagated.
    #[instrument(skip(self, iterator), fields(iterator = %iterator.id, count = iterator.count))]
    pub async fn volume_ids_from_iterator(
        &self,
        iterator: &VolumeIterator,
    ) -> Result<Vec<String>> {
        let drained = self.drain_pages(iterator).await;

        // Single-page results leave no cursor state behind on the server.
        if !iterator.is_single_page() {
            if let Err(err) = self.delete_volume_ids_iterator(iterator).await {
                warn!(iterator = %iterator.id, error = %err, "failed to release iterator");
            }
        }

        let ids = drained?;
        if ids.len() as u32 != iterator.count {
            return Err(IteratorError::CountMismatch {
                expected: iterator.count,
                actual: ids.len() as u32,
            }
            .into());
        }
        Ok(ids)
    }

    async fn drain_pages(&self, iterator: &VolumeIterator) -> Result<Vec<String>> {
        let mut ids: Vec<String> = iterator.result_list.ids().map(str::to_string).collect();

        let mut from = iterator.result_list.to + 1;
        while from <= iterator.count {
            let page = self
                .get_volume_ids_iterator_page(iterator, from, None)
                .await?;
            if page.is_empty() {
                // A page that should exist came back empty; stop paging and
                // let the count check report the desync.
                break;
            }
            from += page.len() as u32;
            ids.extend(page);
        }
        debug!(retrieved = ids.len(), "iterator drained");
        Ok(ids)
    }

    /// List volume ids matching an identifier filter.
    ///
    /// Handles the iterator lifecycle: begin, drain all pages, release.
    #[instrument(skip(self))]
    pub async fn get_volume_id_list(
        &self,
        sym_id: &SymId,
        identifier_match: &str,
        like: bool,
    ) -> Result<Vec<String>> {
        let iterator = self
            .get_volume_ids_iterator(sym_id, identifier_match, like)
            .await?;
        self.volume_ids_from_iterator(&iterator).await
    }

    /// List the volume ids of one storage group.
    #[instrument(skip(self))]
    pub async fn get_volume_id_list_in_storage_group(
        &self,
        sym_id: &SymId,
        storage_group_id: &str,
    ) -> Result<Vec<String>> {
        let iterator = self
            .get_volumes_in_storage_group_iterator(sym_id, storage_group_id)
            .await?;
        self.volume_ids_from_iterator(&iterator).await
    }

    /// Get one volume by id.
    #[instrument(skip(self))]
    pub async fn get_volume(&self, sym_id: &SymId, volume_id: &str) -> Result<Volume> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.slo_path(sym_id, &format!("/volume/{}", volume_id)))
            .await
    }

    /// Rename a volume, returning the updated volume.
    #[instrument(skip(self))]
    pub async fn rename_volume(
        &self,
        sym_id: &SymId,
        volume_id: &str,
        new_name: &str,
    ) -> Result<Volume> {
        self.ensure_allowed(sym_id)?;
        let payload = EditVolumeParam {
            edit_volume_action_param: EditVolumeActionParam {
                modify_volume_identifier_param: Some(ModifyVolumeIdentifierParam {
                    volume_identifier: VolumeIdentifierType::named(new_name),
                }),
                ..Default::default()
            },
            execution_option: ExecutionOption::Synchronous,
        };
        self.rest()
            .put(&self.slo_path(sym_id, &format!("/volume/{}", volume_id)), &payload)
            .await
    }

    /// Expand a volume to a new size in cylinders, returning the updated
    /// volume.
    #[instrument(skip(self))]
    pub async fn expand_volume(
        &self,
        sym_id: &SymId,
        volume_id: &str,
        new_size_cyl: u64,
    ) -> Result<Volume> {
        self.ensure_allowed(sym_id)?;
        let payload = EditVolumeParam {
            edit_volume_action_param: EditVolumeActionParam {
                expand_volume_param: Some(ExpandVolumeParam {
                    volume_attribute: VolumeAttributeType {
                        num_of_vols: None,
                        volume_identifier: None,
                        capacity_unit: CAPACITY_UNIT_CYL.to_string(),
                        volume_size: new_size_cyl.to_string(),
                    },
                }),
                ..Default::default()
            },
            execution_option: ExecutionOption::Synchronous,
        };
        let path = self.slo_path(sym_id, &format!("/volume/{}", volume_id));
        self.rest().put_no_response(&path, &payload).await?;
        self.get_volume(sym_id, volume_id).await
    }

    /// Start a job deallocating all tracks of a volume.
    ///
    /// Deallocation is asynchronous on the array; the returned job must
    /// be polled to completion.
    #[instrument(skip(self))]
    pub async fn initiate_deallocation_of_tracks(
        &self,
        sym_id: &SymId,
        volume_id: &str,
    ) -> Result<Job> {
        self.ensure_allowed(sym_id)?;
        let payload = EditVolumeParam {
            edit_volume_action_param: EditVolumeActionParam {
                free_volume_param: Some(FreeVolumeParam { free_volume: true }),
                ..Default::default()
            },
            execution_option: ExecutionOption::Asynchronous,
        };
        self.rest()
            .put(&self.slo_path(sym_id, &format!("/volume/{}", volume_id)), &payload)
            .await
    }

    /// Delete a volume.
    #[instrument(skip(self))]
    pub async fn delete_volume(&self, sym_id: &SymId, volume_id: &str) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .delete(&self.slo_path(sym_id, &format!("/volume/{}", volume_id)))
            .await
    }
}

//! System operations: array inventory and asynchronous job polling.

use tokio::time::{Instant, sleep};
use tracing::{debug, instrument, warn};

use pmax_core::error::JobError;
use pmax_core::resources::symmetrix::{StoragePool, StoragePoolList, Symmetrix, SymmetrixIdList};
use pmax_core::{Error, Job, JobIdList, JobStatus, Result, SymId};

use crate::client::Client;

impl Client {
    /// List the array ids known to this Unisphere instance.
    #[instrument(skip(self))]
    pub async fn get_symmetrix_id_list(&self) -> Result<SymmetrixIdList> {
        self.rest().get(&self.system_root_path("")).await
    }

    /// Get one array by id.
    #[instrument(skip(self))]
    pub async fn get_symmetrix(&self, sym_id: &SymId) -> Result<Symmetrix> {
        self.ensure_allowed(sym_id)?;
        self.rest().get(&self.system_path(sym_id, "")).await
    }

    /// List the storage resource pools on an array.
    #[instrument(skip(self))]
    pub async fn get_storage_pool_list(&self, sym_id: &SymId) -> Result<StoragePoolList> {
        self.ensure_allowed(sym_id)?;
        self.rest().get(&self.slo_path(sym_id, "/srp")).await
    }

    /// Get one storage resource pool by id.
    #[instrument(skip(self))]
    pub async fn get_storage_pool(&self, sym_id: &SymId, srp_id: &str) -> Result<StoragePool> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.slo_path(sym_id, &format!("/srp/{}", srp_id)))
            .await
    }

    /// List job ids on an array, optionally filtered by status.
    #[instrument(skip(self))]
    pub async fn get_job_id_list(
        &self,
        sym_id: &SymId,
        status: Option<JobStatus>,
    ) -> Result<JobIdList> {
        self.ensure_allowed(sym_id)?;
        let suffix = match status {
            Some(status) => format!("/job?status={}", status),
            None => "/job".to_string(),
        };
        self.rest().get(&self.system_path(sym_id, &suffix)).await
    }

    /// Get one job by id.
    ///
    /// A 404 response means the polling target vanished server-side and is
    /// surfaced as [`JobError::NotFound`] without retrying.
    #[instrument(skip(self))]
    pub async fn get_job_by_id(&self, sym_id: &SymId, job_id: &str) -> Result<Job> {
        self.ensure_allowed(sym_id)?;
        let path = self.system_path(sym_id, &format!("/job/{}", job_id));
        match self.rest().get(&path).await {
            Err(Error::Api(api)) if api.is_not_found() => Err(JobError::NotFound {
                job_id: job_id.to_string(),
            }
            .into()),
            other => other,
        }
    }

    /// Poll a job until it reaches a terminal status.
    ///
    /// Polls `GET .../job/{job_id}` at the configured interval until the
    /// job reports `SUCCEEDED` or `FAILED`, returning the terminal job
    /// either way — callers decide what a failed job means for their
    /// operation. The loop is bounded by the configured job wait timeout;
    /// on expiry the error carries the last observed non-terminal status
    /// and the mutation must be treated as indeterminate.
    ///
    /// The only suspension points are the HTTP round-trip and the
    /// inter-poll sleep, so dropping the returned future (for example
    /// under `tokio::time::timeout`) cancels promptly.
    #[instrument(skip(self))]
    pub async fn wait_on_job_completion(&self, sym_id: &SymId, job_id: &str) -> Result<Job> {
        let poll_interval = self.config().job_poll_interval;
        let deadline = Instant::now() + self.config().job_wait_timeout;

        loop {
            let job = self.get_job_by_id(sym_id, job_id).await?;
            if job.status.is_terminal() {
                debug!(job_id, status = %job.status, "job reached terminal status");
                return Ok(job);
            }
            if Instant::now() >= deadline {
                warn!(job_id, last_status = %job.status, "gave up waiting on job");
                return Err(JobError::Timeout {
                    job_id: job_id.to_string(),
                    last_status: job.status,
                }
                .into());
            }
            debug!(job_id, status = %job.status, "job still in progress");
            sleep(poll_interval).await;
        }
    }
}

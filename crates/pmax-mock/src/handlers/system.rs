//! Version, array inventory, and job endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use pmax_core::resources::symmetrix::{StoragePool, StoragePoolList, Symmetrix, SymmetrixIdList};
use pmax_core::{Job, JobIdList};

use crate::error::{MockError, MockResult};
use crate::store::MockArray;

/// GET /univmax/restapi/version
pub async fn version() -> Json<Value> {
    Json(json!({"version": "V10.0.0.1"}))
}

/// GET .../system/symmetrix
pub async fn list_symmetrix(State(array): State<MockArray>) -> Json<SymmetrixIdList> {
    let data = array.read();
    let mut ids: Vec<String> = data.symmetrix.keys().cloned().collect();
    ids.sort();
    Json(SymmetrixIdList { symmetrix_ids: ids })
}

/// GET .../system/symmetrix/{symId}
pub async fn get_symmetrix(
    State(array): State<MockArray>,
    Path((_version, sym_id)): Path<(String, String)>,
) -> MockResult<Json<Symmetrix>> {
    let data = array.read();
    data.symmetrix
        .get(&sym_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Symmetrix not found: {sym_id}")))
}

/// GET .../sloprovisioning/symmetrix/{symId}/srp
pub async fn list_storage_pools(State(array): State<MockArray>) -> Json<StoragePoolList> {
    let data = array.read();
    let mut ids: Vec<String> = data.storage_pools.keys().cloned().collect();
    ids.sort();
    Json(StoragePoolList {
        storage_pool_ids: ids,
    })
}

/// GET .../sloprovisioning/symmetrix/{symId}/srp/{srpId}
pub async fn get_storage_pool(
    State(array): State<MockArray>,
    Path((_version, _sym_id, srp_id)): Path<(String, String, String)>,
) -> MockResult<Json<StoragePool>> {
    let data = array.read();
    data.storage_pools
        .get(&srp_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::NotFound(format!("Storage pool not found: {srp_id}")))
}

#[derive(Debug, Deserialize)]
pub struct JobListQuery {
    status: Option<String>,
}

/// GET .../system/symmetrix/{symId}/job
pub async fn list_jobs(
    State(array): State<MockArray>,
    Query(query): Query<JobListQuery>,
) -> MockResult<Json<JobIdList>> {
    let data = array.read();
    if data.induced.get_job_error {
        return Err(MockError::Induced(
            "Error getting Job(s): induced error".to_string(),
        ));
    }
    let mut job_ids: Vec<String> = data
        .jobs
        .iter()
        .filter(|(_, job)| match &query.status {
            Some(status) => job.job().status.to_string() == *status,
            None => true,
        })
        .map(|(id, _)| id.clone())
        .collect();
    job_ids.sort();
    Ok(Json(JobIdList { job_ids }))
}

/// GET .../system/symmetrix/{symId}/job/{jobId}
///
/// Reading a job flips its reported status between its initial and final
/// states, so a poller observes the in-progress status once and the
/// terminal status on the following poll.
pub async fn get_job(
    State(array): State<MockArray>,
    Path((_version, _sym_id, job_id)): Path<(String, String, String)>,
) -> MockResult<Json<Job>> {
    let mut data = array.write();
    if data.induced.get_job_error {
        return Err(MockError::Induced(
            "Error getting Job(s): induced error".to_string(),
        ));
    }
    let job = data
        .jobs
        .get_mut(&job_id)
        .ok_or_else(|| MockError::NotFound(format!("Job not found: {job_id}")))?;
    Ok(Json(job.observe()))
}

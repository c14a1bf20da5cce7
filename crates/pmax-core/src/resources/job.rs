//! Asynchronous job resource.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a server-side asynchronous job.
///
/// The array owns the status; clients only observe it. `Succeeded` and
/// `Failed` are terminal: once observed, further polling is meaningless.
/// An unrecognized wire status fails decoding rather than defaulting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Unscheduled,
    Scheduled,
    Running,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// True when no further status transitions are possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Unscheduled => "UNSCHEDULED",
            JobStatus::Scheduled => "SCHEDULED",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// A single task within a job.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JobTask {
    #[serde(default)]
    pub execution_order: i64,
    #[serde(default)]
    pub description: String,
}

/// A server-side asynchronous job.
///
/// Created by the array in response to an asynchronous mutating request
/// and polled by the client until terminal. Jobs are server-owned; the
/// client never deletes them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "symmetrixId", default)]
    pub symmetrix_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub result: String,
    /// Link encoding which array/resource-type/resource-id the job acts on.
    #[serde(rename = "resourceLink", default)]
    pub resource_link: String,
    #[serde(rename = "completed_date", default)]
    pub completed_date: String,
    #[serde(rename = "completed_date_milliseconds", default)]
    pub completed_date_milliseconds: i64,
    #[serde(rename = "task", default)]
    pub tasks: Vec<JobTask>,
}

impl Job {
    /// Parse the resource link into (array id, resource type, resource id).
    ///
    /// Returns `None` when the link is absent or has fewer than three
    /// segments.
    pub fn resource_link_parts(&self) -> Option<(&str, &str, &str)> {
        if self.resource_link.is_empty() {
            return None;
        }
        let mut parts = self.resource_link.rsplit('/');
        let resource_id = parts.next()?;
        let resource_type = parts.next()?;
        let array = parts.next()?;
        Some((array, resource_type, resource_id))
    }
}

/// Compact human-readable job summary for diagnostics. Pure, no I/O.
impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job id: {} status: {} resource: {} result: {}",
            self.job_id, self.status, self.resource_link, self.result
        )
    }
}

/// List of job ids, as returned by `GET .../job`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JobIdList {
    #[serde(rename = "jobId", default)]
    pub job_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(status: JobStatus) -> Job {
        Job {
            job_id: "1562472979".to_string(),
            name: String::new(),
            symmetrix_id: "000197900046".to_string(),
            status,
            username: String::new(),
            result: "OK".to_string(),
            resource_link: "sloprovisioning/symmetrix/000197900046/storagegroup/csi-sg"
                .to_string(),
            completed_date: String::new(),
            completed_date_milliseconds: 0,
            tasks: Vec::new(),
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Unscheduled.is_terminal());
        assert!(!JobStatus::Scheduled.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }

    #[test]
    fn status_wire_form_is_screaming() {
        let json = serde_json::to_string(&JobStatus::Succeeded).unwrap();
        assert_eq!(json, "\"SUCCEEDED\"");
        let status: JobStatus = serde_json::from_str("\"RUNNING\"").unwrap();
        assert_eq!(status, JobStatus::Running);
    }

    #[test]
    fn unknown_status_fails_decoding() {
        let result: Result<JobStatus, _> = serde_json::from_str("\"VALIDATING\"");
        assert!(result.is_err());
    }

    #[test]
    fn resource_link_parses_trailing_segments() {
        let job = job(JobStatus::Succeeded);
        let (array, resource_type, resource_id) = job.resource_link_parts().unwrap();
        assert_eq!(array, "000197900046");
        assert_eq!(resource_type, "storagegroup");
        assert_eq!(resource_id, "csi-sg");
    }

    #[test]
    fn empty_resource_link_yields_none() {
        let mut job = job(JobStatus::Running);
        job.resource_link = String::new();
        assert!(job.resource_link_parts().is_none());
    }

    #[test]
    fn display_includes_id_status_result() {
        let text = job(JobStatus::Succeeded).to_string();
        assert!(text.contains("1562472979"));
        assert!(text.contains("SUCCEEDED"));
        assert!(text.contains("OK"));
    }

    #[test]
    fn decodes_sparse_job_body() {
        // Submission responses frequently omit everything but id and status.
        let job: Job =
            serde_json::from_str(r#"{"jobId": "J1", "status": "SCHEDULED"}"#).unwrap();
        assert_eq!(job.job_id, "J1");
        assert_eq!(job.status, JobStatus::Scheduled);
        assert!(job.result.is_empty());
    }
}

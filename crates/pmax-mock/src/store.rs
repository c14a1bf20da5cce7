//! In-memory array state.
//!
//! All mock state lives in an [`ArrayData`] store owned by a [`MockArray`]
//! handle. Stores are constructed per test run and passed to the server by
//! handle; there is no process-global state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use uuid::Uuid;

use pmax_core::resources::host::Host;
use pmax_core::resources::initiator::Initiator;
use pmax_core::resources::masking_view::MaskingView;
use pmax_core::resources::port_group::PortGroup;
use pmax_core::resources::snapshot::VolumeSnapshotSource;
use pmax_core::resources::storage_group::StorageGroup;
use pmax_core::resources::symmetrix::{StoragePool, Symmetrix};
use pmax_core::resources::volume::Volume;
use pmax_core::{Job, JobStatus};

/// Array id every fresh store is seeded with.
pub const DEFAULT_SYM_ID: &str = "000197900046";

/// Storage resource pool every fresh store is seeded with.
pub const DEFAULT_SRP_ID: &str = "SRP_1";

/// Page size the mock's iterators advertise.
pub const ITERATOR_PAGE_SIZE: u32 = 10;

/// Failure injection knobs, per store instance.
#[derive(Clone, Debug, Default)]
pub struct InducedErrors {
    /// Fail volume listing (iterator creation) requests.
    pub get_volume_iterator_error: bool,
    /// Fail volume GET requests.
    pub get_volume_error: bool,
    /// Fail job GET requests.
    pub get_job_error: bool,
    /// Jobs created from now on run to FAILED instead of SUCCEEDED.
    pub job_failed: bool,
    /// Fail storage group PUT requests.
    pub update_storage_group_error: bool,
    /// Fail storage group GET requests.
    pub get_storage_group_error: bool,
    /// Accept volume-creating updates without actually creating the volume.
    pub volume_not_created: bool,
    /// Overstate iterator counts by this many elements, desyncing the
    /// declared count from the pages the iterator actually serves.
    pub iterator_count_surplus: u32,
}

/// A job the mock flips between two statuses on successive reads.
///
/// Created with a non-terminal initial and a terminal final status and
/// reported as `SCHEDULED` until first observed; each read flips the
/// status, so a poller sees the initial status once and the terminal
/// status on the next poll.
#[derive(Clone, Debug)]
pub struct MockJob {
    job: Job,
    initial_status: JobStatus,
    final_status: JobStatus,
}

impl MockJob {
    pub fn new(
        job_id: &str,
        initial_status: JobStatus,
        final_status: JobStatus,
        resource_link: &str,
    ) -> Self {
        let job = Job {
            job_id: job_id.to_string(),
            name: String::new(),
            symmetrix_id: DEFAULT_SYM_ID.to_string(),
            status: JobStatus::Scheduled,
            username: String::new(),
            result: String::new(),
            resource_link: resource_link.to_string(),
            completed_date: String::new(),
            completed_date_milliseconds: 0,
            tasks: Vec::new(),
        };
        Self {
            job,
            initial_status,
            final_status,
        }
    }

    /// Report the job once, flipping its status for the next read.
    pub fn observe(&mut self) -> Job {
        if self.job.status == self.initial_status {
            let now = Utc::now();
            self.job.status = self.final_status;
            self.job.completed_date = now.to_rfc3339();
            self.job.completed_date_milliseconds = now.timestamp_millis();
            self.job.result = "Mock job completed".to_string();
        } else {
            self.job.status = self.initial_status;
            self.job.result = "Mock job in-progress".to_string();
        }
        self.job.clone()
    }

    /// The job's current state without flipping it.
    pub fn job(&self) -> &Job {
        &self.job
    }
}

/// The mock array's in-memory database.
#[derive(Debug, Default)]
pub struct ArrayData {
    pub symmetrix: HashMap<String, Symmetrix>,
    pub storage_pools: HashMap<String, StoragePool>,
    pub volumes: HashMap<String, Volume>,
    pub storage_groups: HashMap<String, StorageGroup>,
    pub hosts: HashMap<String, Host>,
    pub initiators: HashMap<String, Initiator>,
    pub port_groups: HashMap<String, PortGroup>,
    pub masking_views: HashMap<String, MaskingView>,
    /// Snapshots keyed by source volume id.
    pub snapshots: HashMap<String, Vec<VolumeSnapshotSource>>,
    pub jobs: HashMap<String, MockJob>,
    /// Live iterator snapshots keyed by iterator id.
    pub iterators: HashMap<String, Vec<String>>,
    pub induced: InducedErrors,
    next_volume_number: u64,
}

impl ArrayData {
    fn seeded() -> Self {
        let mut data = ArrayData::default();
        data.symmetrix.insert(
            DEFAULT_SYM_ID.to_string(),
            Symmetrix {
                symmetrix_id: DEFAULT_SYM_ID.to_string(),
                model: "PowerMax_2000".to_string(),
                ucode: "5978.221.221".to_string(),
                local: true,
                all_flash: true,
                display_name: format!("PowerMax-{DEFAULT_SYM_ID}"),
                ..Default::default()
            },
        );
        data.storage_pools.insert(
            DEFAULT_SRP_ID.to_string(),
            StoragePool {
                storage_pool_id: DEFAULT_SRP_ID.to_string(),
                emulation: "FBA".to_string(),
                service_levels: vec![
                    "Diamond".to_string(),
                    "Gold".to_string(),
                    "Bronze".to_string(),
                    "Optimized".to_string(),
                ],
                ..Default::default()
            },
        );
        data
    }

    /// Allocate the next generated volume id.
    pub fn next_volume_id(&mut self) -> String {
        self.next_volume_number += 1;
        format!("{:05X}", self.next_volume_number)
    }

    /// Insert a volume and wire up its storage group memberships.
    pub fn insert_volume(
        &mut self,
        volume_id: &str,
        identifier: &str,
        size_cyl: u64,
        storage_groups: &[String],
    ) {
        let volume = Volume {
            volume_id: volume_id.to_string(),
            volume_type: "TDEV".to_string(),
            emulation: "FBA".to_string(),
            capacity_cyl: size_cyl,
            capacity_gb: size_cyl as f64 / 1092.0,
            status: "Ready".to_string(),
            volume_identifier: identifier.to_string(),
            wwn: format!("60000970000197900046533030{volume_id}"),
            num_of_storage_groups: storage_groups.len() as i64,
            storage_group_id_list: storage_groups.to_vec(),
            ..Default::default()
        };
        self.volumes.insert(volume_id.to_string(), volume);
        for sg_id in storage_groups {
            if let Some(sg) = self.storage_groups.get_mut(sg_id) {
                sg.num_of_volumes += 1;
            }
        }
    }

    /// Register a flip-flop job and report it once, as the submission
    /// response does.
    pub fn new_job(&mut self, resource_link: &str) -> Job {
        let job_id = Uuid::new_v4().to_string();
        let final_status = if self.induced.job_failed {
            JobStatus::Failed
        } else {
            JobStatus::Succeeded
        };
        let mut mock_job = MockJob::new(&job_id, JobStatus::Running, final_status, resource_link);
        let job = mock_job.observe();
        self.jobs.insert(job_id, mock_job);
        job
    }

    /// Snapshot matching volume ids into a fresh iterator, sorted by id so
    /// offsets are stable.
    pub fn new_iterator(&mut self, mut volume_ids: Vec<String>) -> (String, Vec<String>) {
        volume_ids.sort();
        let iterator_id = Uuid::new_v4().to_string();
        self.iterators
            .insert(iterator_id.clone(), volume_ids.clone());
        (iterator_id, volume_ids)
    }
}

/// Handle to one mock array's state.
///
/// Cheap to clone; all clones share the same store. Tests keep a handle
/// to seed data and induce failures while the server serves requests.
#[derive(Clone, Debug)]
pub struct MockArray {
    data: Arc<RwLock<ArrayData>>,
}

impl Default for MockArray {
    fn default() -> Self {
        Self::new()
    }
}

impl MockArray {
    /// Create a store seeded with the default array and storage pool.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(ArrayData::seeded())),
        }
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, ArrayData> {
        self.data.read().expect("mock store lock poisoned")
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, ArrayData> {
        self.data.write().expect("mock store lock poisoned")
    }

    /// Run a closure with mutable access to the store.
    pub fn with_data<T>(&self, f: impl FnOnce(&mut ArrayData) -> T) -> T {
        f(&mut self.write())
    }

    /// Toggle failure injection.
    pub fn induce(&self, f: impl FnOnce(&mut InducedErrors)) {
        f(&mut self.write().induced);
    }

    /// Clear all failure injection.
    pub fn reset_induced(&self) {
        self.write().induced = InducedErrors::default();
    }

    /// Seed a volume, creating its storage groups as plain groups if they
    /// do not exist yet.
    pub fn add_volume(
        &self,
        volume_id: &str,
        identifier: &str,
        size_cyl: u64,
        storage_groups: &[&str],
    ) {
        let mut data = self.write();
        let sg_ids: Vec<String> = storage_groups.iter().map(|s| s.to_string()).collect();
        for sg_id in &sg_ids {
            data.storage_groups
                .entry(sg_id.clone())
                .or_insert_with(|| StorageGroup {
                    storage_group_id: sg_id.clone(),
                    srp: DEFAULT_SRP_ID.to_string(),
                    ..Default::default()
                });
        }
        data.insert_volume(volume_id, identifier, size_cyl, &sg_ids);
    }

    /// Seed an initiator that is not yet assigned to a host.
    pub fn add_initiator(&self, initiator_id: &str, initiator_type: &str) {
        let mut data = self.write();
        data.initiators.insert(
            initiator_id.to_string(),
            Initiator {
                initiator_id: initiator_id.to_string(),
                initiator_type: initiator_type.to_string(),
                logged_in: true,
                on_fabric: true,
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_seeded() {
        let array = MockArray::new();
        let data = array.read();
        assert!(data.symmetrix.contains_key(DEFAULT_SYM_ID));
        assert!(data.storage_pools.contains_key(DEFAULT_SRP_ID));
        assert!(data.volumes.is_empty());
    }

    #[test]
    fn stores_are_isolated() {
        let a = MockArray::new();
        let b = MockArray::new();
        a.add_volume("00001", "vol-a", 100, &[]);
        assert!(b.read().volumes.is_empty());
    }

    #[test]
    fn mock_job_flips_between_statuses() {
        let mut job = MockJob::new("J1", JobStatus::Running, JobStatus::Succeeded, "link");
        // Starts SCHEDULED; first read reports the initial status.
        assert_eq!(job.observe().status, JobStatus::Running);
        assert_eq!(job.observe().status, JobStatus::Succeeded);
        // A further read flips back; pollers stop at the first terminal
        // observation, so they never see this.
        assert_eq!(job.observe().status, JobStatus::Running);
    }

    #[test]
    fn terminal_observation_stamps_completion() {
        let mut job = MockJob::new("J1", JobStatus::Running, JobStatus::Succeeded, "link");
        job.observe();
        let done = job.observe();
        assert!(!done.completed_date.is_empty());
        assert_eq!(done.result, "Mock job completed");
    }

    #[test]
    fn new_job_honors_induced_failure() {
        let array = MockArray::new();
        array.induce(|e| e.job_failed = true);
        let mut data = array.write();
        let job = data.new_job("link");
        // Submission response reports the initial RUNNING status.
        assert_eq!(job.status, JobStatus::Running);
        let mock_job = data.jobs.get_mut(&job.job_id).unwrap();
        assert_eq!(mock_job.observe().status, JobStatus::Failed);
    }

    #[test]
    fn iterator_snapshot_is_sorted() {
        let array = MockArray::new();
        let mut data = array.write();
        let (_, ids) =
            data.new_iterator(vec!["00003".to_string(), "00001".to_string(), "00002".to_string()]);
        assert_eq!(ids, vec!["00001", "00002", "00003"]);
    }
}

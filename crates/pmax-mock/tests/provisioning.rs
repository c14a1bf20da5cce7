//! End-to-end provisioning tests: the REST client against the mock
//! Unisphere over real HTTP.

use pmax_core::error::{IteratorError, JobError};
use pmax_core::resources::port_group::PortKey;
use pmax_core::{Credentials, EndpointUrl, Error, SymId};
use pmax_mock::{DEFAULT_SYM_ID, MockUnisphere};
use pmax_rest::{Client, ConfigConnect};

fn client_for(mock: &MockUnisphere) -> Client {
    let endpoint = EndpointUrl::new(mock.url()).unwrap();
    let config = ConfigConnect::new(endpoint, Credentials::new("smc", "smc"));
    Client::new(config).unwrap()
}

fn sym() -> SymId {
    SymId::new(DEFAULT_SYM_ID).unwrap()
}

#[tokio::test]
async fn test_authenticate_and_inventory() {
    let mock = MockUnisphere::start().await;
    let client = client_for(&mock);

    client.authenticate().await.unwrap();

    let arrays = client.get_symmetrix_id_list().await.unwrap();
    assert_eq!(arrays.symmetrix_ids, vec![DEFAULT_SYM_ID]);

    let array = client.get_symmetrix(&sym()).await.unwrap();
    assert_eq!(array.symmetrix_id, DEFAULT_SYM_ID);
    assert!(array.local);

    let pools = client.get_storage_pool_list(&sym()).await.unwrap();
    assert_eq!(pools.storage_pool_ids, vec!["SRP_1"]);
    let pool = client.get_storage_pool(&sym(), "SRP_1").await.unwrap();
    assert!(pool.service_levels.contains(&"Diamond".to_string()));
}

#[tokio::test]
async fn test_create_volume_in_storage_group_job_flow() {
    let mock = MockUnisphere::start().await;
    let client = client_for(&mock);

    client
        .create_storage_group(&sym(), "csi-sg", "SRP_1", "Diamond")
        .await
        .unwrap();

    let volume = client
        .create_volume_in_storage_group(&sym(), "csi-sg", "csi-vol-1", 547)
        .await
        .unwrap();
    assert_eq!(volume.volume_identifier, "csi-vol-1");
    assert_eq!(volume.capacity_cyl, 547);
    assert!(volume.storage_group_id_list.contains(&"csi-sg".to_string()));

    let ids = client
        .get_volume_id_list_in_storage_group(&sym(), "csi-sg")
        .await
        .unwrap();
    assert_eq!(ids, vec![volume.volume_id.clone()]);

    let group = client.get_storage_group(&sym(), "csi-sg").await.unwrap();
    assert_eq!(group.num_of_volumes, 1);
}

#[tokio::test]
async fn test_add_and_remove_volumes() {
    let mock = MockUnisphere::start().await;
    mock.array().add_volume("00001", "vol-1", 100, &[]);
    mock.array().add_volume("00002", "vol-2", 100, &[]);
    let client = client_for(&mock);

    client
        .create_storage_group(&sym(), "data-sg", "SRP_1", "Gold")
        .await
        .unwrap();

    client
        .add_volumes_to_storage_group(
            &sym(),
            "data-sg",
            false,
            &["00001".to_string(), "00002".to_string()],
        )
        .await
        .unwrap();

    let ids = client
        .get_volume_id_list_in_storage_group(&sym(), "data-sg")
        .await
        .unwrap();
    assert_eq!(ids, vec!["00001", "00002"]);

    let group = client
        .remove_volumes_from_storage_group(&sym(), "data-sg", false, &["00001".to_string()])
        .await
        .unwrap();
    assert_eq!(group.num_of_volumes, 1);

    let ids = client
        .get_volume_id_list_in_storage_group(&sym(), "data-sg")
        .await
        .unwrap();
    assert_eq!(ids, vec!["00002"]);
}

#[tokio::test]
async fn test_multi_page_listing_drains_in_order() {
    let mock = MockUnisphere::start().await;
    for i in 1..=25u32 {
        mock.array()
            .add_volume(&format!("{:05}", i), &format!("vol-{i}"), 100, &[]);
    }
    let client = client_for(&mock);

    let ids = client.get_volume_id_list(&sym(), "", false).await.unwrap();
    assert_eq!(ids.len(), 25);
    let expected: Vec<String> = (1..=25u32).map(|i| format!("{:05}", i)).collect();
    assert_eq!(ids, expected);

    // The drain released its iterator; no live cursors remain.
    assert!(mock.array().with_data(|data| data.iterators.is_empty()));
}

#[tokio::test]
async fn test_single_page_listing_keeps_cursor_state() {
    let mock = MockUnisphere::start().await;
    for i in 1..=5u32 {
        mock.array()
            .add_volume(&format!("{:05}", i), &format!("vol-{i}"), 100, &[]);
    }
    let client = client_for(&mock);

    let ids = client.get_volume_id_list(&sym(), "", false).await.unwrap();
    assert_eq!(ids.len(), 5);

    // Single-page drains skip the delete; the mock expires the iterator
    // on its own.
    assert!(mock.array().with_data(|data| data.iterators.len() == 1));
}

#[tokio::test]
async fn test_like_filter_narrows_listing() {
    let mock = MockUnisphere::start().await;
    mock.array().add_volume("00001", "csi-a", 100, &[]);
    mock.array().add_volume("00002", "csi-b", 100, &[]);
    mock.array().add_volume("00003", "other", 100, &[]);
    let client = client_for(&mock);

    let ids = client.get_volume_id_list(&sym(), "csi", true).await.unwrap();
    assert_eq!(ids, vec!["00001", "00002"]);

    let ids = client
        .get_volume_id_list(&sym(), "other", false)
        .await
        .unwrap();
    assert_eq!(ids, vec!["00003"]);
}

#[tokio::test]
async fn test_overstated_count_surfaces_desync() {
    let mock = MockUnisphere::start().await;
    for i in 1..=12u32 {
        mock.array()
            .add_volume(&format!("{:05}", i), &format!("vol-{i}"), 100, &[]);
    }
    mock.array().induce(|e| e.iterator_count_surplus = 5);
    let client = client_for(&mock);

    let err = client.get_volume_id_list(&sym(), "", false).await.unwrap_err();
    match err {
        Error::Iterator(IteratorError::CountMismatch { expected, actual }) => {
            assert_eq!(expected, 17);
            assert_eq!(actual, 12);
        }
        other => panic!("expected count mismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_induced_job_failure_surfaces_operation_failure() {
    let mock = MockUnisphere::start().await;
    mock.array().add_volume("00001", "vol-1", 100, &[]);
    mock.array().induce(|e| e.job_failed = true);
    let client = client_for(&mock);

    client
        .create_storage_group(&sym(), "fail-sg", "SRP_1", "Bronze")
        .await
        .unwrap();

    let err = client
        .add_volumes_to_storage_group(&sym(), "fail-sg", false, &["00001".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Job(JobError::Failed { .. })), "got {err:?}");
}

#[tokio::test]
async fn test_unknown_job_is_not_found() {
    let mock = MockUnisphere::start().await;
    let client = client_for(&mock);

    let err = client
        .get_job_by_id(&sym(), "no-such-job")
        .await
        .unwrap_err();
    match err {
        Error::Job(JobError::NotFound { job_id }) => assert_eq!(job_id, "no-such-job"),
        other => panic!("expected not-found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rename_and_expand_volume() {
    let mock = MockUnisphere::start().await;
    mock.array().add_volume("00001", "old-name", 100, &[]);
    let client = client_for(&mock);

    let volume = client
        .rename_volume(&sym(), "00001", "new-name")
        .await
        .unwrap();
    assert_eq!(volume.volume_identifier, "new-name");

    let volume = client.expand_volume(&sym(), "00001", 250).await.unwrap();
    assert_eq!(volume.capacity_cyl, 250);
}

#[tokio::test]
async fn test_deallocation_job_runs_to_completion() {
    let mock = MockUnisphere::start().await;
    mock.array().add_volume("00001", "vol-1", 100, &[]);
    let client = client_for(&mock);

    let job = client
        .initiate_deallocation_of_tracks(&sym(), "00001")
        .await
        .unwrap();
    let job = client
        .wait_on_job_completion(&sym(), &job.job_id)
        .await
        .unwrap();
    assert!(job.status.is_terminal());
    let (_, resource_type, resource_id) = job.resource_link_parts().unwrap();
    assert_eq!(resource_type, "volume");
    assert_eq!(resource_id, "00001");
}

#[tokio::test]
async fn test_masking_view_flow() {
    let mock = MockUnisphere::start().await;
    mock.array().add_initiator("iqn.1993-08.org.debian:01:aa", "iSCSI");
    mock.array().add_volume("00001", "vol-1", 100, &["mv-sg"]);
    let client = client_for(&mock);

    let host = client
        .create_host(
            &sym(),
            "csi-host",
            &["iqn.1993-08.org.debian:01:aa".to_string()],
            None,
        )
        .await
        .unwrap();
    assert_eq!(host.num_of_initiators, 1);

    let ports = vec![PortKey {
        director_id: "FA-1D".to_string(),
        port_id: "4".to_string(),
    }];
    client
        .create_port_group(&sym(), "csi-pg", &ports)
        .await
        .unwrap();

    let view = client
        .create_masking_view(&sym(), "csi-mv", "mv-sg", "csi-host", true, "csi-pg")
        .await
        .unwrap();
    assert_eq!(view.storage_group_id, "mv-sg");
    assert_eq!(view.host_id, "csi-host");

    let connections = client
        .get_masking_view_connections(&sym(), "csi-mv", "")
        .await
        .unwrap();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].volume_id, "00001");

    client.delete_masking_view(&sym(), "csi-mv").await.unwrap();
    let views = client.get_masking_view_list(&sym()).await.unwrap();
    assert!(views.masking_view_ids.is_empty());
}

#[tokio::test]
async fn test_snapshot_flow() {
    let mock = MockUnisphere::start().await;
    mock.array().add_volume("00001", "vol-1", 100, &[]);
    let client = client_for(&mock);

    client
        .create_snapshot(&sym(), "nightly", &["00001".to_string()], None)
        .await
        .unwrap();

    let info = client.get_volume_snap_info(&sym(), "00001").await.unwrap();
    assert_eq!(info.snapshot_srcs.len(), 1);
    assert_eq!(info.snapshot_srcs[0].snapshot_name, "nightly");

    let snap = client
        .get_snapshot_info(&sym(), "00001", "nightly")
        .await
        .unwrap();
    assert_eq!(snap.state, "Established");

    client
        .delete_snapshot(&sym(), "nightly", &["00001".to_string()], 0)
        .await
        .unwrap();
    let info = client.get_volume_snap_info(&sym(), "00001").await.unwrap();
    assert!(info.snapshot_srcs.is_empty());
}

#[tokio::test]
async fn test_allowed_arrays_gate() {
    let mock = MockUnisphere::start().await;
    let mut client = client_for(&mock);
    client.set_allowed_arrays(vec![SymId::new("000197900099").unwrap()]);

    let err = client.get_symmetrix(&sym()).await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
}

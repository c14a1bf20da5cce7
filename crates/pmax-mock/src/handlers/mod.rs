//! HTTP surface of the mock Unisphere.
//!
//! Each submodule handles the endpoints of one resource family. Routes
//! mirror the Unisphere REST layout the client addresses.

mod host;
mod iterator;
mod masking;
mod snapshot;
mod storage_group;
mod system;
mod volume;

use axum::{
    Router,
    routing::{delete, get},
};
use tower_http::trace::TraceLayer;

use crate::store::MockArray;

/// Create the mock server router over one array store.
pub fn router(array: MockArray) -> Router {
    let slo = "/univmax/restapi/{version}/sloprovisioning/symmetrix/{symId}";
    let sys = "/univmax/restapi/{version}/system/symmetrix";
    let replication = "/univmax/restapi/{version}/replication/symmetrix/{symId}";

    Router::new()
        .route("/univmax/restapi/version", get(system::version))
        // System
        .route(sys, get(system::list_symmetrix))
        .route(&format!("{sys}/{{symId}}"), get(system::get_symmetrix))
        .route(&format!("{sys}/{{symId}}/job"), get(system::list_jobs))
        .route(
            &format!("{sys}/{{symId}}/job/{{jobId}}"),
            get(system::get_job),
        )
        // SLO provisioning
        .route(&format!("{slo}/srp"), get(system::list_storage_pools))
        .route(
            &format!("{slo}/srp/{{srpId}}"),
            get(system::get_storage_pool),
        )
        .route(&format!("{slo}/volume"), get(volume::list_volumes))
        .route(
            &format!("{slo}/volume/{{volId}}"),
            get(volume::get_volume)
                .put(volume::edit_volume)
                .delete(volume::delete_volume),
        )
        .route(
            &format!("{slo}/storagegroup"),
            get(storage_group::list_storage_groups).post(storage_group::create_storage_group),
        )
        .route(
            &format!("{slo}/storagegroup/{{sgId}}"),
            get(storage_group::get_storage_group)
                .put(storage_group::update_storage_group)
                .delete(storage_group::delete_storage_group),
        )
        .route(
            &format!("{slo}/host"),
            get(host::list_hosts).post(host::create_host),
        )
        .route(
            &format!("{slo}/host/{{hostId}}"),
            get(host::get_host).put(host::update_host).delete(host::delete_host),
        )
        .route(&format!("{slo}/initiator"), get(host::list_initiators))
        .route(
            &format!("{slo}/initiator/{{initId}}"),
            get(host::get_initiator),
        )
        .route(
            &format!("{slo}/portgroup"),
            get(masking::list_port_groups).post(masking::create_port_group),
        )
        .route(
            &format!("{slo}/portgroup/{{pgId}}"),
            get(masking::get_port_group)
                .put(masking::update_port_group)
                .delete(masking::delete_port_group),
        )
        .route(
            &format!("{slo}/maskingview"),
            get(masking::list_masking_views).post(masking::create_masking_view),
        )
        .route(
            &format!("{slo}/maskingview/{{mvId}}"),
            get(masking::get_masking_view).delete(masking::delete_masking_view),
        )
        .route(
            &format!("{slo}/maskingview/{{mvId}}/connections"),
            get(masking::get_masking_view_connections),
        )
        // Replication
        .route(
            &format!("{replication}/volume/{{volId}}/snapshot"),
            get(snapshot::get_volume_snap_info),
        )
        .route(
            &format!("{replication}/volume/{{volId}}/snapshot/{{snapName}}"),
            get(snapshot::get_snapshot_info),
        )
        .route(
            &format!("{replication}/snapshot/{{snapName}}"),
            axum::routing::post(snapshot::create_snapshot)
                .put(snapshot::modify_snapshot)
                .delete(snapshot::delete_snapshot),
        )
        // Version-independent iterator resource
        .route(
            "/univmax/restapi/common/Iterator/{iterId}/page",
            get(iterator::get_page),
        )
        .route(
            "/univmax/restapi/common/Iterator/{iterId}",
            delete(iterator::delete_iterator),
        )
        .with_state(array)
        .layer(TraceLayer::new_for_http())
}

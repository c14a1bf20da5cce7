//! Iterator paging tests against a wiremock Unisphere.
//!
//! These tests exercise the drain loop: page-range arithmetic, the
//! single-page delete skip, the exactly-one-delete rule for multi-page
//! results, and desync detection.

use pmax_core::error::IteratorError;
use pmax_core::resources::iterator::{VolumeIdEntry, VolumeResultList};
use pmax_core::{Credentials, EndpointUrl, Error, SymId, VolumeIterator};
use pmax_rest::{Client, ConfigConnect};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

const SYM: &str = "000197900046";
const MAX_PAGE_SIZE: u32 = 10;

fn test_client(server: &MockServer) -> Client {
    let endpoint =
        EndpointUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    Client::new(ConfigConnect::new(endpoint, Credentials::new("smc", "smc"))).unwrap()
}

fn sym() -> SymId {
    SymId::new(SYM).unwrap()
}

fn volume_ids(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{:05}", i)).collect()
}

/// Body of a listing response: iterator metadata plus the inline first
/// page.
fn iterator_body(id: &str, declared_count: u32, ids: &[String]) -> serde_json::Value {
    let first_page = ids.len().min(MAX_PAGE_SIZE as usize);
    json!({
        "id": id,
        "count": declared_count,
        "maxPageSize": MAX_PAGE_SIZE,
        "expirationTime": 0,
        "resultList": {
            "from": 1,
            "to": first_page as u32,
            "result": ids[..first_page]
                .iter()
                .map(|v| json!({"volumeId": v}))
                .collect::<Vec<_>>(),
        }
    })
}

/// Serves iterator pages from a fixed id list, truncating at the real
/// element count the way a desynced server would.
struct PageResponder {
    ids: Vec<String>,
}

impl Respond for PageResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let param = |name: &str| {
            request
                .url
                .query_pairs()
                .find(|(n, _)| n == name)
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0)
        };
        let from = param("from");
        let to = param("to").min(self.ids.len());

        let result: Vec<_> = if from >= 1 && from <= to {
            self.ids[from - 1..to]
                .iter()
                .map(|v| json!({"volumeId": v}))
                .collect()
        } else {
            Vec::new()
        };
        ResponseTemplate::new(200).set_body_json(json!({
            "from": from,
            "to": to,
            "result": result,
        }))
    }
}

fn listing_path() -> String {
    format!("/univmax/restapi/100/sloprovisioning/symmetrix/{SYM}/volume")
}

fn page_path(iter_id: &str) -> String {
    format!("/univmax/restapi/common/Iterator/{iter_id}/page")
}

fn iterator_path(iter_id: &str) -> String {
    format!("/univmax/restapi/common/Iterator/{iter_id}")
}

async fn mount_iterator(server: &MockServer, iter_id: &str, declared_count: u32, ids: Vec<String>) {
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(iterator_body(iter_id, declared_count, &ids)),
        )
        .expect(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(page_path(iter_id)))
        .respond_with(PageResponder { ids })
        .mount(server)
        .await;
}

// ============================================================================
// Drain Completeness
// ============================================================================

#[tokio::test]
async fn test_drain_returns_all_ids_in_order() {
    // Counts around the page-size boundaries.
    for count in [0u32, 1, MAX_PAGE_SIZE, MAX_PAGE_SIZE + 1, 3 * MAX_PAGE_SIZE + 2] {
        let server = MockServer::start().await;
        let ids = volume_ids(count as usize);
        mount_iterator(&server, "iter-drain", count, ids.clone()).await;
        Mock::given(method("DELETE"))
            .and(path(iterator_path("iter-drain")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let drained = client.get_volume_id_list(&sym(), "", false).await.unwrap();
        assert_eq!(drained, ids, "count {count}");
    }
}

// ============================================================================
// Iterator Release
// ============================================================================

#[tokio::test]
async fn test_single_page_result_skips_delete() {
    let server = MockServer::start().await;
    mount_iterator(&server, "iter-small", 7, volume_ids(7)).await;
    // No server-side cursor persists for single-page results.
    Mock::given(method("DELETE"))
        .and(path(iterator_path("iter-small")))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let drained = client.get_volume_id_list(&sym(), "", false).await.unwrap();
    assert_eq!(drained.len(), 7);
}

#[tokio::test]
async fn test_multi_page_result_deletes_iterator_once() {
    // count=25, maxPageSize=10: inline [1,10], then pages [11,20] and
    // [21,25], and exactly one DELETE afterwards.
    let server = MockServer::start().await;
    let ids = volume_ids(25);

    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(iterator_body("iter-25", 25, &ids)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(page_path("iter-25")))
        .and(query_param("from", "11"))
        .and(query_param("to", "20"))
        .respond_with(PageResponder { ids: ids.clone() })
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(page_path("iter-25")))
        .and(query_param("from", "21"))
        .and(query_param("to", "25"))
        .respond_with(PageResponder { ids: ids.clone() })
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(iterator_path("iter-25")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let drained = client.get_volume_id_list(&sym(), "", false).await.unwrap();
    assert_eq!(drained, ids);
}

#[tokio::test]
async fn test_delete_failure_is_not_propagated() {
    let server = MockServer::start().await;
    mount_iterator(&server, "iter-gone", 12, volume_ids(12)).await;
    // Cursor release is best-effort; a 404 on delete is acceptable.
    Mock::given(method("DELETE"))
        .and(path(iterator_path("iter-gone")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let drained = client.get_volume_id_list(&sym(), "", false).await.unwrap();
    assert_eq!(drained.len(), 12);
}

// ============================================================================
// Desync Detection
// ============================================================================

#[tokio::test]
async fn test_declared_count_beyond_elements_is_a_mismatch() {
    let server = MockServer::start().await;
    // The iterator claims 30 elements but the server only ever produces 25.
    mount_iterator(&server, "iter-desync", 30, volume_ids(25)).await;
    Mock::given(method("DELETE"))
        .and(path(iterator_path("iter-desync")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.get_volume_id_list(&sym(), "", false).await.unwrap_err();
    match err {
        Error::Iterator(IteratorError::CountMismatch { expected, actual }) => {
            assert_eq!(expected, 30);
            assert_eq!(actual, 25);
        }
        other => panic!("expected count mismatch, got {other:?}"),
    }
}

// ============================================================================
// Page Range Arithmetic
// ============================================================================

#[tokio::test]
async fn test_page_range_defaults_and_clamps() {
    let server = MockServer::start().await;
    let ids = volume_ids(25);
    Mock::given(method("GET"))
        .and(path(page_path("iter-page")))
        .and(query_param("from", "21"))
        .and(query_param("to", "25"))
        .respond_with(PageResponder { ids })
        .expect(1)
        .mount(&server)
        .await;

    let iterator = VolumeIterator {
        id: "iter-page".to_string(),
        count: 25,
        max_page_size: MAX_PAGE_SIZE,
        expiration_time: 0,
        result_list: VolumeResultList::default(),
    };

    let client = test_client(&server);
    // Default end is from + maxPageSize - 1 = 30, clamped to count = 25.
    let page = client
        .get_volume_ids_iterator_page(&iterator, 21, None)
        .await
        .unwrap();
    assert_eq!(page, volume_ids(25)[20..].to_vec());
}

#[tokio::test]
async fn test_page_beyond_count_is_a_range_error() {
    let server = MockServer::start().await;
    let iterator = VolumeIterator {
        id: "iter-range".to_string(),
        count: 25,
        max_page_size: MAX_PAGE_SIZE,
        expiration_time: 0,
        result_list: VolumeResultList {
            from: 1,
            to: 10,
            volumes: volume_ids(10)
                .into_iter()
                .map(|volume_id| VolumeIdEntry { volume_id })
                .collect(),
        },
    };

    let client = test_client(&server);
    let err = client
        .get_volume_ids_iterator_page(&iterator, 26, None)
        .await
        .unwrap_err();
    match err {
        Error::Iterator(IteratorError::RangeOutOfBounds { from, count }) => {
            assert_eq!(from, 26);
            assert_eq!(count, 25);
        }
        other => panic!("expected range error, got {other:?}"),
    }
}

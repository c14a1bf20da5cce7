//! Mock server lifecycle.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::handlers::router;
use crate::store::MockArray;

/// A running mock Unisphere bound to an ephemeral loopback port.
///
/// The server task is aborted when this handle is dropped. Intended for
/// tests, so bind and serve failures panic rather than propagate.
#[derive(Debug)]
pub struct MockUnisphere {
    addr: SocketAddr,
    array: MockArray,
    task: JoinHandle<()>,
}

impl MockUnisphere {
    /// Start a server over a freshly seeded array store.
    pub async fn start() -> Self {
        Self::start_with_array(MockArray::new()).await
    }

    /// Start a server over an existing store.
    pub async fn start_with_array(array: MockArray) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock Unisphere listener");
        let addr = listener.local_addr().expect("listener has no local addr");
        debug!(%addr, "mock Unisphere listening");

        let app = router(array.clone());
        let task = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                debug!(error = %err, "mock Unisphere server stopped");
            }
        });

        Self { addr, array, task }
    }

    /// Base URL of the running server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Handle to the array store, for seeding data and inducing errors.
    pub fn array(&self) -> &MockArray {
        &self.array
    }
}

impl Drop for MockUnisphere {
    fn drop(&mut self) {
        self.task.abort();
    }
}

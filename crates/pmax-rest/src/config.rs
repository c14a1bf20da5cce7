//! Client connection configuration.

use std::time::Duration;

use pmax_core::{Credentials, EndpointUrl, SymId};

/// The Unisphere REST API version requested when none is configured.
pub const DEFAULT_API_VERSION: &str = "100";

/// Connection settings for a [`crate::Client`].
///
/// Timeout knobs bound the two kinds of waiting the client does: a single
/// HTTP round-trip (`request_timeout`) and the overall poll loop for an
/// asynchronous job (`job_wait_timeout`, paced by `job_poll_interval`).
#[derive(Clone, Debug)]
pub struct ConfigConnect {
    /// Unisphere endpoint base URL.
    pub endpoint: EndpointUrl,
    /// Basic-auth credentials.
    pub credentials: Credentials,
    /// REST API version segment, e.g. `"100"`.
    pub version: String,
    /// Per-request timeout applied at the HTTP layer.
    pub request_timeout: Duration,
    /// Sleep between successive job polls.
    pub job_poll_interval: Duration,
    /// Overall deadline for waiting on one job to reach a terminal status.
    pub job_wait_timeout: Duration,
    /// Arrays this client may operate on. Empty allows all arrays.
    pub allowed_arrays: Vec<SymId>,
}

impl ConfigConnect {
    /// Create a configuration with default version and timeouts.
    pub fn new(endpoint: EndpointUrl, credentials: Credentials) -> Self {
        Self {
            endpoint,
            credentials,
            version: DEFAULT_API_VERSION.to_string(),
            request_timeout: Duration::from_secs(120),
            job_poll_interval: Duration::from_secs(1),
            job_wait_timeout: Duration::from_secs(180),
            allowed_arrays: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConfigConnect::new(
            EndpointUrl::new("https://unisphere.example.com").unwrap(),
            Credentials::new("smc", "smc"),
        );
        assert_eq!(config.version, "100");
        assert_eq!(config.job_poll_interval, Duration::from_secs(1));
        assert!(config.allowed_arrays.is_empty());
    }
}

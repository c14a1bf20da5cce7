//! Unisphere client construction and shared plumbing.

use tracing::{debug, info, instrument};

use pmax_core::error::InvalidInputError;
use pmax_core::resources::symmetrix::Version;
use pmax_core::{Result, SymId};

use crate::config::ConfigConnect;
use crate::rest::RestClient;

/// A client for one Unisphere for PowerMax instance.
///
/// Cheap to clone; clones share the underlying connection pool. Each
/// operation is an independent request/response exchange — the client
/// holds no per-operation state, so concurrent use on different jobs or
/// iterators is safe.
#[derive(Debug, Clone)]
pub struct Client {
    config: ConfigConnect,
    rest: RestClient,
}

impl Client {
    /// Build a client from connection settings.
    ///
    /// No network traffic is issued; call [`Client::authenticate`] to
    /// verify connectivity and credentials.
    pub fn new(config: ConfigConnect) -> Result<Self> {
        let rest = RestClient::new(
            config.endpoint.clone(),
            config.credentials.clone(),
            config.request_timeout,
        )?;
        Ok(Self { config, rest })
    }

    /// Returns the connection settings this client was built from.
    pub fn config(&self) -> &ConfigConnect {
        &self.config
    }

    pub(crate) fn rest(&self) -> &RestClient {
        &self.rest
    }

    /// Verify connectivity and credentials against the version endpoint.
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn authenticate(&self) -> Result<()> {
        let version: Version = self.rest.get("/univmax/restapi/version").await?;
        info!(version = %version.version, "authenticated against Unisphere");
        Ok(())
    }

    /// Replace the set of arrays this client may operate on.
    ///
    /// An empty list allows all arrays.
    pub fn set_allowed_arrays(&mut self, arrays: Vec<SymId>) {
        self.config.allowed_arrays = arrays;
    }

    /// Returns the arrays this client may operate on.
    pub fn allowed_arrays(&self) -> &[SymId] {
        &self.config.allowed_arrays
    }

    /// True when the array may be operated on by this client.
    pub fn is_allowed_array(&self, sym_id: &SymId) -> bool {
        self.config.allowed_arrays.is_empty() || self.config.allowed_arrays.contains(sym_id)
    }

    pub(crate) fn ensure_allowed(&self, sym_id: &SymId) -> Result<()> {
        if self.is_allowed_array(sym_id) {
            Ok(())
        } else {
            debug!(%sym_id, "array rejected by allowed-arrays filter");
            Err(InvalidInputError::ArrayNotAllowed {
                sym_id: sym_id.to_string(),
            }
            .into())
        }
    }

    fn version_prefix(&self) -> String {
        format!("/univmax/restapi/{}", self.config.version)
    }

    /// Path under the SLO provisioning family for one array.
    pub(crate) fn slo_path(&self, sym_id: &SymId, suffix: &str) -> String {
        format!(
            "{}/sloprovisioning/symmetrix/{}{}",
            self.version_prefix(),
            sym_id,
            suffix
        )
    }

    /// Path under the system family for one array.
    pub(crate) fn system_path(&self, sym_id: &SymId, suffix: &str) -> String {
        format!(
            "{}/system/symmetrix/{}{}",
            self.version_prefix(),
            sym_id,
            suffix
        )
    }

    /// Path under the system family without an array id.
    pub(crate) fn system_root_path(&self, suffix: &str) -> String {
        format!("{}/system/symmetrix{}", self.version_prefix(), suffix)
    }

    /// Path under the replication family for one array.
    pub(crate) fn replication_path(&self, sym_id: &SymId, suffix: &str) -> String {
        format!(
            "{}/replication/symmetrix/{}{}",
            self.version_prefix(),
            sym_id,
            suffix
        )
    }

    /// Version-independent path addressing a server-side iterator.
    pub(crate) fn iterator_path(&self, iterator_id: &str, suffix: &str) -> String {
        format!("/univmax/restapi/common/Iterator/{}{}", iterator_id, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmax_core::{Credentials, EndpointUrl};

    fn client() -> Client {
        let config = ConfigConnect::new(
            EndpointUrl::new("https://unisphere.example.com").unwrap(),
            Credentials::new("smc", "smc"),
        );
        Client::new(config).unwrap()
    }

    #[test]
    fn slo_path_layout() {
        let sym = SymId::new("000197900046").unwrap();
        assert_eq!(
            client().slo_path(&sym, "/volume"),
            "/univmax/restapi/100/sloprovisioning/symmetrix/000197900046/volume"
        );
    }

    #[test]
    fn iterator_path_is_version_independent() {
        assert_eq!(
            client().iterator_path("iter-1", "/page"),
            "/univmax/restapi/common/Iterator/iter-1/page"
        );
    }

    #[test]
    fn allowed_arrays_empty_allows_all() {
        let sym = SymId::new("000197900046").unwrap();
        assert!(client().is_allowed_array(&sym));
    }

    #[test]
    fn allowed_arrays_filters() {
        let mut client = client();
        let allowed = SymId::new("000197900046").unwrap();
        let other = SymId::new("000197900047").unwrap();
        client.set_allowed_arrays(vec![allowed.clone()]);
        assert!(client.is_allowed_array(&allowed));
        assert!(!client.is_allowed_array(&other));
        assert!(client.ensure_allowed(&other).is_err());
    }
}

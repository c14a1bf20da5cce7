//! Host and initiator operations.

use std::collections::HashSet;

use tracing::{debug, instrument};

use pmax_core::error::InvalidInputError;
use pmax_core::resources::host::{
    ChangeInitiatorParam, CreateHostParam, EditHostActionParam, Host, HostFlags, HostList,
    UpdateHostParam,
};
use pmax_core::resources::initiator::{Initiator, InitiatorList};
use pmax_core::resources::storage_group::ExecutionOption;
use pmax_core::{Result, SymId};

use crate::client::Client;

impl Client {
    /// List all host ids on an array.
    #[instrument(skip(self))]
    pub async fn get_host_list(&self, sym_id: &SymId) -> Result<HostList> {
        self.ensure_allowed(sym_id)?;
        self.rest().get(&self.slo_path(sym_id, "/host")).await
    }

    /// Get one host by id.
    #[instrument(skip(self))]
    pub async fn get_host(&self, sym_id: &SymId, host_id: &str) -> Result<Host> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.slo_path(sym_id, &format!("/host/{}", host_id)))
            .await
    }

    /// Create a host from a list of initiator ids.
    ///
    /// Initiator ids are bare IQN strings or FC WWNs without port
    /// designations; an initiator may belong to at most one host.
    #[instrument(skip(self, host_flags))]
    pub async fn create_host(
        &self,
        sym_id: &SymId,
        host_id: &str,
        initiator_ids: &[String],
        host_flags: Option<HostFlags>,
    ) -> Result<Host> {
        self.ensure_allowed(sym_id)?;
        if initiator_ids.is_empty() {
            return Err(InvalidInputError::Other {
                message: "at least one initiator id has to be specified".to_string(),
            }
            .into());
        }
        let payload = CreateHostParam {
            host_id: host_id.to_string(),
            initiator_ids: initiator_ids.to_vec(),
            host_flags,
            execution_option: ExecutionOption::Synchronous,
        };
        self.rest()
            .post(&self.slo_path(sym_id, "/host"), &payload)
            .await
    }

    /// Reconcile a host's initiator membership with the given list.
    ///
    /// Computes the additions and removals against the host's current
    /// initiators and issues one update per direction, returning the
    /// refreshed host.
    #[instrument(skip(self, host))]
    pub async fn update_host_initiators(
        &self,
        sym_id: &SymId,
        host: &Host,
        initiator_ids: &[String],
    ) -> Result<Host> {
        self.ensure_allowed(sym_id)?;
        let current: HashSet<&str> = host.initiators.iter().map(String::as_str).collect();
        let wanted: HashSet<&str> = initiator_ids.iter().map(String::as_str).collect();

        let to_add: Vec<String> = wanted
            .difference(&current)
            .map(|s| s.to_string())
            .collect();
        let to_remove: Vec<String> = current
            .difference(&wanted)
            .map(|s| s.to_string())
            .collect();

        let path = self.slo_path(sym_id, &format!("/host/{}", host.host_id));
        if !to_add.is_empty() {
            debug!(host = host.host_id, ?to_add, "adding initiators");
            let payload = UpdateHostParam {
                edit_host_action_param: EditHostActionParam {
                    add_initiator_param: Some(ChangeInitiatorParam { initiators: to_add }),
                    remove_initiator_param: None,
                },
                execution_option: ExecutionOption::Synchronous,
            };
            self.rest().put_no_response(&path, &payload).await?;
        }
        if !to_remove.is_empty() {
            debug!(host = host.host_id, ?to_remove, "removing initiators");
            let payload = UpdateHostParam {
                edit_host_action_param: EditHostActionParam {
                    add_initiator_param: None,
                    remove_initiator_param: Some(ChangeInitiatorParam {
                        initiators: to_remove,
                    }),
                },
                execution_option: ExecutionOption::Synchronous,
            };
            self.rest().put_no_response(&path, &payload).await?;
        }

        self.get_host(sym_id, &host.host_id).await
    }

    /// Delete a host.
    #[instrument(skip(self))]
    pub async fn delete_host(&self, sym_id: &SymId, host_id: &str) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .delete(&self.slo_path(sym_id, &format!("/host/{}", host_id)))
            .await
    }

    /// List initiator ids, optionally filtered.
    ///
    /// `initiator_hba` filters on the HBA portion of the id; `iscsi`
    /// restricts the transport type; `in_host` restricts to initiators
    /// already assigned to a host.
    #[instrument(skip(self))]
    pub async fn get_initiator_list(
        &self,
        sym_id: &SymId,
        initiator_hba: &str,
        iscsi: bool,
        in_host: bool,
    ) -> Result<InitiatorList> {
        self.ensure_allowed(sym_id)?;
        let mut params: Vec<String> = Vec::new();
        if !initiator_hba.is_empty() {
            params.push(format!("initiator_hba={}", initiator_hba));
        }
        if iscsi {
            params.push("iscsi=true".to_string());
        }
        if in_host {
            params.push("in_a_host=true".to_string());
        }
        let suffix = if params.is_empty() {
            "/initiator".to_string()
        } else {
            format!("/initiator?{}", params.join("&"))
        };
        self.rest().get(&self.slo_path(sym_id, &suffix)).await
    }

    /// Get one initiator by id.
    #[instrument(skip(self))]
    pub async fn get_initiator(&self, sym_id: &SymId, initiator_id: &str) -> Result<Initiator> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.slo_path(sym_id, &format!("/initiator/{}", initiator_id)))
            .await
    }
}

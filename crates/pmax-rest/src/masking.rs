//! Port group and masking view operations.

use tracing::instrument;

use pmax_core::resources::masking_view::{
    HostOrHostGroupSelection, MaskingView, MaskingViewConnection, MaskingViewConnectionsResult,
    MaskingViewCreateParam, MaskingViewList, PortGroupSelection, StorageGroupSelection,
    UseExistingHostGroupParam, UseExistingHostParam, UseExistingPortGroupParam,
    UseExistingStorageGroupParam,
};
use pmax_core::resources::port_group::{
    ChangePortParam, CreatePortGroupParams, EditPortGroupActionParam, EditPortGroupParam,
    PortGroup, PortGroupList, PortKey,
};
use pmax_core::resources::storage_group::ExecutionOption;
use pmax_core::{Result, SymId};

use crate::client::Client;

impl Client {
    /// List port group ids, optionally filtered by type (`"Fibre"` or
    /// `"iSCSI"`).
    #[instrument(skip(self))]
    pub async fn get_port_group_list(
        &self,
        sym_id: &SymId,
        port_group_type: &str,
    ) -> Result<PortGroupList> {
        self.ensure_allowed(sym_id)?;
        let suffix = if port_group_type.is_empty() {
            "/portgroup".to_string()
        } else {
            format!("/portgroup?type={}", port_group_type)
        };
        self.rest().get(&self.slo_path(sym_id, &suffix)).await
    }

    /// Get one port group by id.
    #[instrument(skip(self))]
    pub async fn get_port_group(&self, sym_id: &SymId, port_group_id: &str) -> Result<PortGroup> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.slo_path(sym_id, &format!("/portgroup/{}", port_group_id)))
            .await
    }

    /// Create a port group over the given director/port pairs.
    #[instrument(skip(self, dir_ports))]
    pub async fn create_port_group(
        &self,
        sym_id: &SymId,
        port_group_id: &str,
        dir_ports: &[PortKey],
    ) -> Result<PortGroup> {
        self.ensure_allowed(sym_id)?;
        let payload = CreatePortGroupParams {
            port_group_id: port_group_id.to_string(),
            symmetrix_port_key: dir_ports.to_vec(),
            execution_option: ExecutionOption::Synchronous,
        };
        self.rest()
            .post(&self.slo_path(sym_id, "/portgroup"), &payload)
            .await
    }

    /// Replace a port group's membership with the given ports.
    ///
    /// Issues an add for ports missing from the group and a remove for
    /// ports no longer wanted, then returns the refreshed group.
    #[instrument(skip(self, ports))]
    pub async fn update_port_group(
        &self,
        sym_id: &SymId,
        port_group_id: &str,
        ports: &[PortKey],
    ) -> Result<PortGroup> {
        self.ensure_allowed(sym_id)?;
        let current = self.get_port_group(sym_id, port_group_id).await?;

        let to_add: Vec<PortKey> = ports
            .iter()
            .filter(|p| !current.symmetrix_port_key.contains(p))
            .cloned()
            .collect();
        let to_remove: Vec<PortKey> = current
            .symmetrix_port_key
            .iter()
            .filter(|p| !ports.contains(p))
            .cloned()
            .collect();

        let path = self.slo_path(sym_id, &format!("/portgroup/{}", port_group_id));
        if !to_add.is_empty() {
            let payload = EditPortGroupParam {
                edit_port_group_action_param: EditPortGroupActionParam {
                    add_port_param: Some(ChangePortParam { ports: to_add }),
                    remove_port_param: None,
                },
                execution_option: ExecutionOption::Synchronous,
            };
            self.rest().put_no_response(&path, &payload).await?;
        }
        if !to_remove.is_empty() {
            let payload = EditPortGroupParam {
                edit_port_group_action_param: EditPortGroupActionParam {
                    add_port_param: None,
                    remove_port_param: Some(ChangePortParam { ports: to_remove }),
                },
                execution_option: ExecutionOption::Synchronous,
            };
            self.rest().put_no_response(&path, &payload).await?;
        }

        self.get_port_group(sym_id, port_group_id).await
    }

    /// Delete a port group.
    #[instrument(skip(self))]
    pub async fn delete_port_group(&self, sym_id: &SymId, port_group_id: &str) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .delete(&self.slo_path(sym_id, &format!("/portgroup/{}", port_group_id)))
            .await
    }

    /// List all masking view ids on an array.
    #[instrument(skip(self))]
    pub async fn get_masking_view_list(&self, sym_id: &SymId) -> Result<MaskingViewList> {
        self.ensure_allowed(sym_id)?;
        self.rest().get(&self.slo_path(sym_id, "/maskingview")).await
    }

    /// Get one masking view by id.
    #[instrument(skip(self))]
    pub async fn get_masking_view(
        &self,
        sym_id: &SymId,
        masking_view_id: &str,
    ) -> Result<MaskingView> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .get(&self.slo_path(sym_id, &format!("/maskingview/{}", masking_view_id)))
            .await
    }

    /// Create a masking view binding a storage group, a host (or host
    /// group), and a port group.
    #[instrument(skip(self))]
    pub async fn create_masking_view(
        &self,
        sym_id: &SymId,
        masking_view_id: &str,
        storage_group_id: &str,
        host_or_host_group_id: &str,
        is_host: bool,
        port_group_id: &str,
    ) -> Result<MaskingView> {
        self.ensure_allowed(sym_id)?;
        let host_selection = if is_host {
            HostOrHostGroupSelection {
                use_existing_host_param: Some(UseExistingHostParam {
                    host_id: host_or_host_group_id.to_string(),
                }),
                use_existing_host_group_param: None,
            }
        } else {
            HostOrHostGroupSelection {
                use_existing_host_param: None,
                use_existing_host_group_param: Some(UseExistingHostGroupParam {
                    host_group_id: host_or_host_group_id.to_string(),
                }),
            }
        };
        let payload = MaskingViewCreateParam {
            masking_view_id: masking_view_id.to_string(),
            host_or_host_group_selection: host_selection,
            port_group_selection: PortGroupSelection {
                use_existing_port_group_param: UseExistingPortGroupParam {
                    port_group_id: port_group_id.to_string(),
                },
            },
            storage_group_selection: StorageGroupSelection {
                use_existing_storage_group_param: UseExistingStorageGroupParam {
                    storage_group_id: storage_group_id.to_string(),
                },
            },
        };
        self.rest()
            .post(&self.slo_path(sym_id, "/maskingview"), &payload)
            .await
    }

    /// Delete a masking view.
    #[instrument(skip(self))]
    pub async fn delete_masking_view(
        &self,
        sym_id: &SymId,
        masking_view_id: &str,
    ) -> Result<()> {
        self.ensure_allowed(sym_id)?;
        self.rest()
            .delete(&self.slo_path(sym_id, &format!("/maskingview/{}", masking_view_id)))
            .await
    }

    /// List the connections of a masking view, optionally for one volume.
    #[instrument(skip(self))]
    pub async fn get_masking_view_connections(
        &self,
        sym_id: &SymId,
        masking_view_id: &str,
        volume_id: &str,
    ) -> Result<Vec<MaskingViewConnection>> {
        self.ensure_allowed(sym_id)?;
        let mut suffix = format!("/maskingview/{}/connections", masking_view_id);
        if !volume_id.is_empty() {
            suffix.push_str(&format!("?volume_id={}", volume_id));
        }
        let result: MaskingViewConnectionsResult =
            self.rest().get(&self.slo_path(sym_id, &suffix)).await?;
        Ok(result.connections)
    }
}

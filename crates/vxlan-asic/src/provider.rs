//! The VXLAN capability-provider trait.

use crate::error::AsicStatus;
use crate::types::{LogicalSwitchAction, LogicalSwitchNode, TunnelKey, VlanId};

/// Hardware-programming operations for the VXLAN overlay.
///
/// A provider implements the full set: registration is all-or-nothing, so a
/// resolved handle never needs per-operation presence checks. A provider that
/// cannot program a particular operation reports
/// [`AsicStatus::NotSupported`] from the call instead.
///
/// All operations are synchronous from the caller's perspective; a provider
/// that programs hardware asynchronously owns that complexity behind this
/// boundary.
pub trait VxlanAsicOps: Send + Sync {
    /// Adds, modifies, or deletes the logical switch described by `node` on
    /// the named bridge.
    fn set_logical_switch(
        &self,
        bridge: &str,
        action: LogicalSwitchAction,
        node: &LogicalSwitchNode,
    ) -> AsicStatus;

    /// Binds a single port carrying `vlan_id` to the overlay segment
    /// `tunnel_key`.
    fn vport_bind_port_on_vlan(
        &self,
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
        port: &str,
    ) -> AsicStatus;

    /// Unbinds a single port carrying `vlan_id` from the overlay segment
    /// `tunnel_key`.
    fn vport_unbind_port_on_vlan(
        &self,
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
        port: &str,
    ) -> AsicStatus;

    /// Binds every port on `vlan_id` to the overlay segment `tunnel_key`.
    fn vport_bind_all_ports_on_vlan(&self, tunnel_key: TunnelKey, vlan_id: VlanId) -> AsicStatus;

    /// Unbinds every port on `vlan_id` from the overlay segment `tunnel_key`.
    fn vport_unbind_all_ports_on_vlan(&self, tunnel_key: TunnelKey, vlan_id: VlanId) -> AsicStatus;
}

impl std::fmt::Debug for dyn VxlanAsicOps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn VxlanAsicOps")
    }
}

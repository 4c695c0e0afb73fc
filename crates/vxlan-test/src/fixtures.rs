//! Row and snapshot fixtures for common overlay test setups.

use vxlan_asic::{TunnelKey, VlanId};
use vxlan_orch_common::{ChangeFlags, LogicalSwitchRow, PortRow, VlanRef, VlanRow};

/// A logical-switch row freshly inserted for `bridge`.
pub fn inserted_switch(bridge: &str, tunnel_key: TunnelKey, name: &str) -> LogicalSwitchRow {
    LogicalSwitchRow::new(bridge, tunnel_key)
        .with_name(name)
        .with_flags(ChangeFlags::inserted())
}

/// A logical-switch row carried over unchanged from an earlier pass.
pub fn steady_switch(bridge: &str, tunnel_key: TunnelKey, name: &str) -> LogicalSwitchRow {
    LogicalSwitchRow::new(bridge, tunnel_key).with_name(name)
}

/// A freshly inserted VLAN row bound to `tunnel_key` (0 leaves it unbound).
pub fn inserted_vlan(name: &str, id: VlanId, tunnel_key: TunnelKey) -> VlanRow {
    let row = VlanRow::new(name, id).with_flags(ChangeFlags::inserted());
    if tunnel_key != 0 {
        row.with_tunnel_key(tunnel_key)
    } else {
        row
    }
}

/// A VLAN row carried over unchanged, bound to `tunnel_key` (0 = unbound).
pub fn steady_vlan(name: &str, id: VlanId, tunnel_key: TunnelKey) -> VlanRow {
    let row = VlanRow::new(name, id);
    if tunnel_key != 0 {
        row.with_tunnel_key(tunnel_key)
    } else {
        row
    }
}

/// A freshly inserted access-mode port row with no VLAN membership yet.
pub fn inserted_port(name: &str) -> PortRow {
    PortRow::new(name)
        .with_vlan_mode("access")
        .with_flags(ChangeFlags::inserted())
}

/// An access port row whose VLAN tag points at (`vlan_id`, `vlan_name`),
/// marked modified as a membership change would be.
pub fn retagged_port(name: &str, vlan_id: VlanId, vlan_name: &str) -> PortRow {
    PortRow::new(name)
        .with_vlan_mode("access")
        .with_access_vlan(VlanRef::new(vlan_id, vlan_name))
        .with_flags(ChangeFlags::modified())
}

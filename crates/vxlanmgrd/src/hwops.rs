//! Capability-call wrappers with uniform status handling.
//!
//! Every hardware call funnels through here so the failure policy lives in
//! one place: a missing provider degrades the call to a logged no-op, a
//! `NotSupported` status is recorded at debug and otherwise ignored, and any
//! other non-success status is logged and never retried. Callers proceed to
//! update tracked state regardless; the trackers follow desired state even
//! when hardware enforcement is unavailable.

use tracing::{debug, warn};

use vxlan_asic::{
    AsicStatus, LogicalSwitchAction, LogicalSwitchNode, TunnelKey, VlanId, VxlanAsicOps,
};

fn log_rc(op: &str, detail: &str, rc: AsicStatus) {
    if rc.is_not_supported() {
        debug!("{} not supported by provider ({})", op, detail);
    } else if !rc.is_success() {
        warn!("{} failed rc ({}) ({})", op, rc, detail);
    } else {
        debug!("{} rc ({}) ({})", op, rc, detail);
    }
}

pub(crate) fn set_logical_switch(
    asic: Option<&dyn VxlanAsicOps>,
    bridge: &str,
    action: LogicalSwitchAction,
    node: &LogicalSwitchNode,
) {
    let Some(asic) = asic else {
        debug!(
            "no ASIC provider; skipping set_logical_switch {} key ({})",
            action, node.tunnel_key
        );
        return;
    };
    let rc = asic.set_logical_switch(bridge, action, node);
    log_rc(
        "set_logical_switch",
        &format!(
            "op {} name {:?} key {} bridge {}",
            action, node.name, node.tunnel_key, bridge
        ),
        rc,
    );
}

pub(crate) fn bind_port(
    asic: Option<&dyn VxlanAsicOps>,
    tunnel_key: TunnelKey,
    vlan_id: VlanId,
    port: &str,
) {
    let Some(asic) = asic else {
        debug!("no ASIC provider; skipping bind of port {}", port);
        return;
    };
    let rc = asic.vport_bind_port_on_vlan(tunnel_key, vlan_id, port);
    log_rc(
        "vport_bind_port_on_vlan",
        &format!("port {} vlan {} key {}", port, vlan_id, tunnel_key),
        rc,
    );
}

pub(crate) fn unbind_port(
    asic: Option<&dyn VxlanAsicOps>,
    tunnel_key: TunnelKey,
    vlan_id: VlanId,
    port: &str,
) {
    let Some(asic) = asic else {
        debug!("no ASIC provider; skipping unbind of port {}", port);
        return;
    };
    let rc = asic.vport_unbind_port_on_vlan(tunnel_key, vlan_id, port);
    log_rc(
        "vport_unbind_port_on_vlan",
        &format!("port {} vlan {} key {}", port, vlan_id, tunnel_key),
        rc,
    );
}

pub(crate) fn bind_all_ports(
    asic: Option<&dyn VxlanAsicOps>,
    tunnel_key: TunnelKey,
    vlan_id: VlanId,
) {
    let Some(asic) = asic else {
        debug!("no ASIC provider; skipping bind-all on vlan {}", vlan_id);
        return;
    };
    let rc = asic.vport_bind_all_ports_on_vlan(tunnel_key, vlan_id);
    log_rc(
        "vport_bind_all_ports_on_vlan",
        &format!("vlan {} key {}", vlan_id, tunnel_key),
        rc,
    );
}

pub(crate) fn unbind_all_ports(
    asic: Option<&dyn VxlanAsicOps>,
    tunnel_key: TunnelKey,
    vlan_id: VlanId,
) {
    let Some(asic) = asic else {
        debug!("no ASIC provider; skipping unbind-all on vlan {}", vlan_id);
        return;
    };
    let rc = asic.vport_unbind_all_ports_on_vlan(tunnel_key, vlan_id);
    log_rc(
        "vport_unbind_all_ports_on_vlan",
        &format!("vlan {} key {}", vlan_id, tunnel_key),
        rc,
    );
}

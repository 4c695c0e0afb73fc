//! Recording capability provider.

use std::sync::Mutex;

use vxlan_asic::{
    AsicStatus, LogicalSwitchAction, LogicalSwitchNode, TunnelKey, VlanId, VxlanAsicOps,
};

/// One capability call captured by [`RecordingAsic`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsicCall {
    SetLogicalSwitch {
        bridge: String,
        action: LogicalSwitchAction,
        node: LogicalSwitchNode,
    },
    BindPort {
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
        port: String,
    },
    UnbindPort {
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
        port: String,
    },
    BindAllPorts {
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
    },
    UnbindAllPorts {
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
    },
}

/// A [`VxlanAsicOps`] implementation that records every call and returns a
/// configurable status.
///
/// Tests keep a clone of the `Arc` they hand to the reconciler and assert on
/// [`calls`](RecordingAsic::calls) afterwards.
pub struct RecordingAsic {
    status: AsicStatus,
    calls: Mutex<Vec<AsicCall>>,
}

impl RecordingAsic {
    /// Creates a recorder whose calls all succeed.
    pub fn new() -> Self {
        Self::with_status(AsicStatus::Success)
    }

    /// Creates a recorder whose calls all return `status`.
    pub fn with_status(status: AsicStatus) -> Self {
        Self {
            status,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of the captured calls in issue order.
    pub fn calls(&self) -> Vec<AsicCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Drains and returns the captured calls.
    pub fn take_calls(&self) -> Vec<AsicCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    /// Returns the number of captured calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: AsicCall) -> AsicStatus {
        self.calls.lock().unwrap().push(call);
        self.status
    }
}

impl Default for RecordingAsic {
    fn default() -> Self {
        Self::new()
    }
}

impl VxlanAsicOps for RecordingAsic {
    fn set_logical_switch(
        &self,
        bridge: &str,
        action: LogicalSwitchAction,
        node: &LogicalSwitchNode,
    ) -> AsicStatus {
        self.record(AsicCall::SetLogicalSwitch {
            bridge: bridge.to_string(),
            action,
            node: node.clone(),
        })
    }

    fn vport_bind_port_on_vlan(
        &self,
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
        port: &str,
    ) -> AsicStatus {
        self.record(AsicCall::BindPort {
            tunnel_key,
            vlan_id,
            port: port.to_string(),
        })
    }

    fn vport_unbind_port_on_vlan(
        &self,
        tunnel_key: TunnelKey,
        vlan_id: VlanId,
        port: &str,
    ) -> AsicStatus {
        self.record(AsicCall::UnbindPort {
            tunnel_key,
            vlan_id,
            port: port.to_string(),
        })
    }

    fn vport_bind_all_ports_on_vlan(&self, tunnel_key: TunnelKey, vlan_id: VlanId) -> AsicStatus {
        self.record(AsicCall::BindAllPorts { tunnel_key, vlan_id })
    }

    fn vport_unbind_all_ports_on_vlan(&self, tunnel_key: TunnelKey, vlan_id: VlanId) -> AsicStatus {
        self.record(AsicCall::UnbindAllPorts { tunnel_key, vlan_id })
    }
}

//! Tracker-owned state.

use serde::{Deserialize, Serialize};

use vxlan_asic::{LogicalSwitchNode, TunnelKey, VlanId};
use vxlan_orch_common::LogicalSwitchRow;

/// Index key for one live logical switch: (bridge, tunnel key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogicalSwitchKey {
    /// Owning bridge name.
    pub bridge: String,
    /// Tunnel key (VNI).
    pub tunnel_key: TunnelKey,
}

impl LogicalSwitchKey {
    /// Creates a key.
    pub fn new(bridge: impl Into<String>, tunnel_key: TunnelKey) -> Self {
        Self {
            bridge: bridge.into(),
            tunnel_key,
        }
    }
}

/// One live logical switch as last told to hardware.
///
/// Exists exactly while a matching row exists: created on first observation,
/// refreshed when name or description change, destroyed when the row
/// disappears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalSwitchEntry {
    /// Owning bridge name.
    pub bridge: String,
    /// Tunnel key (VNI). Never changes for a live entry.
    pub tunnel_key: TunnelKey,
    /// Last programmed name.
    pub name: Option<String>,
    /// Last programmed description.
    pub description: Option<String>,
}

impl LogicalSwitchEntry {
    /// Creates an entry mirroring a row.
    pub fn from_row(row: &LogicalSwitchRow) -> Self {
        Self {
            bridge: row.bridge.clone(),
            tunnel_key: row.tunnel_key,
            name: row.name.clone(),
            description: row.description.clone(),
        }
    }

    /// Returns the index key for this entry.
    pub fn key(&self) -> LogicalSwitchKey {
        LogicalSwitchKey::new(&self.bridge, self.tunnel_key)
    }

    /// Returns the wire argument describing this entry.
    pub fn node(&self) -> LogicalSwitchNode {
        LogicalSwitchNode {
            tunnel_key: self.tunnel_key,
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }

    /// Returns true if the row's name or description differ from the stored
    /// copy. Tunnel key is identity and is never compared.
    pub fn differs_from(&self, row: &LogicalSwitchRow) -> bool {
        self.name != row.name || self.description != row.description
    }
}

/// Last-enforced tunnel binding for one VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanBindingState {
    /// VLAN name.
    pub name: String,
    /// 802.1Q VLAN id.
    pub vlan_id: VlanId,
    /// Tunnel key the VLAN's ports are currently bound to; 0 = unbound.
    pub tunnel_key: TunnelKey,
}

impl VlanBindingState {
    /// Creates an unbound state.
    pub fn new(name: impl Into<String>, vlan_id: VlanId) -> Self {
        Self {
            name: name.into(),
            vlan_id,
            tunnel_key: 0,
        }
    }

    /// Returns true if the VLAN is bound to a tunnel key.
    pub fn is_bound(&self) -> bool {
        self.tunnel_key != 0
    }
}

/// Last-enforced VLAN membership for one access port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortBindingState {
    /// Port name.
    pub name: String,
    /// VLAN id the port is currently bound for; 0 = unbound.
    pub vlan_id: VlanId,
    /// Name of that VLAN; `None` while unbound.
    pub vlan_name: Option<String>,
}

impl PortBindingState {
    /// Creates an unbound state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vlan_id: 0,
            vlan_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vxlan_orch_common::LogicalSwitchRow;

    #[test]
    fn test_entry_from_row() {
        let row = LogicalSwitchRow::new("br0", 5000)
            .with_name("seg-a")
            .with_description("prod");
        let entry = LogicalSwitchEntry::from_row(&row);

        assert_eq!(entry.key(), LogicalSwitchKey::new("br0", 5000));
        assert_eq!(entry.node().name.as_deref(), Some("seg-a"));
        assert!(!entry.differs_from(&row));
    }

    #[test]
    fn test_entry_differs_on_description_only() {
        let row = LogicalSwitchRow::new("br0", 5000).with_name("seg-a");
        let entry = LogicalSwitchEntry::from_row(&row);

        let changed = row.clone().with_description("prod");
        assert!(entry.differs_from(&changed));

        // Same attributes, different key: identity is not an attribute
        let rekeyed = LogicalSwitchRow::new("br0", 6000).with_name("seg-a");
        assert!(!entry.differs_from(&rekeyed));
    }

    #[test]
    fn test_vlan_binding_state_unbound() {
        let state = VlanBindingState::new("VLAN10", 10);
        assert!(!state.is_bound());
        assert_eq!(state.tunnel_key, 0);
    }

    #[test]
    fn test_port_binding_state_unbound() {
        let state = PortBindingState::new("p1");
        assert_eq!(state.vlan_id, 0);
        assert!(state.vlan_name.is_none());
    }
}

//! Per-pass view of one bridge's configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::rows::{LogicalSwitchRow, PortRow, VlanRow};

/// Everything one reconciliation pass may read, bundled by the notification
/// mechanism before it invokes an entry point.
///
/// Logical-switch rows are the whole table (the reconciler filters by bridge
/// name itself, since row references may be re-resolved across passes); VLAN
/// and port rows are already scoped to the bridge. `live_ports` is the
/// bridge's current port set, `wanted_ports` the configured one; a live port
/// missing from `wanted_ports` is being deleted this pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeSnapshot {
    /// Name of the bridge this pass is for.
    pub bridge: String,
    /// Change-sequence number of this pass.
    pub seqno: u64,
    /// All logical-switch rows in the store.
    pub logical_switches: Vec<LogicalSwitchRow>,
    /// VLAN rows belonging to the bridge.
    pub vlans: Vec<VlanRow>,
    /// Port rows belonging to the bridge.
    pub ports: Vec<PortRow>,
    /// Ports currently instantiated on the bridge.
    pub live_ports: Vec<String>,
    /// Ports present in the configured ("wanted") set.
    pub wanted_ports: HashSet<String>,
}

impl BridgeSnapshot {
    /// Creates an empty snapshot for the named bridge.
    pub fn new(bridge: impl Into<String>) -> Self {
        Self {
            bridge: bridge.into(),
            ..Self::default()
        }
    }

    /// Sets the change-sequence number.
    pub fn with_seqno(mut self, seqno: u64) -> Self {
        self.seqno = seqno;
        self
    }

    /// Adds a logical-switch row.
    pub fn with_logical_switch(mut self, row: LogicalSwitchRow) -> Self {
        self.logical_switches.push(row);
        self
    }

    /// Adds a VLAN row.
    pub fn with_vlan(mut self, row: VlanRow) -> Self {
        self.vlans.push(row);
        self
    }

    /// Adds a port row and marks the port both live and wanted.
    pub fn with_port(mut self, row: PortRow) -> Self {
        self.live_ports.push(row.name.clone());
        self.wanted_ports.insert(row.name.clone());
        self.ports.push(row);
        self
    }

    /// Marks a port as live without a backing row ("wanted" status is left
    /// alone); used to stage deletions.
    pub fn with_live_port(mut self, name: impl Into<String>) -> Self {
        self.live_ports.push(name.into());
        self
    }

    /// Looks up a port row by name.
    pub fn port(&self, name: &str) -> Option<&PortRow> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Returns true if the port is in the configured set.
    pub fn is_wanted(&self, name: &str) -> bool {
        self.wanted_ports.contains(name)
    }
}

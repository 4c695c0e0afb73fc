//! VLAN-to-tunnel binding tracking.
//!
//! For every VLAN on the bridge the tracker remembers the tunnel key it last
//! enforced. When the configured logical-switch reference drifts from that
//! value, all ports on the VLAN are rebound in bulk: unbind from the old key
//! first, then bind to the new one.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use vxlan_asic::VxlanAsicOps;
use vxlan_orch_common::BridgeSnapshot;

use crate::hwops;
use crate::types::VlanBindingState;

/// Per-VLAN enforced-binding state and the change detection around it.
#[derive(Debug, Default)]
pub struct VlanBindingTracker {
    vlans: HashMap<String, VlanBindingState>,
}

impl VlanBindingTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tracked state for a VLAN name.
    pub fn get(&self, name: &str) -> Option<&VlanBindingState> {
        self.vlans.get(name)
    }

    /// Returns the number of VLANs ever observed.
    pub fn len(&self) -> usize {
        self.vlans.len()
    }

    /// Returns true if no VLAN was ever observed.
    pub fn is_empty(&self) -> bool {
        self.vlans.is_empty()
    }

    /// Compares every VLAN's configured tunnel reference against the
    /// enforced value and issues bulk rebinding where they differ.
    ///
    /// The store does not reliably mark the VLAN row modified when only its
    /// logical-switch reference changes, so the comparison runs on every
    /// pass rather than being gated on the row's change flags.
    pub fn reconcile(&mut self, asic: Option<&dyn VxlanAsicOps>, snap: &BridgeSnapshot) {
        for vlan_row in &snap.vlans {
            if vlan_row.flags.inserted {
                debug!(
                    "VLAN row inserted for VLAN {}, name {}",
                    vlan_row.id, vlan_row.name
                );
                if self.vlans.contains_key(&vlan_row.name) {
                    warn!("VLAN {} specified twice", vlan_row.name);
                } else {
                    self.vlans.insert(
                        vlan_row.name.clone(),
                        VlanBindingState::new(&vlan_row.name, vlan_row.id),
                    );
                }
            }

            let Some(state) = self.vlans.get_mut(&vlan_row.name) else {
                continue;
            };

            let old_key = state.tunnel_key;
            let new_key = vlan_row.tunnel_key.unwrap_or(0);
            if old_key == new_key {
                continue;
            }

            if old_key != 0 {
                info!(
                    "Unbinding all ports on VLAN {}, old tunnel key {}",
                    state.vlan_id, old_key
                );
                hwops::unbind_all_ports(asic, old_key, state.vlan_id);
            }

            if new_key != 0 {
                info!(
                    "Binding all ports on VLAN {} to new tunnel key {}",
                    state.vlan_id, new_key
                );
                hwops::bind_all_ports(asic, new_key, state.vlan_id);
            }

            state.tunnel_key = new_key;
        }
    }
}

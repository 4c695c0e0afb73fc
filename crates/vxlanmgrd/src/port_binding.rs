//! Per-port VLAN membership tracking.
//!
//! The tracker follows each access port's configured VLAN tag and keeps the
//! hardware binding in step: a membership change unbinds the port from its
//! old VLAN's tunnel and binds it to the new one; a port deletion unbinds
//! and forgets the port. Only access ports are handled; trunk and other
//! modes are outside the overlay.

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use vxlan_asic::VxlanAsicOps;
use vxlan_orch_common::BridgeSnapshot;

use crate::error::{ReconcileError, ReconcileResult};
use crate::hwops;
use crate::types::PortBindingState;
use crate::vlan_binding::VlanBindingTracker;

/// Per-port enforced-membership state and the transitions around it.
#[derive(Debug, Default)]
pub struct PortBindingTracker {
    ports: HashMap<String, PortBindingState>,
}

impl PortBindingTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tracked state for a port name.
    pub fn get(&self, name: &str) -> Option<&PortBindingState> {
        self.ports.get(name)
    }

    /// Returns the number of tracked ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns true if no port is tracked.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Seeds tracking state for ports appearing on the bridge.
    ///
    /// Every inserted or modified port row without an entry gets one, unbound.
    /// Seeding never issues hardware calls; binding happens on the update
    /// path once the port's VLAN tag is observed.
    pub fn seed(&mut self, snap: &BridgeSnapshot) {
        for port_row in &snap.ports {
            if !port_row.flags.inserted && !port_row.flags.modified {
                continue;
            }
            if self.ports.contains_key(&port_row.name) {
                if port_row.flags.inserted {
                    warn!("Port {} specified twice", port_row.name);
                }
                continue;
            }
            debug!("Port row inserted {}", port_row.name);
            self.ports.insert(
                port_row.name.clone(),
                PortBindingState::new(&port_row.name),
            );
        }
    }

    /// Applies a membership change for one port.
    pub fn update(
        &mut self,
        asic: Option<&dyn VxlanAsicOps>,
        vlans: &VlanBindingTracker,
        snap: &BridgeSnapshot,
        port_name: &str,
    ) {
        let Some(port_row) = snap.port(port_name) else {
            warn!("Port {} has no row in the current snapshot", port_name);
            return;
        };

        if !port_row.is_access() {
            info!("Only access ports are handled, ignoring {}", port_name);
            return;
        }

        let Some(state) = self.ports.get_mut(port_name) else {
            // Not seeded yet; the add path will pick it up first.
            debug!("Port {} not tracked yet", port_name);
            return;
        };

        let old_vlan = state.vlan_id;
        let new_vlan = port_row.access_vlan.as_ref().map(|v| v.id).unwrap_or(0);
        if old_vlan == new_vlan {
            return;
        }

        if old_vlan != 0 {
            info!("Unbind port {} on old VLAN {}", port_name, old_vlan);
            match &state.vlan_name {
                Some(vlan_name) => unbind_port_vlan(asic, vlans, vlan_name, port_name),
                None => error!(
                    "Port {} tracked on VLAN {} without a VLAN name",
                    port_name, old_vlan
                ),
            }
        }

        if new_vlan != 0 {
            // new_vlan came from the reference, so it is present here.
            let vlan_ref = port_row.access_vlan.as_ref().unwrap();
            info!("Bind port {} on new VLAN {}", port_name, new_vlan);
            bind_port_vlan(asic, vlans, &vlan_ref.name, port_name);
        }

        state.vlan_id = new_vlan;
        state.vlan_name = port_row.access_vlan.as_ref().map(|v| v.name.clone());
    }

    /// Unbinds and forgets every live port that left the configured set.
    ///
    /// A deleted port without tracking state means the add path was skipped;
    /// that is an internal-consistency violation the caller must treat as
    /// fatal.
    pub fn sweep_deleted(
        &mut self,
        asic: Option<&dyn VxlanAsicOps>,
        vlans: &VlanBindingTracker,
        snap: &BridgeSnapshot,
    ) -> ReconcileResult<()> {
        for port_name in &snap.live_ports {
            if snap.is_wanted(port_name) {
                continue;
            }
            debug!("Found deleted port {}", port_name);

            let vlan_name = match self.ports.get(port_name) {
                Some(state) => state.vlan_name.clone(),
                None => {
                    error!(
                        "Received delete port event for already deleted port {}",
                        port_name
                    );
                    return Err(ReconcileError::untracked_port(port_name.clone()));
                }
            };

            match &vlan_name {
                Some(vlan_name) => unbind_port_vlan(asic, vlans, vlan_name, port_name),
                None => debug!("Port {} was not bound to any VLAN", port_name),
            }

            self.ports.remove(port_name);
            info!("Deleted port {} from tracking", port_name);
        }
        Ok(())
    }
}

fn bind_port_vlan(
    asic: Option<&dyn VxlanAsicOps>,
    vlans: &VlanBindingTracker,
    vlan_name: &str,
    port: &str,
) {
    let Some(vlan) = vlans.get(vlan_name) else {
        error!("VLAN {} not configured", vlan_name);
        return;
    };
    if !vlan.is_bound() {
        info!("VLAN {} not bound to a tunnel key", vlan_name);
        return;
    }
    debug!(
        "Found {} bound to tunnel key {}",
        vlan_name, vlan.tunnel_key
    );
    hwops::bind_port(asic, vlan.tunnel_key, vlan.vlan_id, port);
}

fn unbind_port_vlan(
    asic: Option<&dyn VxlanAsicOps>,
    vlans: &VlanBindingTracker,
    vlan_name: &str,
    port: &str,
) {
    let Some(vlan) = vlans.get(vlan_name) else {
        error!("VLAN {} not configured", vlan_name);
        return;
    };
    if !vlan.is_bound() {
        info!("VLAN {} not bound to a tunnel key", vlan_name);
        return;
    }
    debug!(
        "Found {} bound to tunnel key {}",
        vlan_name, vlan.tunnel_key
    );
    hwops::unbind_port(asic, vlan.tunnel_key, vlan.vlan_id, port);
}

//! VxlanMgr - overlay reconciliation entry points.

use std::sync::Arc;

use tracing::{debug, info, warn};

use vxlan_asic::VxlanAsicOps;
use vxlan_orch_common::BridgeSnapshot;

use crate::error::ReconcileResult;
use crate::logical_switch::LogicalSwitchReconciler;
use crate::port_binding::PortBindingTracker;
use crate::vlan_binding::VlanBindingTracker;

/// Default capability-provider name resolved from the plugin registry.
pub const ASIC_PROVIDER_NAME: &str = "vxlan-asic";
/// Required provider interface major version.
pub const ASIC_PROVIDER_MAJOR: u32 = 0;
/// Minimum provider interface minor version.
pub const ASIC_PROVIDER_MINOR: u32 = 1;

/// Lazily resolved, cached handle to the capability provider.
///
/// Lookup failure is non-fatal: it is logged once and every hardware call
/// degrades to a no-op until a provider registers and a later pass resolves
/// it.
struct ProviderHandle {
    name: String,
    major: u32,
    minor: u32,
    cached: Option<Arc<dyn VxlanAsicOps>>,
    missing_logged: bool,
}

impl ProviderHandle {
    fn with_spec(name: &str, major: u32, minor: u32) -> Self {
        Self {
            name: name.to_string(),
            major,
            minor,
            cached: None,
            missing_logged: false,
        }
    }

    fn with_ops(ops: Arc<dyn VxlanAsicOps>) -> Self {
        Self {
            name: String::new(),
            major: 0,
            minor: 0,
            cached: Some(ops),
            missing_logged: false,
        }
    }

    fn resolve(&mut self) -> Option<Arc<dyn VxlanAsicOps>> {
        if let Some(ops) = &self.cached {
            return Some(Arc::clone(ops));
        }
        match vxlan_asic::find_provider(&self.name, self.major, self.minor) {
            Ok(ops) => {
                info!(
                    "Found ASIC provider '{}' (v{}.{})",
                    self.name, self.major, self.minor
                );
                self.cached = Some(Arc::clone(&ops));
                self.missing_logged = false;
                Some(ops)
            }
            Err(err) => {
                if !self.missing_logged {
                    warn!("{}; hardware programming disabled", err);
                    self.missing_logged = true;
                }
                None
            }
        }
    }
}

/// The overlay reconciler for one process (or one bridge, when the caller
/// runs several).
///
/// Owns the logical-switch index and the VLAN/port binding trackers as plain
/// fields; the notification mechanism constructs one `VxlanMgr` and drives
/// it through the entry points below, serialized per bridge. `&mut self` on
/// every entry point makes the single-writer discipline a compile-time
/// property.
pub struct VxlanMgr {
    switches: LogicalSwitchReconciler,
    vlans: VlanBindingTracker,
    ports: PortBindingTracker,
    provider: ProviderHandle,
}

impl VxlanMgr {
    /// Creates a manager that resolves the default provider triple.
    pub fn new() -> Self {
        Self::with_provider_spec(
            ASIC_PROVIDER_NAME,
            ASIC_PROVIDER_MAJOR,
            ASIC_PROVIDER_MINOR,
        )
    }

    /// Creates a manager resolving the given provider name/version from the
    /// registry.
    pub fn with_provider_spec(name: &str, major: u32, minor: u32) -> Self {
        info!(
            "VxlanMgr initialized (provider '{}' v{}.{})",
            name, major, minor
        );
        Self {
            switches: LogicalSwitchReconciler::new(),
            vlans: VlanBindingTracker::new(),
            ports: PortBindingTracker::new(),
            provider: ProviderHandle::with_spec(name, major, minor),
        }
    }

    /// Creates a manager with a pre-resolved provider handle, bypassing the
    /// registry.
    pub fn with_provider(ops: Arc<dyn VxlanAsicOps>) -> Self {
        Self {
            switches: LogicalSwitchReconciler::new(),
            vlans: VlanBindingTracker::new(),
            ports: PortBindingTracker::new(),
            provider: ProviderHandle::with_ops(ops),
        }
    }

    /// Read access to the logical-switch index.
    pub fn logical_switches(&self) -> &LogicalSwitchReconciler {
        &self.switches
    }

    /// Read access to the VLAN binding tracker.
    pub fn vlan_bindings(&self) -> &VlanBindingTracker {
        &self.vlans
    }

    /// Read access to the port binding tracker.
    pub fn port_bindings(&self) -> &PortBindingTracker {
        &self.ports
    }

    /// Bridge coming up. Resolves the provider handle early so a
    /// misconfigured registry surfaces in the logs before the first real
    /// pass.
    pub fn on_bridge_init(&mut self, snap: &BridgeSnapshot) -> ReconcileResult<()> {
        info!("Bridge {} initializing (seqno {})", snap.bridge, snap.seqno);
        self.provider.resolve();
        Ok(())
    }

    /// Post-reconfiguration pass: logical switches first, then VLAN
    /// bindings.
    ///
    /// The VLAN pass reads tunnel keys from the rows rather than the index,
    /// so ordering does not change which calls are issued; switch-first just
    /// keeps the hardware add ahead of the first bind-all that references it
    /// within the same pass.
    pub fn on_bridge_reconfigure(&mut self, snap: &BridgeSnapshot) -> ReconcileResult<()> {
        debug!(
            "Reconfigure pass for bridge {} (seqno {})",
            snap.bridge, snap.seqno
        );
        let asic = self.provider.resolve();
        self.switches.reconcile(asic.as_deref(), snap);
        self.vlans.reconcile(asic.as_deref(), snap);
        Ok(())
    }

    /// Ports added to the bridge: seed tracking state.
    pub fn on_port_added(&mut self, snap: &BridgeSnapshot) -> ReconcileResult<()> {
        self.ports.seed(snap);
        Ok(())
    }

    /// A single port's configuration changed: apply the membership
    /// transition.
    pub fn on_port_updated(&mut self, snap: &BridgeSnapshot, port: &str) -> ReconcileResult<()> {
        let asic = self.provider.resolve();
        self.ports.update(asic.as_deref(), &self.vlans, snap, port);
        Ok(())
    }

    /// Ports left the configured set: unbind and forget them.
    pub fn on_port_deleted(&mut self, snap: &BridgeSnapshot) -> ReconcileResult<()> {
        let asic = self.provider.resolve();
        self.ports.sweep_deleted(asic.as_deref(), &self.vlans, snap)
    }
}

impl Default for VxlanMgr {
    fn default() -> Self {
        Self::new()
    }
}

//! vxlanmgrd - VXLAN overlay reconciliation core
//!
//! Keeps the in-memory picture of logical switches (VXLAN segments keyed by
//! tunnel key) and VLAN/port bindings synchronized with the declarative
//! configuration store, and pushes the result to the ASIC capability
//! provider so forwarding hardware reflects the configured overlay.
//!
//! The store-facing notification glue materializes a
//! [`BridgeSnapshot`](vxlan_orch_common::BridgeSnapshot) per change and
//! drives [`VxlanMgr`] through five entry points (bridge init, bridge
//! reconfigure, port add, port update, port delete). Each pass runs to
//! completion synchronously; no polling, no internal blocking.

mod error;
mod hwops;
mod logical_switch;
mod port_binding;
mod types;
mod vlan_binding;
mod vxlan_mgr;

pub use error::{ReconcileError, ReconcileResult};
pub use logical_switch::LogicalSwitchReconciler;
pub use port_binding::PortBindingTracker;
pub use types::{LogicalSwitchEntry, LogicalSwitchKey, PortBindingState, VlanBindingState};
pub use vlan_binding::VlanBindingTracker;
pub use vxlan_mgr::{
    VxlanMgr, ASIC_PROVIDER_MAJOR, ASIC_PROVIDER_MINOR, ASIC_PROVIDER_NAME,
};

//! Shared orchestration types for the VXLAN overlay control plane.
//!
//! The reconciler is notification-driven: the store-facing glue observes
//! configuration changes, materializes one [`BridgeSnapshot`] per pass, and
//! hands it to a reconciler entry point. This crate defines that boundary:
//!
//! - [`LogicalSwitchRow`] / [`VlanRow`] / [`PortRow`]: read-only rows
//! - [`ChangeFlags`]: per-row insert/modify/delete flags for the pass
//! - [`BridgeSnapshot`]: everything one pass may read
//!
//! Rows carry resolved references (a VLAN's logical-switch reference is the
//! referenced tunnel key, a port's VLAN tag is id + name) so the reconciler
//! never reaches back into the store mid-pass.

mod rows;
mod view;

pub use rows::{
    ChangeFlags, LogicalSwitchRow, PortRow, VlanRef, VlanRow, VLAN_MODE_ACCESS,
};
pub use view::BridgeSnapshot;

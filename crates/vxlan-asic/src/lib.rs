//! ASIC capability-provider interface for the VXLAN overlay feature.
//!
//! This crate defines the boundary between the overlay control plane and the
//! dataplane backend that programs forwarding hardware:
//!
//! - [`VxlanAsicOps`]: the five overlay operations a provider implements
//! - [`AsicStatus`] / [`AsicError`]: status codes and typed errors
//! - [`register_provider`] / [`find_provider`]: the process-wide registry
//!   plugins publish themselves through
//!
//! # Architecture
//!
//! A dataplane plugin registers one [`VxlanAsicOps`] implementation under a
//! (name, major, minor) triple. The reconciler resolves the handle lazily and
//! caches it. The trait is all-or-nothing: a registered provider supplies
//! every operation, and signals a genuinely unimplementable one by returning
//! [`AsicStatus::NotSupported`] at call time.

mod error;
mod provider;
mod registry;
mod types;

pub use error::{AsicError, AsicResult, AsicStatus};
pub use provider::VxlanAsicOps;
pub use registry::{find_provider, register_provider};
pub use types::{LogicalSwitchAction, LogicalSwitchNode, TunnelKey, VlanId};

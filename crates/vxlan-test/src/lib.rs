//! Test infrastructure for the VXLAN overlay reconciler.
//!
//! Provides:
//! - [`RecordingAsic`]: a capability provider that captures the exact
//!   ordered sequence of hardware calls a pass issues
//! - [`AsicCall`]: the captured call, comparable in assertions
//! - [`fixtures`]: row/snapshot builders for common setups

pub mod fixtures;
mod recorder;

pub use fixtures::*;
pub use recorder::{AsicCall, RecordingAsic};

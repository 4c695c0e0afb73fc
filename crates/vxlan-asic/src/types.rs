//! Core types crossing the ASIC capability boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// VXLAN tunnel key (VNI) identifying one overlay segment.
///
/// A key of 0 is never programmed; trackers use it as the "unbound" sentinel.
pub type TunnelKey = u64;

/// 802.1Q VLAN identifier.
pub type VlanId = u16;

/// Action selector for [`set_logical_switch`](crate::VxlanAsicOps::set_logical_switch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalSwitchAction {
    /// Program a new logical switch.
    Add,
    /// Update name/description of an existing logical switch.
    Modify,
    /// Remove a logical switch.
    Delete,
}

impl LogicalSwitchAction {
    /// Returns the action name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalSwitchAction::Add => "add",
            LogicalSwitchAction::Modify => "modify",
            LogicalSwitchAction::Delete => "delete",
        }
    }
}

impl fmt::Display for LogicalSwitchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire argument of [`set_logical_switch`](crate::VxlanAsicOps::set_logical_switch).
///
/// Carries the subset of logical-switch state the dataplane needs. The tunnel
/// key is the identity; name and description are informational attributes the
/// provider may or may not program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalSwitchNode {
    /// Tunnel key (VNI) of the segment.
    pub tunnel_key: TunnelKey,
    /// Optional segment name.
    pub name: Option<String>,
    /// Optional free-form description.
    pub description: Option<String>,
}

impl LogicalSwitchNode {
    /// Creates a node for the given tunnel key with no attributes.
    pub fn new(tunnel_key: TunnelKey) -> Self {
        Self {
            tunnel_key,
            name: None,
            description: None,
        }
    }

    /// Sets the segment name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

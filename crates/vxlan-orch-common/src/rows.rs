//! Declarative configuration rows as observed by the reconciler.
//!
//! The configuration store delivers incremental change notifications: each
//! row carries flags saying whether it was inserted, modified, or deleted
//! since the change sequence the reconciler last processed. Rows are
//! read-only to the reconciler; the store owns them.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use vxlan_asic::{TunnelKey, VlanId};

/// VLAN mode string for access ports, the only mode the overlay handles.
pub const VLAN_MODE_ACCESS: &str = "access";

/// Per-row change flags relative to the current pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeFlags {
    /// Row appeared since the last observed change sequence.
    pub inserted: bool,
    /// Row was modified since the last observed change sequence.
    pub modified: bool,
    /// Row was deleted since the last observed change sequence.
    pub deleted: bool,
}

impl ChangeFlags {
    /// Flags for an unchanged row.
    pub fn none() -> Self {
        Self::default()
    }

    /// Flags for a freshly inserted row.
    pub fn inserted() -> Self {
        Self {
            inserted: true,
            ..Self::default()
        }
    }

    /// Flags for a modified row.
    pub fn modified() -> Self {
        Self {
            modified: true,
            ..Self::default()
        }
    }

    /// Flags for a deleted row.
    pub fn deleted() -> Self {
        Self {
            deleted: true,
            ..Self::default()
        }
    }

    /// Returns true if any change flag is set.
    pub fn any(&self) -> bool {
        self.inserted || self.modified || self.deleted
    }
}

/// One logical-switch row from the configuration store.
///
/// Identity is (bridge, tunnel key). The tunnel key is immutable: a key
/// change surfaces as a delete of the old row plus an insert of a new one,
/// never as an in-place modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalSwitchRow {
    /// Name of the owning bridge.
    pub bridge: String,
    /// Tunnel key (VNI), unique per owning bridge.
    pub tunnel_key: TunnelKey,
    /// Optional segment name.
    pub name: Option<String>,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional multicast group for BUM replication.
    pub mcast_group: Option<IpAddr>,
    /// Change flags for this pass.
    pub flags: ChangeFlags,
}

impl LogicalSwitchRow {
    /// Creates a row owned by `bridge` with the given tunnel key.
    pub fn new(bridge: impl Into<String>, tunnel_key: TunnelKey) -> Self {
        Self {
            bridge: bridge.into(),
            tunnel_key,
            name: None,
            description: None,
            mcast_group: None,
            flags: ChangeFlags::none(),
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

    /// Sets the multicast group.
    pub fn with_mcast_group(mut self, group: IpAddr) -> Self {
        self.mcast_group = Some(group);
        self
    }

    /// Sets the change flags.
    pub fn with_flags(mut self, flags: ChangeFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// One VLAN row from the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRow {
    /// VLAN name (the store's primary key for VLANs).
    pub name: String,
    /// 802.1Q VLAN id.
    pub id: VlanId,
    /// Tunnel key of the referenced logical switch, if the VLAN is bound.
    pub tunnel_key: Option<TunnelKey>,
    /// Change flags for this pass.
    pub flags: ChangeFlags,
}

impl VlanRow {
    /// Creates an unbound VLAN row.
    pub fn new(name: impl Into<String>, id: VlanId) -> Self {
        Self {
            name: name.into(),
            id,
            tunnel_key: None,
            flags: ChangeFlags::none(),
        }
    }

    /// Sets the logical-switch reference.
    pub fn with_tunnel_key(mut self, tunnel_key: TunnelKey) -> Self {
        self.tunnel_key = Some(tunnel_key);
        self
    }

    /// Sets the change flags.
    pub fn with_flags(mut self, flags: ChangeFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Reference from a port row to its access VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanRef {
    /// 802.1Q VLAN id.
    pub id: VlanId,
    /// VLAN name.
    pub name: String,
}

impl VlanRef {
    /// Creates a reference.
    pub fn new(id: VlanId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One port row from the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRow {
    /// Port name.
    pub name: String,
    /// Configured VLAN mode. Absent means access.
    pub vlan_mode: Option<String>,
    /// The access VLAN the port carries untagged traffic for, if any.
    pub access_vlan: Option<VlanRef>,
    /// Change flags for this pass.
    pub flags: ChangeFlags,
}

impl PortRow {
    /// Creates a port row with no VLAN membership.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vlan_mode: None,
            access_vlan: None,
            flags: ChangeFlags::none(),
        }
    }

    /// Sets the VLAN mode.
    pub fn with_vlan_mode(mut self, mode: impl Into<String>) -> Self {
        self.vlan_mode = Some(mode.into());
        self
    }

    /// Sets the access VLAN reference.
    pub fn with_access_vlan(mut self, vlan: VlanRef) -> Self {
        self.access_vlan = Some(vlan);
        self
    }

    /// Sets the change flags.
    pub fn with_flags(mut self, flags: ChangeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns true if the port is in access mode (explicitly or by
    /// default).
    pub fn is_access(&self) -> bool {
        match &self.vlan_mode {
            Some(mode) => mode == VLAN_MODE_ACCESS,
            None => true,
        }
    }
}

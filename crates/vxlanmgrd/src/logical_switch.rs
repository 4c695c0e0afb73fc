//! Logical switch reconciliation.
//!
//! Diffs the declarative logical-switch row-set against the in-memory index
//! and issues exactly the add/modify/delete calls needed to converge. The
//! index holds one entry per logical switch hardware currently knows about;
//! at the end of every pass it agrees with the row-set for the bridge under
//! consideration.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use vxlan_asic::{LogicalSwitchAction, VxlanAsicOps};
use vxlan_orch_common::{BridgeSnapshot, LogicalSwitchRow};

use crate::hwops;
use crate::types::{LogicalSwitchEntry, LogicalSwitchKey};

/// Index of live logical switches plus the diff logic that maintains it.
#[derive(Debug, Default)]
pub struct LogicalSwitchReconciler {
    entries: BTreeMap<LogicalSwitchKey, LogicalSwitchEntry>,
}

impl LogicalSwitchReconciler {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for a key, if indexed.
    pub fn get(&self, key: &LogicalSwitchKey) -> Option<&LogicalSwitchEntry> {
        self.entries.get(key)
    }

    /// Returns the number of indexed entries across all bridges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries indexed for one bridge.
    pub fn count_for_bridge(&self, bridge: &str) -> usize {
        self.entries.keys().filter(|k| k.bridge == bridge).count()
    }

    /// Brings the index and hardware into agreement with the row-set for
    /// the snapshot's bridge.
    pub fn reconcile(&mut self, asic: Option<&dyn VxlanAsicOps>, snap: &BridgeSnapshot) {
        // An empty table means everything was deleted; per-row delete
        // notifications are not individually observable in that case.
        if snap.logical_switches.is_empty() {
            debug!(
                "no rows in logical switch table, tearing down all entries for {}",
                snap.bridge
            );
            self.teardown_bridge(asic, &snap.bridge);
            return;
        }

        if !snap.logical_switches.iter().any(|row| row.flags.any()) {
            debug!("no modification in logical switch table for {}", snap.bridge);
            return;
        }

        // Collect the rows present on this bridge. Filtering is by bridge
        // name, not row identity: references may be re-resolved between
        // passes.
        let mut current: BTreeMap<LogicalSwitchKey, &LogicalSwitchRow> = BTreeMap::new();
        for row in &snap.logical_switches {
            if row.bridge != snap.bridge {
                continue;
            }
            let key = LogicalSwitchKey::new(&row.bridge, row.tunnel_key);
            if current.contains_key(&key) {
                warn!(
                    "logical switch {:?} (key {}) specified twice",
                    row.name, row.tunnel_key
                );
                continue;
            }
            current.insert(key, row);
        }

        // Delete pass runs before the add pass so a single notification
        // carrying both a deletion and an unrelated insertion resolves
        // cleanly.
        let stale: Vec<LogicalSwitchKey> = self
            .entries
            .keys()
            .filter(|key| key.bridge == snap.bridge && !current.contains_key(key))
            .cloned()
            .collect();
        for key in stale {
            debug!(
                "found a deleted logical switch (key {}) on {}",
                key.tunnel_key, key.bridge
            );
            self.delete_entry(asic, &key);
        }

        // Add pass.
        for (key, row) in &current {
            if !self.entries.contains_key(key) {
                debug!(
                    "found an added logical switch {:?} (key {})",
                    row.name, row.tunnel_key
                );
                self.create_entry(asic, row);
            }
        }

        // Update pass: attributes only. The tunnel key is identity and a key
        // change arrives as delete-then-insert, handled above.
        for (key, row) in &current {
            let Some(entry) = self.entries.get_mut(key) else {
                continue;
            };
            if !entry.differs_from(row) {
                continue;
            }
            debug!(
                "found a modified logical switch: name={:?} key={} description={:?}",
                row.name, row.tunnel_key, row.description
            );
            entry.name = row.name.clone();
            entry.description = row.description.clone();
            hwops::set_logical_switch(asic, &entry.bridge, LogicalSwitchAction::Modify, &entry.node());
        }
    }

    /// Deletes every indexed entry belonging to `bridge`.
    fn teardown_bridge(&mut self, asic: Option<&dyn VxlanAsicOps>, bridge: &str) {
        let keys: Vec<LogicalSwitchKey> = self
            .entries
            .keys()
            .filter(|key| key.bridge == bridge)
            .cloned()
            .collect();
        for key in keys {
            self.delete_entry(asic, &key);
        }
    }

    fn create_entry(&mut self, asic: Option<&dyn VxlanAsicOps>, row: &LogicalSwitchRow) {
        let entry = LogicalSwitchEntry::from_row(row);
        hwops::set_logical_switch(asic, &entry.bridge, LogicalSwitchAction::Add, &entry.node());
        self.entries.insert(entry.key(), entry);
    }

    fn delete_entry(&mut self, asic: Option<&dyn VxlanAsicOps>, key: &LogicalSwitchKey) {
        if let Some(entry) = self.entries.remove(key) {
            hwops::set_logical_switch(
                asic,
                &entry.bridge,
                LogicalSwitchAction::Delete,
                &entry.node(),
            );
        }
    }
}

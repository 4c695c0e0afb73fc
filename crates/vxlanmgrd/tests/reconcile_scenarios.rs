//! End-to-end reconciliation scenarios driven through the `VxlanMgr` entry
//! points, asserting on the exact capability-call sequences a pass issues.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use vxlan_asic::LogicalSwitchAction;
use vxlan_orch_common::{BridgeSnapshot, ChangeFlags, LogicalSwitchRow};
use vxlan_test::{
    inserted_port, inserted_switch, inserted_vlan, retagged_port, steady_switch, steady_vlan,
    AsicCall, RecordingAsic,
};
use vxlanmgrd::{ReconcileError, VxlanMgr};

fn mgr_with_recorder() -> (VxlanMgr, Arc<RecordingAsic>) {
    let asic = Arc::new(RecordingAsic::new());
    (VxlanMgr::with_provider(asic.clone()), asic)
}

#[test]
fn reconfigure_twice_without_changes_issues_nothing() {
    let (mut mgr, asic) = mgr_with_recorder();

    let first = BridgeSnapshot::new("br0")
        .with_logical_switch(inserted_switch("br0", 5000, "seg-a"))
        .with_vlan(inserted_vlan("VLAN10", 10, 5000));
    mgr.on_bridge_reconfigure(&first).unwrap();
    assert_eq!(asic.take_calls().len(), 2); // one add, one bind-all

    // Same content, flags cleared: the store reports nothing new.
    let second = BridgeSnapshot::new("br0")
        .with_logical_switch(steady_switch("br0", 5000, "seg-a"))
        .with_vlan(steady_vlan("VLAN10", 10, 5000));
    mgr.on_bridge_reconfigure(&second).unwrap();

    assert_eq!(asic.call_count(), 0);
}

#[test]
fn full_teardown_deletes_every_indexed_switch() {
    let (mut mgr, asic) = mgr_with_recorder();

    let populated = BridgeSnapshot::new("br0")
        .with_logical_switch(inserted_switch("br0", 5000, "seg-a"))
        .with_logical_switch(inserted_switch("br0", 6000, "seg-b"))
        .with_logical_switch(inserted_switch("br0", 7000, "seg-c"));
    mgr.on_bridge_reconfigure(&populated).unwrap();
    asic.take_calls();
    assert_eq!(mgr.logical_switches().count_for_bridge("br0"), 3);

    // The whole table vanishes; per-row delete flags are unobservable.
    mgr.on_bridge_reconfigure(&BridgeSnapshot::new("br0")).unwrap();

    let calls = asic.take_calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| matches!(
        c,
        AsicCall::SetLogicalSwitch { action, .. } if *action == LogicalSwitchAction::Delete
    )));
    assert_eq!(mgr.logical_switches().count_for_bridge("br0"), 0);
}

#[test]
fn delete_is_ordered_before_unrelated_add() {
    let (mut mgr, asic) = mgr_with_recorder();

    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0").with_logical_switch(inserted_switch("br0", 5000, "seg-a")),
    )
    .unwrap();
    asic.take_calls();

    // One notification carries both the deletion of 5000 and the insertion
    // of 6000.
    let snap = BridgeSnapshot::new("br0").with_logical_switch(inserted_switch("br0", 6000, "seg-b"));
    mgr.on_bridge_reconfigure(&snap).unwrap();

    let calls = asic.take_calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(
        &calls[0],
        AsicCall::SetLogicalSwitch { action, node, .. }
            if *action == LogicalSwitchAction::Delete && node.tunnel_key == 5000
    ));
    assert!(matches!(
        &calls[1],
        AsicCall::SetLogicalSwitch { action, node, .. }
            if *action == LogicalSwitchAction::Add && node.tunnel_key == 6000
    ));
}

#[test]
fn description_change_issues_one_modify_with_unchanged_key() {
    let (mut mgr, asic) = mgr_with_recorder();

    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0").with_logical_switch(inserted_switch("br0", 5000, "seg-a")),
    )
    .unwrap();
    asic.take_calls();

    let snap = BridgeSnapshot::new("br0").with_logical_switch(
        steady_switch("br0", 5000, "seg-a")
            .with_description("prod")
            .with_flags(ChangeFlags::modified()),
    );
    mgr.on_bridge_reconfigure(&snap).unwrap();

    let calls = asic.take_calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        AsicCall::SetLogicalSwitch {
            bridge,
            action,
            node,
        } => {
            assert_eq!(bridge, "br0");
            assert_eq!(*action, LogicalSwitchAction::Modify);
            assert_eq!(node.tunnel_key, 5000);
            assert_eq!(node.name.as_deref(), Some("seg-a"));
            assert_eq!(node.description.as_deref(), Some("prod"));
        }
        other => panic!("unexpected call {:?}", other),
    }
}

#[test]
fn vlan_rebind_unbinds_old_key_then_binds_new() {
    let (mut mgr, asic) = mgr_with_recorder();

    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0")
            .with_logical_switch(inserted_switch("br0", 5000, "seg-a"))
            .with_logical_switch(inserted_switch("br0", 6000, "seg-b"))
            .with_vlan(inserted_vlan("VLAN10", 10, 5000)),
    )
    .unwrap();
    asic.take_calls();

    // VLAN10's reference moves from segment 5000 to 6000.
    let snap = BridgeSnapshot::new("br0")
        .with_logical_switch(steady_switch("br0", 5000, "seg-a"))
        .with_logical_switch(steady_switch("br0", 6000, "seg-b"))
        .with_vlan(steady_vlan("VLAN10", 10, 6000));
    mgr.on_bridge_reconfigure(&snap).unwrap();

    let calls = asic.take_calls();
    assert_eq!(
        calls,
        vec![
            AsicCall::UnbindAllPorts {
                tunnel_key: 5000,
                vlan_id: 10
            },
            AsicCall::BindAllPorts {
                tunnel_key: 6000,
                vlan_id: 10
            },
        ]
    );
}

#[test]
fn port_moved_between_vlans_unbinds_then_binds() {
    let (mut mgr, asic) = mgr_with_recorder();

    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0")
            .with_logical_switch(inserted_switch("br0", 5000, "seg-a"))
            .with_logical_switch(inserted_switch("br0", 6000, "seg-b"))
            .with_vlan(inserted_vlan("VLAN10", 10, 5000))
            .with_vlan(inserted_vlan("VLAN20", 20, 6000)),
    )
    .unwrap();
    mgr.on_port_added(&BridgeSnapshot::new("br0").with_port(inserted_port("p1")))
        .unwrap();

    let snap = BridgeSnapshot::new("br0").with_port(retagged_port("p1", 10, "VLAN10"));
    mgr.on_port_updated(&snap, "p1").unwrap();
    asic.take_calls();

    let snap = BridgeSnapshot::new("br0").with_port(retagged_port("p1", 20, "VLAN20"));
    mgr.on_port_updated(&snap, "p1").unwrap();

    let calls = asic.take_calls();
    assert_eq!(
        calls,
        vec![
            AsicCall::UnbindPort {
                tunnel_key: 5000,
                vlan_id: 10,
                port: "p1".to_string()
            },
            AsicCall::BindPort {
                tunnel_key: 6000,
                vlan_id: 20,
                port: "p1".to_string()
            },
        ]
    );
}

#[test]
fn port_joining_first_vlan_only_binds() {
    let (mut mgr, asic) = mgr_with_recorder();

    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0")
            .with_logical_switch(inserted_switch("br0", 6000, "seg-b"))
            .with_vlan(inserted_vlan("VLAN20", 20, 6000)),
    )
    .unwrap();
    mgr.on_port_added(&BridgeSnapshot::new("br0").with_port(inserted_port("p1")))
        .unwrap();
    asic.take_calls();

    let snap = BridgeSnapshot::new("br0").with_port(retagged_port("p1", 20, "VLAN20"));
    mgr.on_port_updated(&snap, "p1").unwrap();

    let calls = asic.take_calls();
    assert_eq!(
        calls,
        vec![AsicCall::BindPort {
            tunnel_key: 6000,
            vlan_id: 20,
            port: "p1".to_string()
        }]
    );
}

#[test]
fn deleting_bound_port_unbinds_once_and_forgets() {
    let (mut mgr, asic) = mgr_with_recorder();

    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0")
            .with_logical_switch(inserted_switch("br0", 6000, "seg-b"))
            .with_vlan(inserted_vlan("VLAN20", 20, 6000)),
    )
    .unwrap();
    mgr.on_port_added(&BridgeSnapshot::new("br0").with_port(inserted_port("p1")))
        .unwrap();
    mgr.on_port_updated(
        &BridgeSnapshot::new("br0").with_port(retagged_port("p1", 20, "VLAN20")),
        "p1",
    )
    .unwrap();
    asic.take_calls();

    // p1 is still live on the bridge but left the configured set.
    let snap = BridgeSnapshot::new("br0").with_live_port("p1");
    mgr.on_port_deleted(&snap).unwrap();

    let calls = asic.take_calls();
    assert_eq!(
        calls,
        vec![AsicCall::UnbindPort {
            tunnel_key: 6000,
            vlan_id: 20,
            port: "p1".to_string()
        }]
    );
    assert!(mgr.port_bindings().get("p1").is_none());

    // A second delete sweep for the same port is the fatal missed-event case.
    let err = mgr.on_port_deleted(&snap).unwrap_err();
    assert!(matches!(err, ReconcileError::UntrackedPort { port } if port == "p1"));
}

#[test]
fn segment_lifecycle_add_modify_delete() {
    let (mut mgr, asic) = mgr_with_recorder();

    // Insert (tunnel_key=5000, name="seg-a").
    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0").with_logical_switch(inserted_switch("br0", 5000, "seg-a")),
    )
    .unwrap();
    let calls = asic.take_calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(
        &calls[0],
        AsicCall::SetLogicalSwitch { action, node, .. }
            if *action == LogicalSwitchAction::Add
                && node.tunnel_key == 5000
                && node.name.as_deref() == Some("seg-a")
    ));

    // Description set to "prod".
    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0").with_logical_switch(
            steady_switch("br0", 5000, "seg-a")
                .with_description("prod")
                .with_flags(ChangeFlags::modified()),
        ),
    )
    .unwrap();
    let calls = asic.take_calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(
        &calls[0],
        AsicCall::SetLogicalSwitch { action, node, .. }
            if *action == LogicalSwitchAction::Modify
                && node.tunnel_key == 5000
                && node.description.as_deref() == Some("prod")
    ));

    // Row deleted.
    mgr.on_bridge_reconfigure(&BridgeSnapshot::new("br0")).unwrap();
    let calls = asic.take_calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(
        &calls[0],
        AsicCall::SetLogicalSwitch { action, node, .. }
            if *action == LogicalSwitchAction::Delete && node.tunnel_key == 5000
    ));
    assert_eq!(mgr.logical_switches().count_for_bridge("br0"), 0);
}

#[test]
fn vlan_created_then_bound_later_passes() {
    let (mut mgr, asic) = mgr_with_recorder();

    // VLAN exists unbound; no hardware traffic.
    mgr.on_bridge_reconfigure(
        &BridgeSnapshot::new("br0").with_vlan(inserted_vlan("VLAN10", 10, 0)),
    )
    .unwrap();
    assert_eq!(asic.call_count(), 0);

    // The segment appears and the VLAN references it in the same pass. The
    // VLAN row itself carries no modified flag; the binding comparison must
    // still notice.
    let snap = BridgeSnapshot::new("br0")
        .with_logical_switch(inserted_switch("br0", 5000, "seg-a"))
        .with_vlan(steady_vlan("VLAN10", 10, 5000));
    mgr.on_bridge_reconfigure(&snap).unwrap();

    let calls = asic.take_calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(
        &calls[0],
        AsicCall::SetLogicalSwitch { action, .. } if *action == LogicalSwitchAction::Add
    ));
    assert_eq!(
        calls[1],
        AsicCall::BindAllPorts {
            tunnel_key: 5000,
            vlan_id: 10
        }
    );
}

#[test]
fn logical_switch_rows_are_scoped_by_bridge_name() {
    let (mut mgr, asic) = mgr_with_recorder();

    // br1's row rides along in the table but must not be indexed for br0.
    let mut row = LogicalSwitchRow::new("br1", 9000).with_name("foreign");
    row.flags = ChangeFlags::inserted();

    let snap = BridgeSnapshot::new("br0")
        .with_logical_switch(inserted_switch("br0", 5000, "seg-a"))
        .with_logical_switch(row);
    mgr.on_bridge_reconfigure(&snap).unwrap();

    assert_eq!(mgr.logical_switches().count_for_bridge("br0"), 1);
    assert_eq!(mgr.logical_switches().count_for_bridge("br1"), 0);
    assert_eq!(asic.take_calls().len(), 1);
}

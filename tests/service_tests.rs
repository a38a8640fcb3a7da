// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer Tests
//!
//! Node classification, provisioning and zone data over the fixture
//! inventory, plus loading configuration and snapshots from text.

mod fixtures;

use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use dcim_inventory::config::InventoryConfig;
use dcim_inventory::domain::{Named, RecordType};
use dcim_inventory::resolve::{FailOnAmbiguity, Locator};
use dcim_inventory::service::{
    classify_node, new_group, new_user, next_free_uid, zone_records, GroupRequest, UserRequest,
};
use dcim_inventory::store::MemoryStore;
use dcim_inventory::{EntityKind, InventoryError};

use fixtures::{config, inventory, RecordingChooser};

#[test]
fn test_classify_by_qualified_name() -> Result<()> {
    let config = config();
    let store = inventory();
    let locator = Locator::new(&config, &store, &FailOnAmbiguity);

    let node = classify_node(&locator, "db01.prod.iad")?;
    assert_eq!(node.node, "db01.prod.iad");
    assert_eq!(node.environment, "prod");
    assert_eq!(node.classes, vec!["database"]);
    assert_eq!(node.parameters["ntp"], "ntp1.iad.example.com");

    let node = classify_node(&locator, "test5.satest.jfk")?;
    assert_eq!(node.classes, vec!["web"]);
    assert_eq!(node.parameters["ntp"], "pool.ntp.org");
    Ok(())
}

#[test]
fn test_classify_ambiguous_host_asks_once() -> Result<()> {
    let config = config();
    let store = inventory();
    let chooser = RecordingChooser::answering(1);
    let node = classify_node(&Locator::new(&config, &store, &chooser), "web01")?;

    assert_eq!(node.node, "web01.prod.iad");
    assert_eq!(node.classes, vec!["web"]);
    assert_eq!(chooser.calls(), 1);
    Ok(())
}

#[test]
fn test_provision_user_and_group() -> Result<()> {
    let config = config();
    let store = inventory();

    assert_eq!(next_free_uid(&config, &store, "prod", "iad")?, 1002);

    let user = new_user(
        &config,
        &store,
        &FailOnAmbiguity,
        "carol.prod.iad.example.com",
        UserRequest::default(),
    )?;
    assert_eq!(user.qualified_name(), "carol.prod.iad");
    assert_eq!(user.uid, 1002);
    assert_eq!(user.home_dir.as_deref(), Some("/home/carol"));

    let group = new_group(&config, &store, &FailOnAmbiguity, "dba.prod.iad", GroupRequest::default())?;
    assert_eq!(group.gid, 2001);

    let err = new_user(&config, &store, &FailOnAmbiguity, "bob.prod.iad", UserRequest::default())
        .unwrap_err();
    assert_eq!(
        err,
        InventoryError::AlreadyExists {
            kind: EntityKind::User,
            identifier: "bob.prod.iad".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_zone_for_location() -> Result<()> {
    let config = config();
    let zone = zone_records(&inventory(), &config, "prod", "iad")?;
    let summary: Vec<(RecordType, &str, &str)> = zone
        .iter()
        .map(|r| (r.record_type, r.name.as_str(), r.target.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (RecordType::Mx, "@", "mail"),
            (RecordType::A, "db01", "10.0.0.20"),
            (RecordType::A, "web01", "10.0.0.10"),
            (RecordType::Cname, "www", "web01"),
        ]
    );
    Ok(())
}

#[test]
fn test_configuration_from_toml() -> Result<()> {
    let config = InventoryConfig::from_toml_str(
        r#"
        realms = ["prod", "satest"]
        site_ids = ["jfk"]
        domain = "example.net"

        [defaults]
        shell = "/bin/zsh"
        "#,
    )?;
    assert_eq!(config.realms, vec!["prod", "satest"]);
    assert_eq!(config.defaults.shell, "/bin/zsh");
    assert_eq!(config.defaults.home_dir_for("dave"), "/home/dave");

    let err = InventoryConfig::from_toml_str("realms = []\nsite_ids = [\"jfk\"]\ndomain = \"x.y\"")
        .unwrap_err();
    assert!(matches!(err, InventoryError::Configuration(_)));
    assert!(!err.is_caller_error());
    Ok(())
}

#[test]
fn test_snapshot_from_json() -> Result<()> {
    let snapshot = json!({
        "servers": [
            { "hostname": "stage2", "realm": "satest", "site_id": "jfk", "virtual": true },
            { "hostname": "stage3", "realm": "satest", "site_id": "jfk" }
        ],
        "users": [
            { "username": "alice", "realm": "satest", "site_id": "jfk", "uid": 1000 }
        ]
    });
    let store = MemoryStore::from_json_str(&snapshot.to_string())?;
    let config = config();
    let locator = Locator::new(&config, &store, &FailOnAmbiguity);

    let host = locator.locate_host("stage2.satest.jfk")?;
    assert!(host.is_virtual);
    assert!(locator.locate_user("alice")?.active);

    let err = MemoryStore::from_json_str("{\"servers\": [{}]}").unwrap_err();
    assert!(matches!(err, InventoryError::Store(_)));
    Ok(())
}

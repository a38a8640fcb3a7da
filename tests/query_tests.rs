// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filter Composition Tests
//!
//! Composition errors and search results against the shared fixture
//! inventory.

mod fixtures;

use anyhow::Result;
use pretty_assertions::assert_eq;
use test_case::test_case;

use dcim_inventory::domain::{DnsRecord, KvEntry, Named, Record, RecordType, Server};
use dcim_inventory::query::{
    compose, find_dns, find_kv, find_servers, query, FilterRegistry, Query,
};
use dcim_inventory::store::MemoryStore;
use dcim_inventory::InventoryError;

use fixtures::{inventory, web01_iad};

fn names(servers: &[Server]) -> Vec<String> {
    servers.iter().map(Named::qualified_name).collect()
}

#[test]
fn test_hostname_substring_sorted_ascending() -> Result<()> {
    let found = find_servers(&inventory(), &query([("hostname", "test")]))?;
    assert_eq!(
        names(&found),
        vec!["mtest3.satest.jfk", "test2.satest.jfk", "test5.satest.jfk"]
    );
    Ok(())
}

#[test]
fn test_empty_query_violates_minimum() {
    let err = find_servers(&inventory(), &Query::new()).unwrap_err();
    assert_eq!(
        err,
        InventoryError::FilterCount {
            operation: "server search".to_string(),
            count: 0,
            min: 1,
            max: usize::MAX,
        }
    );
}

#[test]
fn test_all_discards_co_supplied_keys() -> Result<()> {
    let registry = FilterRegistry::servers();
    assert_eq!(
        compose(&query([("all", "true"), ("tag", "web")]), &registry)?,
        compose(&query([("all", "true")]), &registry)?
    );

    let everything = find_servers(&inventory(), &query([("all", ""), ("cores", "banana")]))?;
    assert_eq!(everything.len(), 7);
    assert_eq!(everything[0].qualified_name(), "db01.prod.iad");
    Ok(())
}

#[test_case(FilterRegistry::servers() ; "servers")]
#[test_case(FilterRegistry::kv() ; "kv")]
#[test_case(FilterRegistry::dns() ; "dns")]
fn test_physical_virtual_conflict(registry: FilterRegistry) {
    let err = compose(&query([("physical", "1"), ("virtual", "1")]), &registry).unwrap_err();
    assert!(matches!(err, InventoryError::ConflictingFilter { .. }));
}

#[test_case("cores", "banana" ; "cores")]
#[test_case("ram", "lots" ; "ram")]
#[test_case("vlan", "1.5" ; "vlan")]
fn test_numeric_keys_reject_text(key: &str, value: &str) {
    let err = compose(&query([(key, value)]), &FilterRegistry::servers()).unwrap_err();
    assert_eq!(
        err,
        InventoryError::TypeCoercion {
            operation: "server search".to_string(),
            key: key.to_string(),
            value: value.to_string(),
        }
    );
}

#[test]
fn test_unknown_key_fails_before_store_access() {
    let err = find_servers(&inventory(), &query([("colour", "blue")])).unwrap_err();
    assert!(matches!(err, InventoryError::UnknownFilterKey { ref key, .. } if key == "colour"));
    assert!(err.is_caller_error());
}

#[test]
fn test_tag_matches_server_tag_or_host_kv_entry() -> Result<()> {
    let found = find_servers(&inventory(), &query([("tag", "web")]))?;
    assert_eq!(
        names(&found),
        vec!["stage2.satest.jfk", "test5.satest.jfk", "web01.prod.iad"]
    );
    Ok(())
}

#[test]
fn test_joined_filters() -> Result<()> {
    let store = inventory();

    let dell = find_servers(&store, &query([("manufacturer", "dell")]))?;
    assert_eq!(names(&dell), vec!["web01.prod.iad"]);

    let vlan = find_servers(&store, &query([("vlan", "900")]))?;
    assert_eq!(names(&vlan), vec!["db01.prod.iad"]);

    let by_ip = find_servers(&store, &query([("ip", "10.0.0.10"), ("realm", "prod")]))?;
    assert_eq!(names(&by_ip), vec!["web01.prod.iad"]);
    Ok(())
}

#[test]
fn test_direct_filters_combine() -> Result<()> {
    let store = inventory();

    let virtual_hosts = find_servers(&store, &query([("virtual", "")]))?;
    assert_eq!(names(&virtual_hosts), vec!["web01.prod.jfk"]);

    let physical = find_servers(&store, &query([("physical", ""), ("hostname", "web")]))?;
    assert_eq!(names(&physical), vec!["web01.prod.iad"]);

    let big = find_servers(&store, &query([("cores", "32"), ("site_id", "iad")]))?;
    assert_eq!(names(&big), vec!["db01.prod.iad"]);
    Ok(())
}

#[test]
fn test_kv_search() -> Result<()> {
    let tags = find_kv(&inventory(), &query([("key", "tag")]))?;
    let canonical: Vec<String> = tags.iter().map(Record::canonical_name).collect();
    assert_eq!(canonical, vec!["db01.prod.iad:tag", "test5.satest.jfk:tag"]);

    let ntp = find_kv(&inventory(), &query([("value", "NTP")]))?;
    assert_eq!(ntp.len(), 2);
    Ok(())
}

#[test]
fn test_dns_search() -> Result<()> {
    let records = find_dns(&inventory(), &query([("record_type", "cname")]))?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_type, RecordType::Cname);
    assert_eq!(records[0].target, "web01");
    Ok(())
}

#[test]
fn test_kv_search_returns_every_entry_for_a_host() -> Result<()> {
    let web = web01_iad();
    let store = MemoryStore::new()
        .with_kv(KvEntry::for_host(&web, "tag", "web"))
        .with_kv(KvEntry::for_host(&web, "tag", "monitoring"));

    let found = find_kv(&store, &query([("key", "tag")]))?;
    let values: Vec<&str> = found.iter().map(|kv| kv.value.as_str()).collect();
    assert_eq!(values, vec!["web", "monitoring"]);
    Ok(())
}

#[test]
fn test_dns_search_returns_every_record_for_an_owner() -> Result<()> {
    let store = MemoryStore::new()
        .with_dns(DnsRecord::new(RecordType::Ns, "@", "ns1", "prod", "iad"))
        .with_dns(DnsRecord::new(RecordType::Ns, "@", "ns2", "prod", "iad"))
        .with_dns(DnsRecord::new(RecordType::Mx, "@", "mail", "prod", "iad"));

    let found = find_dns(&store, &query([("record_type", "ns")]))?;
    let targets: Vec<&str> = found.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["ns1", "ns2"]);
    Ok(())
}

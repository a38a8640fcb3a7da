// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Filter Composition
//!
//! Composition emits filters in registry order, `all` overrides everything,
//! exclusive keys always conflict, and search output is always in canonical
//! order without repeats.

use proptest::prelude::*;

use dcim_inventory::domain::{KvEntry, Record, Server};
use dcim_inventory::query::{
    compose, find_kv, find_servers, query, Field, FilterRegistry, Predicate, Query,
};
use dcim_inventory::store::{MemoryStore, Store};
use dcim_inventory::InventoryError;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Keys of the server registry that take free text
const TEXT_KEYS: [&str; 5] = ["hostname", "realm", "site_id", "tag", "manufacturer"];

/// Arbitrary query over any key, known or not
fn any_query() -> impl Strategy<Value = Query> {
    prop::collection::btree_map("[a-z_]{1,12}", "[ -~]{0,12}", 0..8)
}

/// Query over text keys only, so it always composes
fn text_query() -> impl Strategy<Value = Query> {
    prop::collection::btree_map(prop::sample::select(TEXT_KEYS.to_vec()), "[a-z0-9]{1,6}", 1..5)
        .prop_map(|pairs| pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Servers with deliberately colliding names
fn servers() -> impl Strategy<Value = Vec<Server>> {
    prop::collection::vec(
        (
            "(web|db|test)[0-9]",
            prop::sample::select(vec!["prod", "satest"]),
            prop::sample::select(vec!["iad", "jfk"]),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(hostname, realm, site_id)| Server::new(hostname, realm, site_id))
            .collect()
    })
}

/// Key/value rows squeezed into few scopes and keys so identifiers collide
fn kv_rows() -> impl Strategy<Value = Vec<KvEntry>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["tag", "ntp"]),
            "[a-z]{1,6}",
            prop::option::of(prop::sample::select(vec!["web01", "db01"])),
        ),
        0..16,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(key, value, host)| match host {
                Some(hostname) => {
                    KvEntry::for_host(&Server::new(hostname, "prod", "iad"), key, value)
                }
                None => KvEntry::for_realm("prod", "iad", key, value),
            })
            .collect()
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: `all` discards every co-supplied key
    #[test]
    fn prop_all_discards_other_keys(mut extra in any_query()) {
        let registry = FilterRegistry::servers();
        extra.insert("all".to_string(), "true".to_string());

        prop_assert_eq!(compose(&extra, &registry), Ok(Vec::new()));
    }

    /// Property: Filters come out in registry declaration order
    #[test]
    fn prop_output_follows_registry_order(q in text_query()) {
        let registry = FilterRegistry::servers();
        let filters = compose(&q, &registry).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let declared: Vec<&str> = registry
            .rules()
            .iter()
            .map(|r| r.key)
            .filter(|k| q.contains_key(*k))
            .collect();
        let emitted: Vec<&str> = filters.iter().map(|f| f.key).collect();
        prop_assert_eq!(emitted, declared);
    }

    /// Property: Integer keys accept exactly the integers
    #[test]
    fn prop_integer_coercion(n in any::<i64>(), word in "[a-z]{1,8}") {
        let registry = FilterRegistry::servers();
        prop_assert!(compose(&query([("cores", n.to_string())]), &registry).is_ok());

        let err = compose(&query([("cores", word)]), &registry).unwrap_err();
        let is_coercion = matches!(err, InventoryError::TypeCoercion { .. });
        prop_assert!(is_coercion);
    }

    /// Property: Server search output is sorted and unique by canonical id
    #[test]
    fn prop_results_sorted_and_unique(rows in servers(), needle in "(web|db|test|[0-9])") {
        let mut store = MemoryStore::new();
        for server in rows {
            store = store.with_server(server);
        }

        let found = find_servers(&store, &query([("hostname", needle)]))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let ids: Vec<String> = found.iter().map(Record::canonical_name).collect();

        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]), "not strictly ascending: {:?}", ids);
    }

    /// Property: `physical` with `virtual` conflicts whatever else is supplied
    #[test]
    fn prop_physical_virtual_always_conflict(mut extra in any_query()) {
        extra.remove("all");
        extra.insert("physical".to_string(), String::new());
        extra.insert("virtual".to_string(), String::new());

        for registry in [FilterRegistry::servers(), FilterRegistry::kv(), FilterRegistry::dns()] {
            let conflicting = matches!(
                compose(&extra, &registry),
                Err(InventoryError::ConflictingFilter { .. })
            );
            prop_assert!(conflicting, "{} accepted physical with virtual", registry.operation());
        }
    }

    /// Property: Key/value search returns every matching row
    #[test]
    fn prop_kv_search_keeps_every_row(rows in kv_rows(), key in prop::sample::select(vec!["tag", "ntp"])) {
        let mut store = MemoryStore::new();
        for entry in rows {
            store = store.with_kv(entry);
        }

        let searched = find_kv(&store, &query([("key", key)]))
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let direct = Store::<KvEntry>::find(&store, &[Predicate::text(Field::Key, key)])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        prop_assert_eq!(searched.len(), direct.len());
    }
}

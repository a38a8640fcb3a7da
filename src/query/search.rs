// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filter execution against the inventory store
//!
//! Direct filters go to the primary table in one lookup. Join filters are
//! evaluated against their secondary table and narrow the primary result by
//! link key. Results come back sorted by canonical identifier. Only server
//! results are de-duplicated on it; key/value and DNS identifiers are shared
//! by distinct rows.

use std::collections::HashSet;
use tracing::debug;

use super::compose::{compose, Filter, Query};
use super::predicate::{Field, Predicate};
use super::registry::{FilterRegistry, Join};
use crate::domain::{DnsRecord, Hardware, KvEntry, NetworkInterface, Record, Server};
use crate::errors::InventoryResult;
use crate::store::Store;

/// Key/value key that carries server tags
pub const TAG_KEY: &str = "tag";

/// Stable sort by canonical identifier
pub fn canonical_order<R: Record>(mut records: Vec<R>) -> Vec<R> {
    records.sort_by_cached_key(|r| r.canonical_name());
    records
}

/// Sort by canonical identifier and drop repeats
pub fn canonical_unique<R: Record>(records: Vec<R>) -> Vec<R> {
    let mut records = canonical_order(records);
    records.dedup_by(|a, b| a.canonical_name() == b.canonical_name());
    records
}

/// Execute composed server filters
pub fn search_servers<S>(store: &S, filters: &[Filter]) -> InventoryResult<Vec<Server>>
where
    S: Store<Server> + Store<Hardware> + Store<NetworkInterface> + Store<KvEntry>,
{
    let direct: Vec<Predicate> = filters
        .iter()
        .filter(|f| f.join == Join::Direct)
        .map(|f| f.predicate.clone())
        .collect();
    let mut servers = Store::<Server>::find(store, &direct)?;

    for filter in filters.iter().filter(|f| f.join != Join::Direct) {
        match filter.join {
            Join::Hardware => {
                let tags: HashSet<String> =
                    Store::<Hardware>::find(store, std::slice::from_ref(&filter.predicate))?
                        .into_iter()
                        .map(|hw| hw.hw_tag)
                        .collect();
                servers.retain(|s| s.hw_tag.as_ref().is_some_and(|t| tags.contains(t)));
            }
            Join::Interface => {
                let hosts: HashSet<String> =
                    Store::<NetworkInterface>::find(store, std::slice::from_ref(&filter.predicate))?
                        .iter()
                        .map(NetworkInterface::host_name)
                        .collect();
                servers.retain(|s| hosts.contains(&s.canonical_name()));
            }
            Join::TagUnion => {
                let tagged = kv_tagged_hosts(store, &filter.predicate)?;
                servers.retain(|s| {
                    filter.predicate.matches(s) || tagged.contains(&s.canonical_name())
                });
            }
            Join::Direct => {}
        }
        debug!(filter = filter.key, remaining = servers.len(), "Applied join filter");
    }

    Ok(canonical_unique(servers))
}

/// Canonical ids of hosts carrying a matching host-scoped `tag` entry
fn kv_tagged_hosts<S: Store<KvEntry>>(
    store: &S,
    tag: &Predicate,
) -> InventoryResult<HashSet<String>> {
    let value = Predicate {
        field: Field::KvValue,
        op: tag.op,
        value: tag.value.clone(),
    };
    let entries = store.find(&[Predicate::text(Field::Key, TAG_KEY), value])?;
    Ok(entries
        .into_iter()
        .filter(|kv| kv.specificity() == 3)
        .map(|kv| kv.scope())
        .collect())
}

/// Execute filters against a single table
pub fn search_records<R, S>(store: &S, filters: &[Filter]) -> InventoryResult<Vec<R>>
where
    R: Record,
    S: Store<R>,
{
    let predicates: Vec<Predicate> = filters.iter().map(|f| f.predicate.clone()).collect();
    Ok(canonical_order(store.find(&predicates)?))
}

/// Compose and run a server search
pub fn find_servers<S>(store: &S, query: &Query) -> InventoryResult<Vec<Server>>
where
    S: Store<Server> + Store<Hardware> + Store<NetworkInterface> + Store<KvEntry>,
{
    let filters = compose(query, &FilterRegistry::servers())?;
    search_servers(store, &filters)
}

/// Compose and run a key/value search
pub fn find_kv<S: Store<KvEntry>>(store: &S, query: &Query) -> InventoryResult<Vec<KvEntry>> {
    let filters = compose(query, &FilterRegistry::kv())?;
    search_records(store, &filters)
}

/// Compose and run a DNS record search
pub fn find_dns<S: Store<DnsRecord>>(store: &S, query: &Query) -> InventoryResult<Vec<DnsRecord>> {
    let filters = compose(query, &FilterRegistry::dns())?;
    search_records(store, &filters)
}

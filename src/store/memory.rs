// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory inventory store
//!
//! Backs tests and the command-line front end. Tables are plain vectors so
//! iteration order is insertion order, which is exactly what the resolver
//! expects from a real backend. Snapshots load from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::Store;
use crate::domain::{DnsRecord, Group, Hardware, KvEntry, NetworkInterface, Server, User};
use crate::errors::{InventoryError, InventoryResult};
use crate::query::{matches_all, Predicate};

/// Vector-backed store of every inventory table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    pub servers: Vec<Server>,
    pub hardware: Vec<Hardware>,
    pub interfaces: Vec<NetworkInterface>,
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub kv: Vec<KvEntry>,
    pub dns: Vec<DnsRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON snapshot
    pub fn from_json_str(raw: &str) -> InventoryResult<Self> {
        let store: Self = serde_json::from_str(raw)?;
        debug!(
            servers = store.servers.len(),
            users = store.users.len(),
            groups = store.groups.len(),
            "Parsed inventory snapshot"
        );
        Ok(store)
    }

    /// Load a JSON snapshot from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> InventoryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InventoryError::Store(format!("cannot read {}: {}", path.display(), e)))?;
        let store = Self::from_json_str(&raw)?;
        info!("Loaded inventory snapshot from {}", path.display());
        Ok(store)
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn with_hardware(mut self, hardware: Hardware) -> Self {
        self.hardware.push(hardware);
        self
    }

    pub fn with_interface(mut self, interface: NetworkInterface) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_kv(mut self, entry: KvEntry) -> Self {
        self.kv.push(entry);
        self
    }

    pub fn with_dns(mut self, record: DnsRecord) -> Self {
        self.dns.push(record);
        self
    }
}

fn select<R: crate::domain::Record>(rows: &[R], predicates: &[Predicate]) -> Vec<R> {
    rows.iter()
        .filter(|row| matches_all(predicates, *row))
        .cloned()
        .collect()
}

macro_rules! memory_table {
    ($record:ty, $table:ident) => {
        impl Store<$record> for MemoryStore {
            fn find(&self, predicates: &[Predicate]) -> InventoryResult<Vec<$record>> {
                Ok(select(&self.$table, predicates))
            }
        }
    };
}

memory_table!(Server, servers);
memory_table!(Hardware, hardware);
memory_table!(NetworkInterface, interfaces);
memory_table!(User, users);
memory_table!(Group, groups);
memory_table!(KvEntry, kv);
memory_table!(DnsRecord, dns);

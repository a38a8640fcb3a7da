// Copyright (c) 2025 - Cowboy AI, Inc.
//! Datacenter inventory name resolution and query composition
//!
//! Hosts, users and groups live in *realms* (prod, satest, ...) at
//! *sites* (iad, jfk, ...) under one managed domain. Operators refer to them
//! by partial, dotted identifiers; this crate turns those into exactly one
//! record, and turns loose key/value search requests into store predicates.
//!
//! # Layers
//!
//! ```text
//! config      → realms, site ids, domain, id ranges (read-only context)
//! domain      → records, identifier grammar, validation predicates
//! store       → Store<R>::find(predicates) abstraction + in-memory backend
//! resolve     → chooser, disambiguation resolver, entity locators
//! query       → filter registry, composition engine, search
//! service     → node classification, provisioning, DNS zone data
//! ```
//!
//! # Example
//!
//! ```rust
//! use dcim_inventory::config::InventoryConfig;
//! use dcim_inventory::domain::Server;
//! use dcim_inventory::query::{find_servers, query};
//! use dcim_inventory::resolve::{FailOnAmbiguity, Locator};
//! use dcim_inventory::store::MemoryStore;
//!
//! let config = InventoryConfig::default();
//! let store = MemoryStore::new()
//!     .with_server(Server::new("web01", "prod", "iad"))
//!     .with_server(Server::new("web02", "prod", "jfk"));
//!
//! let host = Locator::new(&config, &store, &FailOnAmbiguity)
//!     .locate_host("web01.prod.iad.example.com")
//!     .unwrap();
//! assert_eq!(host.site_id, "iad");
//!
//! let found = find_servers(&store, &query([("hostname", "web")])).unwrap();
//! assert_eq!(found.len(), 2);
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod query;
pub mod resolve;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::InventoryConfig;
pub use domain::{
    DnsRecord, EntityKind, Group, Hardware, IdentifierParser, KvEntry, NetworkInterface,
    RecordType, ResolvedName, Server, User,
};
pub use errors::{InventoryError, InventoryResult};
pub use query::{compose, FilterRegistry, Query};
pub use resolve::{Chooser, FailOnAmbiguity, InteractiveChooser, Locator, Resolver};
pub use store::{MemoryStore, Store};

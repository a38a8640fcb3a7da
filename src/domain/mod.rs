// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! Core domain concepts for name resolution: the identifier grammar, the
//! inventory records the resolver hands out, and the pure validation
//! predicates everything else calls into.
//!
//! # Identifier Grammar
//!
//! - [`Segments`] - tagged split of a dotted identifier (1 to 5 segments)
//! - [`ResolvedName`] - decomposed `name.realm.site_id.domain`
//! - [`IdentifierParser`] - segment-count dispatch with operator menus
//!
//! # Records
//!
//! - [`Server`], [`Hardware`], [`NetworkInterface`]
//! - [`User`], [`Group`]
//! - [`KvEntry`], [`DnsRecord`]

pub mod identifier;
pub mod records;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use identifier::{IdentifierParser, ResolvedName, Segments};
pub use records::{
    DnsRecord, Group, Hardware, KvEntry, Named, NetworkInterface, Record, RecordType, Server,
    User,
};

/// Kind of inventory record, used in error messages and menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Host,
    User,
    Group,
    Hardware,
    Interface,
    KeyValue,
    DnsRecord,
}

impl EntityKind {
    /// Get the canonical string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::User => "user",
            Self::Group => "group",
            Self::Hardware => "hardware",
            Self::Interface => "interface",
            Self::KeyValue => "key/value entry",
            Self::DnsRecord => "dns record",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filter predicates: `(field, operator, value)` triples

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Record;

/// Inventory attribute a predicate targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Hostname,
    Realm,
    SiteId,
    Virtual,
    HwTag,
    Cores,
    Ram,
    Disk,
    Tag,
    Manufacturer,
    Model,
    Interface,
    Mac,
    Ip,
    Vlan,
    Username,
    Groupname,
    Uid,
    Gid,
    Email,
    Active,
    Key,
    KvValue,
    RecordType,
    Name,
    Target,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hostname => "hostname",
            Self::Realm => "realm",
            Self::SiteId => "site_id",
            Self::Virtual => "virtual",
            Self::HwTag => "hw_tag",
            Self::Cores => "cores",
            Self::Ram => "ram",
            Self::Disk => "disk",
            Self::Tag => "tag",
            Self::Manufacturer => "manufacturer",
            Self::Model => "model",
            Self::Interface => "interface",
            Self::Mac => "mac",
            Self::Ip => "ip",
            Self::Vlan => "vlan",
            Self::Username => "username",
            Self::Groupname => "groupname",
            Self::Uid => "uid",
            Self::Gid => "gid",
            Self::Email => "email",
            Self::Active => "active",
            Self::Key => "key",
            Self::KvValue => "value",
            Self::RecordType => "record_type",
            Self::Name => "name",
            Self::Target => "target",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparison applied between a record attribute and the predicate value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Exact equality
    Eq,
    /// Case-insensitive substring
    Contains,
    /// Inclusive numeric range, value must be [`Value::Range`]
    Within,
}

/// Attribute or predicate value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Range(i64, i64),
    Text(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Range(lo, hi) => write!(f, "{}..={}", lo, hi),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A single attribute predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: Field,
    pub op: Operator,
    pub value: Value,
}

impl Predicate {
    pub fn eq(field: Field, value: Value) -> Self {
        Self {
            field,
            op: Operator::Eq,
            value,
        }
    }

    /// Equality against a text value
    pub fn text(field: Field, value: impl Into<String>) -> Self {
        Self::eq(field, Value::Text(value.into()))
    }

    pub fn contains(field: Field, needle: impl Into<String>) -> Self {
        Self {
            field,
            op: Operator::Contains,
            value: Value::Text(needle.into()),
        }
    }

    pub fn within(field: Field, lo: i64, hi: i64) -> Self {
        Self {
            field,
            op: Operator::Within,
            value: Value::Range(lo, hi),
        }
    }

    /// Evaluate against a record; absent attributes never match
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let Some(actual) = record.field(self.field) else {
            return false;
        };
        match (self.op, &actual, &self.value) {
            (Operator::Eq, actual, expected) => actual == expected,
            (Operator::Contains, Value::Text(haystack), Value::Text(needle)) => haystack
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            (Operator::Within, Value::Int(n), Value::Range(lo, hi)) => lo <= n && n <= hi,
            _ => false,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            Operator::Eq => "=",
            Operator::Contains => "~",
            Operator::Within => "in",
        };
        write!(f, "{} {} {}", self.field, op, self.value)
    }
}

/// All predicates hold for the record
pub fn matches_all<R: Record>(predicates: &[Predicate], record: &R) -> bool {
    predicates.iter().all(|p| p.matches(record))
}

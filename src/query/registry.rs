// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative Filter Registry
//!
//! Maps externally supplied query keys to predicate construction rules. The
//! rules are kept in declaration order and composition emits filters in that
//! order, so which rule applies to a key never depends on the order the
//! caller happened to supply keys in.

use serde::Serialize;

use super::predicate::Field;

/// Key that selects every record and discards all other keys
pub const ALL_KEY: &str = "all";

/// Exclusive pairs every registry starts with
pub const UNIVERSAL_EXCLUSIVE: [(&str, &str); 1] = [("physical", "virtual")];

/// How the raw query string becomes a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Exact text equality
    Exact,
    /// Case-insensitive equality against an upper-case keyword
    Keyword,
    /// Case-insensitive substring
    Contains,
    /// Integer equality, input must parse
    Integer,
    /// Presence flag; the value is ignored and the field is compared to the constant
    Flag(bool),
}

/// Secondary table a filter is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Join {
    /// Attribute of the primary record
    Direct,
    /// Hardware records, linked by hardware tag
    Hardware,
    /// Network interfaces, linked by canonical host id
    Interface,
    /// Server tag merged with host-scoped `tag` key/value entries
    TagUnion,
}

/// One registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRule {
    pub key: &'static str,
    pub field: Field,
    pub shape: Shape,
    pub join: Join,
}

/// Inclusive bounds on the number of keys an operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for FilterBounds {
    fn default() -> Self {
        Self {
            min: 1,
            max: usize::MAX,
        }
    }
}

/// Filter registry for one list/search operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRegistry {
    operation: &'static str,
    accepts_all: bool,
    rules: Vec<FilterRule>,
    exclusive: Vec<(&'static str, &'static str)>,
    bounds: FilterBounds,
}

impl FilterRegistry {
    /// Registry for the named operation, with no rules yet
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            accepts_all: false,
            rules: Vec::new(),
            exclusive: UNIVERSAL_EXCLUSIVE.to_vec(),
            bounds: FilterBounds::default(),
        }
    }

    /// Accept the `all` key
    pub fn with_all(mut self) -> Self {
        self.accepts_all = true;
        self
    }

    /// Append a rule; rules are consulted in the order they are added
    pub fn rule(mut self, key: &'static str, field: Field, shape: Shape, join: Join) -> Self {
        self.rules.push(FilterRule {
            key,
            field,
            shape,
            join,
        });
        self
    }

    /// Declare two keys mutually exclusive
    pub fn exclusive(mut self, first: &'static str, second: &'static str) -> Self {
        self.exclusive.push((first, second));
        self
    }

    pub fn with_bounds(mut self, min: usize, max: usize) -> Self {
        self.bounds = FilterBounds { min, max };
        self
    }

    /// Server search
    pub fn servers() -> Self {
        Self::new("server search")
            .with_all()
            .rule("hostname", Field::Hostname, Shape::Contains, Join::Direct)
            .rule("realm", Field::Realm, Shape::Exact, Join::Direct)
            .rule("site_id", Field::SiteId, Shape::Exact, Join::Direct)
            .rule("physical", Field::Virtual, Shape::Flag(false), Join::Direct)
            .rule("virtual", Field::Virtual, Shape::Flag(true), Join::Direct)
            .rule("tag", Field::Tag, Shape::Exact, Join::TagUnion)
            .rule("manufacturer", Field::Manufacturer, Shape::Contains, Join::Hardware)
            .rule("model", Field::Model, Shape::Contains, Join::Hardware)
            .rule("hw_tag", Field::HwTag, Shape::Exact, Join::Direct)
            .rule("cores", Field::Cores, Shape::Integer, Join::Direct)
            .rule("ram", Field::Ram, Shape::Integer, Join::Direct)
            .rule("disk", Field::Disk, Shape::Integer, Join::Direct)
            .rule("vlan", Field::Vlan, Shape::Integer, Join::Interface)
            .rule("ip", Field::Ip, Shape::Exact, Join::Interface)
    }

    /// Key/value metadata search
    pub fn kv() -> Self {
        Self::new("kv search")
            .with_all()
            .rule("hostname", Field::Hostname, Shape::Exact, Join::Direct)
            .rule("realm", Field::Realm, Shape::Exact, Join::Direct)
            .rule("site_id", Field::SiteId, Shape::Exact, Join::Direct)
            .rule("key", Field::Key, Shape::Exact, Join::Direct)
            .rule("value", Field::KvValue, Shape::Contains, Join::Direct)
    }

    /// DNS record search
    pub fn dns() -> Self {
        Self::new("dns search")
            .with_all()
            .rule("record_type", Field::RecordType, Shape::Keyword, Join::Direct)
            .rule("name", Field::Name, Shape::Contains, Join::Direct)
            .rule("target", Field::Target, Shape::Contains, Join::Direct)
            .rule("realm", Field::Realm, Shape::Exact, Join::Direct)
            .rule("site_id", Field::SiteId, Shape::Exact, Join::Direct)
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn accepts_all(&self) -> bool {
        self.accepts_all
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn exclusive_pairs(&self) -> &[(&'static str, &'static str)] {
        &self.exclusive
    }

    pub fn bounds(&self) -> FilterBounds {
        self.bounds
    }

    /// First rule declared for a key
    pub fn lookup(&self, key: &str) -> Option<&FilterRule> {
        self.rules.iter().find(|r| r.key == key)
    }

    /// Key is recognised, including `all` when accepted
    pub fn knows(&self, key: &str) -> bool {
        (self.accepts_all && key == ALL_KEY) || self.lookup(key).is_some()
    }
}

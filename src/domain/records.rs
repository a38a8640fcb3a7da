// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Records
//!
//! Plain structured records as the resolver and query engine consume them.
//! Persistence is somebody else's problem; these only need to expose their
//! attributes to predicates ([`Record::field`]) and a canonical identifier
//! used for deterministic ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::EntityKind;
use crate::query::{Field, Value};

/// A record stored in the inventory
pub trait Record: Clone {
    /// Kind label used in errors
    const KIND: EntityKind;

    /// Attribute value for predicate evaluation, `None` when absent
    fn field(&self, field: Field) -> Option<Value>;

    /// Identifier results are ordered by
    fn canonical_name(&self) -> String;
}

/// A record addressable as `name.realm.site_id`
pub trait Named: Record {
    /// Field holding the unqualified name
    const NAME_FIELD: Field;

    fn name(&self) -> &str;
    fn realm(&self) -> &str;
    fn site_id(&self) -> &str;

    /// `name.realm.site_id`
    fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.name(), self.realm(), self.site_id())
    }
}

fn text(value: &str) -> Option<Value> {
    Some(Value::Text(value.to_string()))
}

fn opt_text(value: &Option<String>) -> Option<Value> {
    value.as_deref().and_then(text)
}

fn opt_int(value: Option<u32>) -> Option<Value> {
    value.map(|v| Value::Int(i64::from(v)))
}

/// Server (physical or virtual host)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,

    /// Unqualified hostname
    pub hostname: String,

    pub realm: String,

    pub site_id: String,

    /// Virtual machine rather than bare metal
    #[serde(rename = "virtual", default)]
    pub is_virtual: bool,

    /// Hardware asset tag (physical servers)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hw_tag: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cores: Option<u32>,

    /// Memory in GB
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ram: Option<u32>,

    /// Disk in GB
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disk: Option<u32>,

    /// Role tag
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tag: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Server {
    pub fn new(
        hostname: impl Into<String>,
        realm: impl Into<String>,
        site_id: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            hostname: hostname.into(),
            realm: realm.into(),
            site_id: site_id.into(),
            is_virtual: false,
            hw_tag: None,
            cores: None,
            ram: None,
            disk: None,
            tag: None,
            created_at: Utc::now(),
        }
    }

    /// Mark as a virtual machine
    pub fn virtual_machine(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_hardware(mut self, hw_tag: impl Into<String>) -> Self {
        self.hw_tag = Some(hw_tag.into());
        self
    }

    pub fn with_resources(mut self, cores: u32, ram: u32, disk: u32) -> Self {
        self.cores = Some(cores);
        self.ram = Some(ram);
        self.disk = Some(disk);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl Record for Server {
    const KIND: EntityKind = EntityKind::Host;

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Hostname => text(&self.hostname),
            Field::Realm => text(&self.realm),
            Field::SiteId => text(&self.site_id),
            Field::Virtual => Some(Value::Bool(self.is_virtual)),
            Field::HwTag => opt_text(&self.hw_tag),
            Field::Cores => opt_int(self.cores),
            Field::Ram => opt_int(self.ram),
            Field::Disk => opt_int(self.disk),
            Field::Tag => opt_text(&self.tag),
            _ => None,
        }
    }

    fn canonical_name(&self) -> String {
        self.qualified_name()
    }
}

impl Named for Server {
    const NAME_FIELD: Field = Field::Hostname;

    fn name(&self) -> &str {
        &self.hostname
    }

    fn realm(&self) -> &str {
        &self.realm
    }

    fn site_id(&self) -> &str {
        &self.site_id
    }
}

/// Hardware asset backing a physical server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hardware {
    pub hw_tag: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub manufacturer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cores: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ram: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub disk: Option<u32>,
}

impl Hardware {
    pub fn new(
        hw_tag: impl Into<String>,
        manufacturer: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            hw_tag: hw_tag.into(),
            manufacturer: Some(manufacturer.into()),
            model: Some(model.into()),
            cores: None,
            ram: None,
            disk: None,
        }
    }
}

impl Record for Hardware {
    const KIND: EntityKind = EntityKind::Hardware;

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::HwTag => text(&self.hw_tag),
            Field::Manufacturer => opt_text(&self.manufacturer),
            Field::Model => opt_text(&self.model),
            Field::Cores => opt_int(self.cores),
            Field::Ram => opt_int(self.ram),
            Field::Disk => opt_int(self.disk),
            _ => None,
        }
    }

    fn canonical_name(&self) -> String {
        self.hw_tag.clone()
    }
}

/// Network interface attached to a server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub hostname: String,
    pub realm: String,
    pub site_id: String,

    /// Interface name, e.g. `eth0`
    pub interface: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mac: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ip: Option<String>,

    /// IEEE 802.1Q VLAN id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vlan: Option<u16>,
}

impl NetworkInterface {
    pub fn new(server: &Server, interface: impl Into<String>) -> Self {
        Self {
            hostname: server.hostname.clone(),
            realm: server.realm.clone(),
            site_id: server.site_id.clone(),
            interface: interface.into(),
            mac: None,
            ip: None,
            vlan: None,
        }
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn with_vlan(mut self, vlan: u16) -> Self {
        self.vlan = Some(vlan);
        self
    }

    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.mac = Some(mac.into());
        self
    }

    /// Canonical id of the owning server
    pub fn host_name(&self) -> String {
        format!("{}.{}.{}", self.hostname, self.realm, self.site_id)
    }
}

impl Record for NetworkInterface {
    const KIND: EntityKind = EntityKind::Interface;

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Hostname => text(&self.hostname),
            Field::Realm => text(&self.realm),
            Field::SiteId => text(&self.site_id),
            Field::Interface => text(&self.interface),
            Field::Mac => opt_text(&self.mac),
            Field::Ip => opt_text(&self.ip),
            Field::Vlan => self.vlan.map(|v| Value::Int(i64::from(v))),
            _ => None,
        }
    }

    fn canonical_name(&self) -> String {
        format!("{}:{}", self.host_name(), self.interface)
    }
}

/// Login account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,

    pub username: String,
    pub realm: String,
    pub site_id: String,
    pub uid: u32,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub shell: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub home_dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ssh_public_key: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn new(
        username: impl Into<String>,
        realm: impl Into<String>,
        site_id: impl Into<String>,
        uid: u32,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: username.into(),
            realm: realm.into(),
            site_id: site_id.into(),
            uid,
            first_name: None,
            last_name: None,
            email: None,
            shell: None,
            home_dir: None,
            ssh_public_key: None,
            active: true,
            created_at: Utc::now(),
        }
    }
}

impl Record for User {
    const KIND: EntityKind = EntityKind::User;

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Username => text(&self.username),
            Field::Realm => text(&self.realm),
            Field::SiteId => text(&self.site_id),
            Field::Uid => Some(Value::Int(i64::from(self.uid))),
            Field::Email => opt_text(&self.email),
            Field::Active => Some(Value::Bool(self.active)),
            _ => None,
        }
    }

    fn canonical_name(&self) -> String {
        self.qualified_name()
    }
}

impl Named for User {
    const NAME_FIELD: Field = Field::Username;

    fn name(&self) -> &str {
        &self.username
    }

    fn realm(&self) -> &str {
        &self.realm
    }

    fn site_id(&self) -> &str {
        &self.site_id
    }
}

/// Unix group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,

    pub groupname: String,
    pub realm: String,
    pub site_id: String,
    pub gid: u32,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(
        groupname: impl Into<String>,
        realm: impl Into<String>,
        site_id: impl Into<String>,
        gid: u32,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            groupname: groupname.into(),
            realm: realm.into(),
            site_id: site_id.into(),
            gid,
            description: None,
            created_at: Utc::now(),
        }
    }
}

impl Record for Group {
    const KIND: EntityKind = EntityKind::Group;

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Groupname => text(&self.groupname),
            Field::Realm => text(&self.realm),
            Field::SiteId => text(&self.site_id),
            Field::Gid => Some(Value::Int(i64::from(self.gid))),
            _ => None,
        }
    }

    fn canonical_name(&self) -> String {
        self.qualified_name()
    }
}

impl Named for Group {
    const NAME_FIELD: Field = Field::Groupname;

    fn name(&self) -> &str {
        &self.groupname
    }

    fn realm(&self) -> &str {
        &self.realm
    }

    fn site_id(&self) -> &str {
        &self.site_id
    }
}

/// Key/value metadata, optionally scoped to a site, realm or host
///
/// An entry with no scope applies globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    pub key: String,
    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hostname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub realm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub site_id: Option<String>,
}

impl KvEntry {
    pub fn global(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            hostname: None,
            realm: None,
            site_id: None,
        }
    }

    pub fn for_site(
        site_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            site_id: Some(site_id.into()),
            ..Self::global(key, value)
        }
    }

    pub fn for_realm(
        realm: impl Into<String>,
        site_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            realm: Some(realm.into()),
            ..Self::for_site(site_id, key, value)
        }
    }

    pub fn for_host(server: &Server, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            hostname: Some(server.hostname.clone()),
            ..Self::for_realm(server.realm.clone(), server.site_id.clone(), key, value)
        }
    }

    /// Dotted scope built from whichever of hostname/realm/site_id are set
    pub fn scope(&self) -> String {
        [&self.hostname, &self.realm, &self.site_id]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Number of scope parts set: 0 global, 3 host
    pub fn specificity(&self) -> usize {
        [&self.hostname, &self.realm, &self.site_id]
            .into_iter()
            .filter(|p| p.is_some())
            .count()
    }

    /// Scope is compatible with the given host
    pub fn applies_to(&self, server: &Server) -> bool {
        let matches = |scope: &Option<String>, actual: &str| {
            scope.as_deref().map_or(true, |s| s == actual)
        };
        matches(&self.hostname, &server.hostname)
            && matches(&self.realm, &server.realm)
            && matches(&self.site_id, &server.site_id)
    }
}

impl Record for KvEntry {
    const KIND: EntityKind = EntityKind::KeyValue;

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::Hostname => opt_text(&self.hostname),
            Field::Realm => opt_text(&self.realm),
            Field::SiteId => opt_text(&self.site_id),
            Field::Key => text(&self.key),
            Field::KvValue => text(&self.value),
            _ => None,
        }
    }

    fn canonical_name(&self) -> String {
        let scope = self.scope();
        if scope.is_empty() {
            self.key.clone()
        } else {
            format!("{}:{}", scope, self.key)
        }
    }
}

/// DNS record types managed by the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Cname,
    Mx,
    Ns,
    Txt,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Txt => "TXT",
        }
    }

    /// Parse a record type, case-insensitive
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "CNAME" => Some(Self::Cname),
            "MX" => Some(Self::Mx),
            "NS" => Some(Self::Ns),
            "TXT" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Types whose target is another hostname: CNAME, MX and NS
    pub fn requires_hostname_target(&self) -> bool {
        matches!(self, Self::Cname | Self::Mx | Self::Ns)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// DNS record within a realm/site zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub record_type: RecordType,

    /// Owner name relative to the zone
    pub name: String,

    pub target: String,
    pub realm: String,
    pub site_id: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ttl: Option<u32>,
}

impl DnsRecord {
    pub fn new(
        record_type: RecordType,
        name: impl Into<String>,
        target: impl Into<String>,
        realm: impl Into<String>,
        site_id: impl Into<String>,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            target: target.into(),
            realm: realm.into(),
            site_id: site_id.into(),
            ttl: None,
        }
    }
}

impl Record for DnsRecord {
    const KIND: EntityKind = EntityKind::DnsRecord;

    fn field(&self, field: Field) -> Option<Value> {
        match field {
            Field::RecordType => text(self.record_type.as_str()),
            Field::Name => text(&self.name),
            Field::Target => text(&self.target),
            Field::Realm => text(&self.realm),
            Field::SiteId => text(&self.site_id),
            _ => None,
        }
    }

    fn canonical_name(&self) -> String {
        format!(
            "{}.{}.{}:{}",
            self.name, self.realm, self.site_id, self.record_type
        )
    }
}

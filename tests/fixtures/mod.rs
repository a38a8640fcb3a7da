// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for dcim-inventory
//!
//! Provides a deterministic inventory shared by the integration tests.
//! All UUIDs and timestamps are fixed constants so serialized output and
//! ordering are reproducible.
//!
//! # Inventory
//!
//! ```text
//! satest.jfk   test2  test5 (kv tag web)  mtest3  stage2 (tag web)
//! prod.iad     web01 (tag web, HW-1001)   db01 (HW-1002)
//! prod.jfk     web01 (virtual)
//! ```

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

use dcim_inventory::config::InventoryConfig;
use dcim_inventory::domain::{
    DnsRecord, Group, Hardware, KvEntry, NetworkInterface, RecordType, Server, User,
};
use dcim_inventory::resolve::Chooser;
use dcim_inventory::store::MemoryStore;

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Base for fixed UUID v7-shaped ids
const ID_BASE: u128 = 0x01934f4a_0000_7000_8000_000000000000;

pub fn fixed_id(n: u128) -> Uuid {
    Uuid::from_u128(ID_BASE | n)
}

pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// prod, satest, dev × iad, jfk, sfo under example.com
pub fn config() -> InventoryConfig {
    InventoryConfig::new(["prod", "satest", "dev"], ["iad", "jfk", "sfo"], "example.com")
        .expect("Invalid fixture configuration")
        .with_uid_range(1000, 1999)
        .with_gid_range(2000, 2999)
}

pub fn server(n: u128, hostname: &str, realm: &str, site_id: &str) -> Server {
    Server {
        id: fixed_id(n),
        created_at: fixed_timestamp(),
        ..Server::new(hostname, realm, site_id)
    }
}

pub fn user(n: u128, username: &str, realm: &str, site_id: &str, uid: u32) -> User {
    User {
        id: fixed_id(n),
        created_at: fixed_timestamp(),
        ..User::new(username, realm, site_id, uid)
    }
}

pub fn group(n: u128, groupname: &str, realm: &str, site_id: &str, gid: u32) -> Group {
    Group {
        id: fixed_id(n),
        created_at: fixed_timestamp(),
        ..Group::new(groupname, realm, site_id, gid)
    }
}

pub fn web01_iad() -> Server {
    server(4, "web01", "prod", "iad")
        .with_tag("web")
        .with_hardware("HW-1001")
        .with_resources(16, 64, 500)
}

pub fn db01_iad() -> Server {
    server(5, "db01", "prod", "iad")
        .with_hardware("HW-1002")
        .with_resources(32, 256, 4000)
}

/// The shared inventory
pub fn inventory() -> MemoryStore {
    let test5 = server(2, "test5", "satest", "jfk");
    MemoryStore::new()
        .with_server(server(1, "test2", "satest", "jfk"))
        .with_server(test5.clone())
        .with_server(server(3, "mtest3", "satest", "jfk"))
        .with_server(server(7, "stage2", "satest", "jfk").with_tag("web"))
        .with_server(web01_iad())
        .with_server(db01_iad())
        .with_server(
            server(6, "web01", "prod", "jfk")
                .virtual_machine()
                .with_resources(4, 8, 40),
        )
        .with_hardware(Hardware::new("HW-1001", "Dell", "PowerEdge R640"))
        .with_hardware(Hardware::new("HW-1002", "HPE", "ProLiant DL380"))
        .with_interface(
            NetworkInterface::new(&web01_iad(), "eth0")
                .with_ip("10.0.0.10")
                .with_vlan(100),
        )
        .with_interface(
            NetworkInterface::new(&db01_iad(), "eth0")
                .with_ip("10.0.0.20")
                .with_vlan(200),
        )
        .with_interface(NetworkInterface::new(&db01_iad(), "ipmi").with_vlan(900))
        .with_kv(KvEntry::for_host(&test5, "tag", "web"))
        .with_kv(KvEntry::global("ntp", "pool.ntp.org"))
        .with_kv(KvEntry::for_site("iad", "ntp", "ntp1.iad.example.com"))
        .with_kv(KvEntry::for_host(&db01_iad(), "tag", "database"))
        .with_user(user(10, "alice", "prod", "iad", 1000))
        .with_user(user(11, "alice", "satest", "jfk", 1000))
        .with_user(user(12, "bob", "prod", "iad", 1001))
        .with_group(group(20, "ops", "prod", "iad", 2000))
        .with_dns(DnsRecord::new(RecordType::Cname, "www", "web01", "prod", "iad"))
        .with_dns(DnsRecord::new(RecordType::Mx, "@", "mail", "prod", "iad"))
}

/// Chooser that records every call and answers with a fixed selection
pub struct RecordingChooser {
    answer: Option<usize>,
    calls: Cell<usize>,
    last_options: RefCell<Vec<String>>,
}

impl RecordingChooser {
    pub fn answering(answer: usize) -> Self {
        Self {
            answer: Some(answer),
            calls: Cell::new(0),
            last_options: RefCell::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            answer: None,
            calls: Cell::new(0),
            last_options: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_options(&self) -> Vec<String> {
        self.last_options.borrow().clone()
    }
}

impl Chooser for RecordingChooser {
    fn choose(&self, _prompt: &str, options: &[String]) -> Option<usize> {
        self.calls.set(self.calls.get() + 1);
        *self.last_options.borrow_mut() = options.to_vec();
        self.answer
    }
}

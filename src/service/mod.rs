// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer
//!
//! Operations built on top of resolution and query composition:
//!
//! ```text
//! Locator / compose
//!     ↓
//! classify   → classes + parameters for one host
//! provision  → new user / group records
//! dns        → per realm/site zone data
//! ```
//!
//! Nothing here writes to the store. Services return records and leave the
//! transaction to the caller.

pub mod classify;
pub mod dns;
pub mod provision;

pub use classify::{classify, classify_node, NodeClassification, ENVIRONMENT_KEY};
pub use dns::{zone_records, PRIMARY_INTERFACE};
pub use provision::{new_group, new_user, next_free_gid, next_free_uid, GroupRequest, UserRequest};

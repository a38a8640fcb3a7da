// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filter-Composition Engine
//!
//! ```text
//! query mapping ──compose()──▶ ordered filters ──search_*()──▶ sorted records
//!                    │
//!              FilterRegistry
//!   (key → field, shape, join; exclusive pairs; bounds)
//! ```
//!
//! - [`predicate`] - `(field, operator, value)` triples and their evaluation
//! - [`registry`] - declarative key tables for servers, key/value and DNS
//! - [`compose`] - validation and predicate construction
//! - [`search`] - execution with joins and canonical ordering

pub mod compose;
pub mod predicate;
pub mod registry;
pub mod search;

pub use compose::{compose, query, Filter, Query};
pub use predicate::{matches_all, Field, Operator, Predicate, Value};
pub use registry::{
    FilterBounds, FilterRegistry, FilterRule, Join, Shape, ALL_KEY, UNIVERSAL_EXCLUSIVE,
};
pub use search::{
    canonical_order, canonical_unique, find_dns, find_kv, find_servers, search_records,
    search_servers, TAG_KEY,
};

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Store Abstraction
//!
//! The relational store itself lives outside this crate. Resolution and
//! query composition only need one capability from it:
//!
//! ```text
//! find(predicates) → ordered records of one kind
//! ```
//!
//! # Store Requirements
//!
//! 1. **Stable order**: records come back in insertion/storage order
//! 2. **Predicates**: equality, case-insensitive substring and range
//! 3. **Blocking**: calls run to completion on the caller's thread
//!
//! The core never writes through this interface; callers own commit and
//! rollback around any mutation.

use crate::domain::Record;
use crate::errors::InventoryResult;
use crate::query::Predicate;

pub mod memory;

pub use memory::MemoryStore;

/// Read access to one table of the inventory
///
/// Implemented once per record type, so a full backend is
/// `Store<Server> + Store<User> + ...`. With several bounds in scope call it
/// as `Store::<Server>::find(store, &predicates)`.
pub trait Store<R: Record> {
    /// Records matching every predicate, in storage order
    fn find(&self, predicates: &[Predicate]) -> InventoryResult<Vec<R>>;
}

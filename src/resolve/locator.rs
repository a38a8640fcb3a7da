// Copyright (c) 2025 - Cowboy AI, Inc.
//! Entity Locators
//!
//! Turn a raw host, user or group identifier into exactly one record. A raw
//! string without a `.` is a bare name and goes straight to the resolver;
//! anything dotted is parsed by the identifier grammar first (a leaf name is
//! required) and then resolved.

use tracing::debug;

use super::chooser::Chooser;
use super::resolver::{Criteria, Resolver};
use crate::config::InventoryConfig;
use crate::domain::{Group, IdentifierParser, Named, Server, User};
use crate::errors::{InventoryError, InventoryResult};
use crate::store::Store;

/// Locates records by raw identifier
pub struct Locator<'a, S: ?Sized> {
    config: &'a InventoryConfig,
    store: &'a S,
    chooser: &'a dyn Chooser,
}

impl<'a, S: ?Sized> Locator<'a, S> {
    pub fn new(config: &'a InventoryConfig, store: &'a S, chooser: &'a dyn Chooser) -> Self {
        Self {
            config,
            store,
            chooser,
        }
    }

    pub fn config(&self) -> &'a InventoryConfig {
        self.config
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    pub fn chooser(&self) -> &'a dyn Chooser {
        self.chooser
    }

    /// Criteria for a raw identifier
    pub fn criteria(&self, raw: &str) -> InventoryResult<Criteria> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(InventoryError::malformed(raw, "identifier has no segments"));
        }
        if !raw.contains('.') {
            return Ok(Criteria::name(raw));
        }
        let name = IdentifierParser::new(self.config, self.chooser).parse(raw, true)?;
        Ok(name.into())
    }

    /// Locate one record of kind `R`
    pub fn locate<R>(&self, raw: &str) -> InventoryResult<R>
    where
        R: Named,
        S: Store<R>,
    {
        let criteria = self.criteria(raw)?;
        let record: R = Resolver::new(self.chooser).resolve(self.store, &criteria)?;
        debug!(kind = %R::KIND, raw, located = %record.qualified_name(), "Located");
        Ok(record)
    }

    pub fn locate_host(&self, raw: &str) -> InventoryResult<Server>
    where
        S: Store<Server>,
    {
        self.locate(raw)
    }

    pub fn locate_user(&self, raw: &str) -> InventoryResult<User>
    where
        S: Store<User>,
    {
        self.locate(raw)
    }

    pub fn locate_group(&self, raw: &str) -> InventoryResult<Group>
    where
        S: Store<Group>,
    {
        self.locate(raw)
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Disambiguation Resolver
//!
//! One implementation for every [`Named`] record kind. Present criteria
//! fields become equality predicates, the store is queried once, and the
//! candidate count decides the outcome:
//!
//! ```text
//! 0  → NotFound            (chooser untouched)
//! 1  → the record          (chooser untouched)
//! n  → 1-indexed menu of name.realm.site_id, in candidate order
//! ```

use std::fmt;
use tracing::{debug, info};

use super::chooser::{select, Chooser};
use crate::domain::{Group, Named, ResolvedName, Server, User};
use crate::errors::{InventoryError, InventoryResult};
use crate::query::{Field, Predicate};
use crate::store::Store;

/// Partial `name.realm.site_id`; absent fields are unconstrained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub name: Option<String>,
    pub realm: Option<String>,
    pub site_id: Option<String>,
}

impl Criteria {
    /// Name-only criteria
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn in_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    pub fn at_site(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    /// Equality predicates for the fields that are present
    pub fn predicates(&self, name_field: Field) -> Vec<Predicate> {
        [
            (name_field, &self.name),
            (Field::Realm, &self.realm),
            (Field::SiteId, &self.site_id),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_ref().map(|v| Predicate::text(field, v.clone())))
        .collect()
    }
}

impl From<ResolvedName> for Criteria {
    fn from(name: ResolvedName) -> Self {
        Self {
            name: name.name,
            realm: Some(name.realm),
            site_id: Some(name.site_id),
        }
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.name, &self.realm, &self.site_id]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Resolves criteria to exactly one record
pub struct Resolver<'a> {
    chooser: &'a dyn Chooser,
}

impl<'a> Resolver<'a> {
    pub fn new(chooser: &'a dyn Chooser) -> Self {
        Self { chooser }
    }

    /// Resolve criteria against one table of the store
    pub fn resolve<R, S>(&self, store: &S, criteria: &Criteria) -> InventoryResult<R>
    where
        R: Named,
        S: Store<R> + ?Sized,
    {
        let identifier = criteria.to_string();
        let mut candidates = store.find(&criteria.predicates(R::NAME_FIELD))?;
        debug!(
            kind = %R::KIND,
            identifier = %identifier,
            candidates = candidates.len(),
            "Resolving"
        );

        match candidates.len() {
            0 => Err(InventoryError::NotFound {
                kind: R::KIND,
                identifier,
            }),
            1 => Ok(candidates.remove(0)),
            n => {
                info!(kind = %R::KIND, identifier = %identifier, n, "Ambiguous name");
                let options: Vec<String> = candidates.iter().map(Named::qualified_name).collect();
                let index = select(self.chooser, R::KIND.as_str(), &identifier, &options)?;
                Ok(candidates.swap_remove(index))
            }
        }
    }

    pub fn host<S: Store<Server> + ?Sized>(
        &self,
        store: &S,
        criteria: &Criteria,
    ) -> InventoryResult<Server> {
        self.resolve(store, criteria)
    }

    pub fn user<S: Store<User> + ?Sized>(
        &self,
        store: &S,
        criteria: &Criteria,
    ) -> InventoryResult<User> {
        self.resolve(store, criteria)
    }

    pub fn group<S: Store<Group> + ?Sized>(
        &self,
        store: &S,
        criteria: &Criteria,
    ) -> InventoryResult<Group> {
        self.resolve(store, criteria)
    }
}

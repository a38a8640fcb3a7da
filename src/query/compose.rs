// Copyright (c) 2025 - Cowboy AI, Inc.
//! Filter Composition
//!
//! Turns a query mapping into an ordered filter list using a
//! [`FilterRegistry`]. Checks run in a fixed order:
//!
//! 1. `all` present (and accepted) → every other key is discarded
//! 2. exclusive pairs → [`InventoryError::ConflictingFilter`]
//! 3. unknown keys → [`InventoryError::UnknownFilterKey`]
//! 4. key count bounds → [`InventoryError::FilterCount`]
//! 5. value coercion → [`InventoryError::TypeCoercion`]
//!
//! Nothing is executed here; a failed composition means no store access
//! at all.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use super::predicate::{Predicate, Value};
use super::registry::{FilterRegistry, FilterRule, Join, Shape, ALL_KEY};
use crate::errors::{InventoryError, InventoryResult};

/// Composed filter: a predicate plus the table it is evaluated against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub key: &'static str,
    pub join: Join,
    pub predicate: Predicate,
}

/// Query mapping as supplied by callers
pub type Query = BTreeMap<String, String>;

/// Build a [`Query`] from string pairs
pub fn query<I, K, V>(pairs: I) -> Query
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Compose the filters for a query; an empty result selects everything
pub fn compose(query: &Query, registry: &FilterRegistry) -> InventoryResult<Vec<Filter>> {
    let operation = registry.operation();

    if registry.accepts_all() && query.contains_key(ALL_KEY) {
        debug!(
            operation,
            discarded = query.len() - 1,
            "'all' supplied, ignoring other filters"
        );
        return Ok(Vec::new());
    }

    for (first, second) in registry.exclusive_pairs() {
        if query.contains_key(*first) && query.contains_key(*second) {
            return Err(InventoryError::ConflictingFilter {
                operation: operation.to_string(),
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    }

    if let Some(key) = query.keys().find(|k| !registry.knows(k)) {
        return Err(InventoryError::UnknownFilterKey {
            operation: operation.to_string(),
            key: key.clone(),
        });
    }

    let bounds = registry.bounds();
    if query.len() < bounds.min || query.len() > bounds.max {
        return Err(InventoryError::FilterCount {
            operation: operation.to_string(),
            count: query.len(),
            min: bounds.min,
            max: bounds.max,
        });
    }

    let mut seen = HashSet::new();
    let mut filters = Vec::with_capacity(query.len());
    for rule in registry.rules() {
        let Some(raw) = query.get(rule.key) else {
            continue;
        };
        if !seen.insert(rule.key) {
            continue;
        }
        filters.push(Filter {
            key: rule.key,
            join: rule.join,
            predicate: build_predicate(operation, rule, raw)?,
        });
    }

    debug!(operation, filters = filters.len(), "Composed query filters");
    Ok(filters)
}

fn build_predicate(operation: &str, rule: &FilterRule, raw: &str) -> InventoryResult<Predicate> {
    let predicate = match rule.shape {
        Shape::Exact => Predicate::text(rule.field, raw),
        Shape::Keyword => Predicate::text(rule.field, raw.to_ascii_uppercase()),
        Shape::Contains => Predicate::contains(rule.field, raw),
        Shape::Flag(flag) => Predicate::eq(rule.field, Value::Bool(flag)),
        Shape::Integer => {
            let n = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| InventoryError::TypeCoercion {
                    operation: operation.to_string(),
                    key: rule.key.to_string(),
                    value: raw.to_string(),
                })?;
            Predicate::eq(rule.field, Value::Int(n))
        }
    };
    Ok(predicate)
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration-management node classification
//!
//! Produces the classes and parameters an external node classifier hands to
//! the configuration manager for one host.
//!
//! # Parameter Precedence
//!
//! ```text
//! global  <  site  <  realm+site  <  host
//! ```
//!
//! A more specific key/value entry overrides a less specific one with the
//! same key. `tag` entries become classes, never parameters.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use crate::domain::{KvEntry, Named, Server};
use crate::errors::InventoryResult;
use crate::query::TAG_KEY;
use crate::resolve::Locator;
use crate::store::Store;

/// Parameter naming the environment a host belongs to
pub const ENVIRONMENT_KEY: &str = "environment";

/// Classifier output for one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeClassification {
    /// `hostname.realm.site_id`
    pub node: String,
    pub environment: String,
    pub classes: Vec<String>,
    pub parameters: BTreeMap<String, String>,
}

/// Locate a host and classify it
pub fn classify_node<S>(locator: &Locator<'_, S>, raw: &str) -> InventoryResult<NodeClassification>
where
    S: Store<Server> + Store<KvEntry> + ?Sized,
{
    let server = locator.locate_host(raw)?;
    let entries = Store::<KvEntry>::find(locator.store(), &[])?;
    let classification = classify(&server, &entries);
    info!(
        node = %classification.node,
        classes = classification.classes.len(),
        parameters = classification.parameters.len(),
        "Classified node"
    );
    Ok(classification)
}

/// Classify a located host against every key/value entry
pub fn classify(server: &Server, entries: &[KvEntry]) -> NodeClassification {
    let mut applicable: Vec<&KvEntry> = entries.iter().filter(|kv| kv.applies_to(server)).collect();
    // stable: equal specificity keeps storage order, last one wins
    applicable.sort_by_key(|kv| kv.specificity());

    let mut classes: BTreeSet<String> = server.tag.iter().cloned().collect();
    let mut parameters = BTreeMap::new();
    for kv in applicable {
        if kv.key == TAG_KEY {
            if kv.specificity() == 3 {
                classes.insert(kv.value.clone());
            }
            continue;
        }
        debug!(key = %kv.key, scope = %kv.scope(), "Parameter");
        parameters.insert(kv.key.clone(), kv.value.clone());
    }

    let environment = parameters
        .get(ENVIRONMENT_KEY)
        .cloned()
        .unwrap_or_else(|| server.realm.clone());

    NodeClassification {
        node: server.qualified_name(),
        environment,
        classes: classes.into_iter().collect(),
        parameters,
    }
}

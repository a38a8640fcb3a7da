// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identifier Grammar
//!
//! Dotted identifiers name a host, user or group at some qualification
//! level:
//!
//! ```text
//! 5  name.realm.site_id.domain.tld
//! 4  realm.site_id.domain.tld        | name.realm.site_id.domain-label
//! 3  site_id.domain.tld              | name.realm.site_id
//! 2  domain.tld                      | realm.site_id
//! 1  name
//! ```
//!
//! The segment count alone selects the candidate readings; validation
//! against the configuration context picks between them, with the domain
//! reading always tried first. Readings that leave the realm or site open
//! are completed through an operator menu.
//!
//! # Example
//!
//! ```rust
//! use dcim_inventory::config::InventoryConfig;
//! use dcim_inventory::domain::IdentifierParser;
//! use dcim_inventory::resolve::FailOnAmbiguity;
//!
//! let config = InventoryConfig::default();
//! let parser = IdentifierParser::new(&config, &FailOnAmbiguity);
//!
//! let name = parser.parse("web01.prod.iad.example.com", true).unwrap();
//! assert_eq!(name.name.as_deref(), Some("web01"));
//! assert_eq!(name.site_id, "iad");
//!
//! assert!(parser.parse("a.b.c.d.e.f", true).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::validation::{is_valid_domain, is_valid_realm, is_valid_site_id};
use crate::config::InventoryConfig;
use crate::errors::{InventoryError, InventoryResult};
use crate::resolve::chooser::{select, Chooser};

/// Maximum number of dot-separated segments
pub const MAX_SEGMENTS: usize = 5;

/// Identifier split by segment count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segments<'a> {
    One(&'a str),
    Two(&'a str, &'a str),
    Three(&'a str, &'a str, &'a str),
    Four(&'a str, &'a str, &'a str, &'a str),
    Five(&'a str, &'a str, &'a str, &'a str, &'a str),
}

impl<'a> Segments<'a> {
    /// Split on `.`; 0 segments, more than 5, or an empty segment is malformed
    pub fn split(raw: &'a str) -> InventoryResult<Self> {
        if raw.trim().is_empty() {
            return Err(InventoryError::malformed(raw, "identifier has no segments"));
        }
        let parts: Vec<&'a str> = raw.split('.').collect();
        if parts.iter().any(|p| p.trim().is_empty()) {
            return Err(InventoryError::malformed(raw, "identifier has an empty segment"));
        }
        match *parts.as_slice() {
            [a] => Ok(Self::One(a)),
            [a, b] => Ok(Self::Two(a, b)),
            [a, b, c] => Ok(Self::Three(a, b, c)),
            [a, b, c, d] => Ok(Self::Four(a, b, c, d)),
            [a, b, c, d, e] => Ok(Self::Five(a, b, c, d, e)),
            _ => Err(InventoryError::malformed(
                raw,
                format!(
                    "{} segments, at most {} allowed",
                    parts.len(),
                    MAX_SEGMENTS
                ),
            )),
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::One(..) => 1,
            Self::Two(..) => 2,
            Self::Three(..) => 3,
            Self::Four(..) => 4,
            Self::Five(..) => 5,
        }
    }
}

/// Decomposed identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedName {
    /// Leaf name, absent for realm/site-only identifiers
    pub name: Option<String>,
    pub realm: String,
    pub site_id: String,
    pub domain: String,
}

impl ResolvedName {
    /// `name.realm.site_id` or `realm.site_id`
    pub fn unqualified(&self) -> String {
        match &self.name {
            Some(name) => format!("{}.{}.{}", name, self.realm, self.site_id),
            None => format!("{}.{}", self.realm, self.site_id),
        }
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.unqualified(), self.domain)
    }
}

/// Interpretation chosen before any operator interaction
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reading {
    Complete {
        name: Option<String>,
        realm: String,
        site_id: String,
    },
    /// Site and domain known, realm open
    PickRealm {
        name: Option<String>,
        site_id: String,
    },
    /// Realm and site both open
    PickLocation { name: Option<String> },
}

impl Reading {
    fn has_name(&self) -> bool {
        match self {
            Self::Complete { name, .. }
            | Self::PickRealm { name, .. }
            | Self::PickLocation { name } => name.is_some(),
        }
    }
}

/// Parses identifiers against a configuration context
pub struct IdentifierParser<'a> {
    config: &'a InventoryConfig,
    chooser: &'a dyn Chooser,
}

impl<'a> IdentifierParser<'a> {
    pub fn new(config: &'a InventoryConfig, chooser: &'a dyn Chooser) -> Self {
        Self { config, chooser }
    }

    /// Parse `raw` into a [`ResolvedName`]
    ///
    /// `expect_name` states whether the caller needs a leaf name; a mismatch
    /// is malformed and is detected before any menu is shown.
    pub fn parse(&self, raw: &str, expect_name: bool) -> InventoryResult<ResolvedName> {
        let raw = raw.trim();
        let segments = Segments::split(raw)?;
        let reading = self.interpret(raw, segments)?;
        debug!(identifier = raw, segments = segments.count(), ?reading, "Interpreted identifier");

        match (expect_name, reading.has_name()) {
            (true, false) => {
                return Err(InventoryError::malformed(raw, "a leaf name is required"))
            }
            (false, true) => {
                return Err(InventoryError::malformed(raw, "a leaf name is not allowed here"))
            }
            _ => {}
        }

        self.complete(raw, reading)
    }

    fn interpret(&self, raw: &str, segments: Segments<'_>) -> InventoryResult<Reading> {
        let config = self.config;
        match segments {
            Segments::Five(name, realm, site_id, domain, tld) => {
                let domain = format!("{}.{}", domain, tld);
                if !is_valid_domain(config, &domain) {
                    return Err(self.invalid_domain(raw, &domain));
                }
                self.check_location(raw, realm, site_id)?;
                Ok(complete(Some(name), realm, site_id))
            }
            Segments::Four(a, b, c, d) => {
                let domain = format!("{}.{}", c, d);
                if is_valid_domain(config, &domain) {
                    self.check_location(raw, a, b)?;
                    Ok(complete(None, a, b))
                } else if d == config.domain_label() {
                    self.check_location(raw, b, c)?;
                    Ok(complete(Some(a), b, c))
                } else {
                    Err(self.invalid_domain(raw, &domain))
                }
            }
            Segments::Three(a, b, c) => {
                let domain = format!("{}.{}", b, c);
                if is_valid_domain(config, &domain) {
                    if !is_valid_site_id(config, a) {
                        return Err(InventoryError::malformed(
                            raw,
                            format!("invalid site id '{}'", a),
                        ));
                    }
                    return Ok(Reading::PickRealm {
                        name: None,
                        site_id: a.to_string(),
                    });
                }
                match (is_valid_realm(config, b), is_valid_site_id(config, c)) {
                    (true, true) => Ok(complete(Some(a), b, c)),
                    (false, false) => Err(InventoryError::malformed(
                        raw,
                        format!(
                            "'{}' is not the configured domain, and neither realm '{}' nor site id '{}' is valid",
                            domain, b, c
                        ),
                    )),
                    (false, true) => Err(InventoryError::malformed(
                        raw,
                        format!("invalid realm '{}'", b),
                    )),
                    (true, false) => Err(InventoryError::malformed(
                        raw,
                        format!("invalid site id '{}'", c),
                    )),
                }
            }
            Segments::Two(a, b) => {
                let domain = format!("{}.{}", a, b);
                if is_valid_domain(config, &domain) {
                    Ok(Reading::PickLocation { name: None })
                } else if is_valid_realm(config, a) && is_valid_site_id(config, b) {
                    Ok(complete(None, a, b))
                } else {
                    Err(InventoryError::malformed(
                        raw,
                        "neither the configured domain nor a valid realm.site_id pair",
                    ))
                }
            }
            Segments::One(name) => Ok(Reading::PickLocation {
                name: Some(name.to_string()),
            }),
        }
    }

    fn complete(&self, raw: &str, reading: Reading) -> InventoryResult<ResolvedName> {
        let config = self.config;
        let (name, realm, site_id) = match reading {
            Reading::Complete {
                name,
                realm,
                site_id,
            } => (name, realm, site_id),
            Reading::PickRealm { name, site_id } => {
                let realm = if config.realms.len() == 1 {
                    config.realms[0].clone()
                } else {
                    let options: Vec<String> = config
                        .realms
                        .iter()
                        .map(|realm| format!("{}.{}", realm, site_id))
                        .collect();
                    let index = select(self.chooser, "realm", raw, &options)?;
                    config.realms[index].clone()
                };
                (name, realm, site_id)
            }
            Reading::PickLocation { name } => {
                let locations: Vec<(&String, &String)> = config
                    .realms
                    .iter()
                    .flat_map(|realm| config.site_ids.iter().map(move |site| (realm, site)))
                    .collect();
                let index = if locations.len() == 1 {
                    0
                } else {
                    let options: Vec<String> = locations
                        .iter()
                        .map(|(realm, site)| format!("{}.{}", realm, site))
                        .collect();
                    select(self.chooser, "realm.site_id", raw, &options)?
                };
                let (realm, site_id) = locations[index];
                (name, realm.clone(), site_id.clone())
            }
        };

        Ok(ResolvedName {
            name,
            realm,
            site_id,
            domain: config.domain.clone(),
        })
    }

    fn check_location(&self, raw: &str, realm: &str, site_id: &str) -> InventoryResult<()> {
        let mut invalid = Vec::new();
        if !is_valid_realm(self.config, realm) {
            invalid.push(format!("realm '{}'", realm));
        }
        if !is_valid_site_id(self.config, site_id) {
            invalid.push(format!("site id '{}'", site_id));
        }
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(InventoryError::malformed(
                raw,
                format!("invalid {}", invalid.join(" and ")),
            ))
        }
    }

    fn invalid_domain(&self, raw: &str, domain: &str) -> InventoryError {
        InventoryError::malformed(
            raw,
            format!(
                "domain '{}' is not the configured domain '{}'",
                domain, self.config.domain
            ),
        )
    }
}

fn complete(name: Option<&str>, realm: &str, site_id: &str) -> Reading {
    Reading::Complete {
        name: name.map(str::to_string),
        realm: realm.to_string(),
        site_id: site_id.to_string(),
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Configuration Context
//!
//! Holds the realm and site-id vocabularies, the managed domain, the numeric
//! id ranges and the user defaults. The context is loaded once and passed by
//! reference into every parser, resolver and validator; nothing in the crate
//! reads it from a global.
//!
//! # Example
//!
//! ```toml
//! realms = ["prod", "satest", "dev"]
//! site_ids = ["iad", "jfk", "sfo"]
//! domain = "example.com"
//!
//! [uid_range]
//! start = 500
//! end = 65000
//!
//! [defaults]
//! shell = "/bin/bash"
//! home_dir = "/home/{username}"
//! email_domain = "example.com"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::errors::{InventoryError, InventoryResult};

/// Inclusive numeric id range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub start: u32,
    pub end: u32,
}

impl IdRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.start <= id && id <= self.end
    }
}

/// Defaults applied to newly provisioned users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefaults {
    /// Login shell
    #[serde(default = "default_shell")]
    pub shell: String,

    /// Home directory template, `{username}` is substituted
    #[serde(default = "default_home_dir")]
    pub home_dir: String,

    /// Domain used to derive email addresses
    #[serde(default = "default_email_domain")]
    pub email_domain: String,
}

fn default_shell() -> String {
    "/bin/bash".to_string()
}

fn default_home_dir() -> String {
    "/home/{username}".to_string()
}

fn default_email_domain() -> String {
    "example.com".to_string()
}

fn default_uid_range() -> IdRange {
    IdRange::new(500, 65000)
}

fn default_gid_range() -> IdRange {
    IdRange::new(500, 65000)
}

impl Default for UserDefaults {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            home_dir: default_home_dir(),
            email_domain: default_email_domain(),
        }
    }
}

impl UserDefaults {
    /// Expand the home directory template for a user
    pub fn home_dir_for(&self, username: &str) -> String {
        self.home_dir.replace("{username}", username)
    }

    pub fn email_for(&self, username: &str) -> String {
        format!("{}@{}", username, self.email_domain)
    }
}

/// Process-wide inventory configuration, read-only after load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Valid realms, in presentation order
    pub realms: Vec<String>,

    /// Valid site ids, in presentation order
    pub site_ids: Vec<String>,

    /// Managed domain as `domain.tld`
    pub domain: String,

    #[serde(default = "default_uid_range")]
    pub uid_range: IdRange,

    #[serde(default = "default_gid_range")]
    pub gid_range: IdRange,

    #[serde(default)]
    pub defaults: UserDefaults,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            realms: vec!["prod".to_string(), "satest".to_string(), "dev".to_string()],
            site_ids: vec!["iad".to_string(), "jfk".to_string(), "sfo".to_string()],
            domain: "example.com".to_string(),
            uid_range: default_uid_range(),
            gid_range: default_gid_range(),
            defaults: UserDefaults::default(),
        }
    }
}

impl InventoryConfig {
    /// Create a configuration from realm and site-id lists and a domain
    pub fn new<R, S>(realms: R, site_ids: S, domain: impl Into<String>) -> InventoryResult<Self>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        let config = Self {
            realms: realms.into_iter().map(Into::into).collect(),
            site_ids: site_ids.into_iter().map(Into::into).collect(),
            domain: domain.into(),
            uid_range: default_uid_range(),
            gid_range: default_gid_range(),
            defaults: UserDefaults::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the uid range
    pub fn with_uid_range(mut self, start: u32, end: u32) -> Self {
        self.uid_range = IdRange::new(start, end);
        self
    }

    /// Set the gid range
    pub fn with_gid_range(mut self, start: u32, end: u32) -> Self {
        self.gid_range = IdRange::new(start, end);
        self
    }

    /// Set the user defaults
    pub fn with_defaults(mut self, defaults: UserDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> InventoryResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        debug!(
            realms = config.realms.len(),
            site_ids = config.site_ids.len(),
            "Parsed inventory configuration"
        );
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> InventoryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            InventoryError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!("Loaded inventory configuration from {}", path.display());
        Ok(config)
    }

    /// Check structural invariants of the configuration
    pub fn validate(&self) -> InventoryResult<()> {
        if self.realms.is_empty() {
            return Err(InventoryError::Configuration(
                "at least one realm must be configured".to_string(),
            ));
        }
        if self.site_ids.is_empty() {
            return Err(InventoryError::Configuration(
                "at least one site id must be configured".to_string(),
            ));
        }
        let labels: Vec<&str> = self.domain.split('.').collect();
        if labels.len() != 2 || labels.iter().any(|l| l.is_empty()) {
            return Err(InventoryError::Configuration(format!(
                "domain must be of the form domain.tld, got '{}'",
                self.domain
            )));
        }
        for (what, range) in [("uid", self.uid_range), ("gid", self.gid_range)] {
            if range.start > range.end {
                return Err(InventoryError::Configuration(format!(
                    "{} range start {} exceeds end {}",
                    what, range.start, range.end
                )));
            }
        }
        for realm in &self.realms {
            if realm.contains('.') || realm.is_empty() {
                return Err(InventoryError::Configuration(format!(
                    "invalid realm '{}'",
                    realm
                )));
            }
        }
        for site_id in &self.site_ids {
            if site_id.contains('.') || site_id.is_empty() {
                return Err(InventoryError::Configuration(format!(
                    "invalid site id '{}'",
                    site_id
                )));
            }
        }
        Ok(())
    }

    /// First label of the configured domain (`example` for `example.com`)
    pub fn domain_label(&self) -> &str {
        self.domain.split('.').next().unwrap_or(&self.domain)
    }
}

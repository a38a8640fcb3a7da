// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Predicates
//!
//! Every function here is stateless and returns `bool`; none of them error.
//! Callers decide whether a `false` is fatal (assert context) or simply
//! excludes a reading (filter context), which is how the identifier grammar
//! uses them to pick between interpretations.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::config::InventoryConfig;

/// SSH key algorithms accepted for user keys
pub const SSH_KEY_TYPES: [&str; 2] = ["ssh-dss", "ssh-rsa"];

/// Maximum length for a single DNS label (RFC 1123)
pub const MAX_LABEL_LENGTH: usize = 63;

/// Realm is one of the configured realms
pub fn is_valid_realm(config: &InventoryConfig, realm: &str) -> bool {
    config.realms.iter().any(|r| r == realm)
}

/// Site id is one of the configured site ids
pub fn is_valid_site_id(config: &InventoryConfig, site_id: &str) -> bool {
    config.site_ids.iter().any(|s| s == site_id)
}

/// Domain equals the configured `domain.tld`
pub fn is_valid_domain(config: &InventoryConfig, domain: &str) -> bool {
    config.domain == domain
}

pub fn is_valid_uid(config: &InventoryConfig, uid: u32) -> bool {
    config.uid_range.contains(uid)
}

pub fn is_valid_gid(config: &InventoryConfig, gid: u32) -> bool {
    config.gid_range.contains(gid)
}

/// A single DNS label: 1-63 chars, alphanumeric or hyphen, no edge hyphens
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= MAX_LABEL_LENGTH
        && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !label.starts_with('-')
        && !label.ends_with('-')
}

/// OpenSSH public key line: `<type> <base64 blob> [comment]`
///
/// The decoded blob must start with a 4-byte big-endian length followed by
/// the algorithm name, and that name must match the declared type.
pub fn is_valid_ssh_pubkey(_config: &InventoryConfig, key: &str) -> bool {
    let mut fields = key.split_whitespace();
    let (Some(key_type), Some(blob)) = (fields.next(), fields.next()) else {
        return false;
    };
    if !SSH_KEY_TYPES.contains(&key_type) {
        return false;
    }
    let Ok(decoded) = STANDARD.decode(blob) else {
        return false;
    };
    if decoded.len() < 4 {
        return false;
    }
    let len = u32::from_be_bytes([decoded[0], decoded[1], decoded[2], decoded[3]]) as usize;
    match decoded.get(4..4 + len) {
        Some(name) => name == key_type.as_bytes(),
        None => false,
    }
}

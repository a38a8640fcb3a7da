// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Identifier Grammar
//!
//! Every configured `name.realm.site_id.domain.tld` parses to exactly its
//! parts without interaction, and every identifier outside the 1-5 segment
//! grammar is rejected before any menu is shown.

use proptest::prelude::*;

use dcim_inventory::domain::{IdentifierParser, ResolvedName};
use dcim_inventory::resolve::FixedChoice;
use dcim_inventory::InventoryError;

use crate::fixtures::{config, RecordingChooser};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Leaf names: hostnames, usernames, group names
fn leaf_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,14}"
}

fn realm() -> impl Strategy<Value = String> {
    prop::sample::select(config().realms)
}

fn site_id() -> impl Strategy<Value = String> {
    prop::sample::select(config().site_ids)
}

/// Six to ten non-empty labels
fn too_many_segments() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9]{1,8}", 6..=10).prop_map(|labels| labels.join("."))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Fully qualified identifiers parse exactly
    ///
    /// All five segments are taken verbatim and no menu is presented.
    #[test]
    fn prop_fully_qualified_parses_exactly(
        name in leaf_name(),
        realm in realm(),
        site_id in site_id(),
    ) {
        let config = config();
        let chooser = RecordingChooser::answering(1);
        let raw = format!("{}.{}.{}.{}", name, realm, site_id, config.domain);

        let parsed = IdentifierParser::new(&config, &chooser).parse(&raw, true);

        prop_assert_eq!(
            parsed,
            Ok(ResolvedName {
                name: Some(name),
                realm,
                site_id,
                domain: config.domain.clone(),
            })
        );
        prop_assert_eq!(chooser.calls(), 0, "No menu for a complete identifier");
    }

    /// Property: More than five segments is always malformed
    #[test]
    fn prop_too_many_segments_is_malformed(raw in too_many_segments(), expect_name in any::<bool>()) {
        let config = config();
        let chooser = RecordingChooser::answering(1);
        let parsed = IdentifierParser::new(&config, &chooser).parse(&raw, expect_name);

        let is_malformed = matches!(parsed, Err(InventoryError::MalformedIdentifier { .. }));
        prop_assert!(is_malformed);
        prop_assert_eq!(chooser.calls(), 0);
    }

    /// Property: A bare name's menu is the realm-major cross-product
    ///
    /// Selecting entry `k` yields realm `(k-1) / |sites|` and site
    /// `(k-1) % |sites|` in configured order.
    #[test]
    fn prop_bare_name_menu_is_realm_major(name in leaf_name(), pick in 1usize..=9) {
        let config = config();
        let parsed = IdentifierParser::new(&config, &FixedChoice(pick))
            .parse(&name, true)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let sites = config.site_ids.len();
        prop_assert_eq!(parsed.name.as_deref(), Some(name.as_str()));
        prop_assert_eq!(&parsed.realm, &config.realms[(pick - 1) / sites]);
        prop_assert_eq!(&parsed.site_id, &config.site_ids[(pick - 1) % sites]);
    }

    /// Property: Parsing is deterministic
    #[test]
    fn prop_parse_is_deterministic(name in leaf_name(), realm in realm(), site_id in site_id()) {
        let config = config();
        let chooser = FixedChoice(1);
        let parser = IdentifierParser::new(&config, &chooser);
        let raw = format!("{}.{}.{}", name, realm, site_id);

        prop_assert_eq!(parser.parse(&raw, true), parser.parse(&raw, true));
    }
}

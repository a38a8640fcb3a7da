// Copyright (c) 2025 - Cowboy AI, Inc.
//! Name Resolution
//!
//! ```text
//! raw identifier
//!     ↓
//! Locator ── no '.' ──────────────┐
//!     ↓ dotted                    │
//! IdentifierParser (grammar)      │
//!     ↓ ResolvedName              ↓
//! Resolver ── store lookup ── Criteria
//!     ↓ 0 / 1 / n candidates
//! Chooser (n > 1)
//!     ↓
//! exactly one record
//! ```

pub mod chooser;
pub mod locator;
pub mod resolver;

pub use chooser::{Chooser, FailOnAmbiguity, FixedChoice, InteractiveChooser};
pub use locator::Locator;
pub use resolver::{Criteria, Resolver};

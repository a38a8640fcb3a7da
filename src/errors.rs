// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for inventory resolution and query operations

use thiserror::Error;

use crate::domain::EntityKind;

/// Errors that can occur while resolving names or composing queries
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Identifier shape matches no known pattern
    #[error("Malformed identifier '{identifier}': {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    /// Zero candidates after narrowing
    #[error("{kind} '{identifier}' does not exist")]
    NotFound {
        kind: EntityKind,
        identifier: String,
    },

    /// Ambiguous resolution without a valid operator selection
    #[error("No valid selection made for ambiguous {what} '{identifier}'")]
    SelectionAborted { what: String, identifier: String },

    /// Query key absent from the filter registry
    #[error("{operation}: unknown filter key '{key}'")]
    UnknownFilterKey { operation: String, key: String },

    /// Two mutually exclusive query keys supplied together
    #[error("{operation}: filters '{first}' and '{second}' cannot be combined")]
    ConflictingFilter {
        operation: String,
        first: String,
        second: String,
    },

    /// Number of query keys outside the declared bounds
    #[error("{operation}: {count} filter(s) supplied, expected between {min} and {max}")]
    FilterCount {
        operation: String,
        count: usize,
        min: usize,
        max: usize,
    },

    /// Numeric filter value did not coerce
    #[error("{operation}: filter '{key}' expects an integer, got '{value}'")]
    TypeCoercion {
        operation: String,
        key: String,
        value: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Backing store error
    #[error("Store error: {0}")]
    Store(String),

    /// SSH public key failed syntax validation
    #[error("Invalid SSH public key for '{0}'")]
    InvalidSshKey(String),

    /// Record already present
    #[error("{kind} '{identifier}' already exists")]
    AlreadyExists {
        kind: EntityKind,
        identifier: String,
    },

    /// No free id left in a configured range
    #[error("No free {what} left in range {start}-{end}")]
    RangeExhausted {
        what: &'static str,
        start: u32,
        end: u32,
    },

    /// Record failed structural validation
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl InventoryError {
    pub(crate) fn malformed(identifier: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the caller supplied bad input (as opposed to a backend failure)
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::Store(_))
    }
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Store(err.to_string())
    }
}

impl From<toml::de::Error> for InventoryError {
    fn from(err: toml::de::Error) -> Self {
        InventoryError::Configuration(err.to_string())
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Identifier parsing and query composition properties, generated with
//! proptest.

mod filter_composition;
mod identifier_grammar;

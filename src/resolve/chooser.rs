// Copyright (c) 2025 - Cowboy AI, Inc.
//! Operator selection strategies
//!
//! Ambiguity is settled by asking a [`Chooser`] for a 1-indexed pick from a
//! numbered menu. The CLI injects [`InteractiveChooser`]; anything running
//! unattended injects [`FailOnAmbiguity`] so an ambiguous name fails instead
//! of blocking on a terminal that is not there.

use console::Term;
use dialoguer::Input;
use tracing::{debug, warn};

use crate::errors::{InventoryError, InventoryResult};

/// Source of operator selections
pub trait Chooser {
    /// Pick one of `options`; returns the 1-indexed selection, or `None` if
    /// no selection was made. Range checking is the caller's job.
    fn choose(&self, prompt: &str, options: &[String]) -> Option<usize>;
}

/// Prompt on the controlling terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveChooser;

impl Chooser for InteractiveChooser {
    fn choose(&self, prompt: &str, options: &[String]) -> Option<usize> {
        let term = Term::stderr();
        let mut menu = format!("{}:", prompt);
        for (i, option) in options.iter().enumerate() {
            menu.push_str(&format!("\n  {}) {}", i + 1, option));
        }
        if let Err(e) = term.write_line(&menu) {
            warn!("Cannot write selection menu: {}", e);
            return None;
        }

        let answer = match Input::<String>::new()
            .with_prompt(format!("Select 1-{}", options.len()))
            .allow_empty(true)
            .interact_text_on(&term)
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Selection prompt failed: {}", e);
                return None;
            }
        };
        answer.trim().parse().ok()
    }
}

/// Never select; every ambiguity aborts
#[derive(Debug, Clone, Copy, Default)]
pub struct FailOnAmbiguity;

impl Chooser for FailOnAmbiguity {
    fn choose(&self, prompt: &str, options: &[String]) -> Option<usize> {
        debug!(prompt, options = options.len(), "Ambiguity in non-interactive context");
        None
    }
}

/// Always answer with the same 1-indexed selection
#[derive(Debug, Clone, Copy)]
pub struct FixedChoice(pub usize);

impl Chooser for FixedChoice {
    fn choose(&self, _prompt: &str, _options: &[String]) -> Option<usize> {
        Some(self.0)
    }
}

/// Present `options` and return the 0-based index of a valid selection
pub(crate) fn select(
    chooser: &dyn Chooser,
    what: &str,
    identifier: &str,
    options: &[String],
) -> InventoryResult<usize> {
    let prompt = format!("'{}' matches more than one {}", identifier, what);
    match chooser.choose(&prompt, options) {
        Some(n) if (1..=options.len()).contains(&n) => {
            debug!(what, identifier, choice = %options[n - 1], "Operator selected");
            Ok(n - 1)
        }
        choice => {
            warn!(what, identifier, ?choice, "Selection aborted");
            Err(InventoryError::SelectionAborted {
                what: what.to_string(),
                identifier: identifier.to_string(),
            })
        }
    }
}

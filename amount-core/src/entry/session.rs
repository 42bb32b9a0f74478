//! The editing session behind an amount field.
//!
//! The commit key is bimodal. On a chain it first *reduces* the buffer to
//! its two-decimal result; pressing it again on the now single term *saves*
//! the amount. The phases of a session are:
//!
//! ```text
//!            commit (chain)          commit (single term)
//! Editing ─────────────────▶ Reduced ────────────────────▶ Saved
//!    │ ▲                        │
//!    │ └──── any edit ──────────┘
//!    └──────────── commit (single term) ──────────────────▶ Saved
//! ```
//!
//! [`transition`] is the pure step function; [`EntrySession`] holds the
//! current buffer and phase for a front end and calls it on every key.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use amount_core::{CommitLabel, EntryPhase, EntrySession, Key};
//!
//! let mut session = EntrySession::new();
//! session.press_all("12.5+7".chars().map(|c| c.to_string().parse::<Key>().unwrap()));
//! assert_eq!(session.commit_label(), CommitLabel::Compute);
//!
//! session.press(Key::Commit);
//! assert_eq!(session.buffer(), "19.50");
//! assert_eq!(session.phase(), EntryPhase::Reduced);
//!
//! session.press(Key::Commit);
//! assert_eq!(session.phase(), EntryPhase::Saved(dec!(19.50)));
//! ```

use std::fmt;

use rust_decimal::Decimal;
use tracing::debug;

use crate::entry::common::{format_two_decimals, has_internal_operator};
use crate::entry::evaluator::evaluate;
use crate::entry::policy::{check_savable, is_savable};
use crate::entry::validator::{apply, is_key_enabled};
use crate::keys::Key;
use crate::models::EntryConfig;

/// Phase of an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    /// The user is typing.
    Editing,
    /// A chain was reduced to a single term; the next commit saves it.
    Reduced,
    /// The amount was accepted. No further keys are taken.
    Saved(Decimal),
}

impl EntryPhase {
    /// Returns `true` once the amount has been saved.
    pub fn is_saved(self) -> bool {
        matches!(self, EntryPhase::Saved(_))
    }
}

impl fmt::Display for EntryPhase {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            EntryPhase::Editing => f.write_str("editing"),
            EntryPhase::Reduced => f.write_str("reduced"),
            EntryPhase::Saved(amount) => write!(f, "saved {}", format_two_decimals(*amount)),
        }
    }
}

/// What a keystroke did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The key was not accepted; buffer and phase are unchanged.
    Rejected,
    /// The buffer changed.
    Edited,
    /// A chain was replaced by its result, carried here as text.
    Reduced(String),
    /// The amount was finalized.
    Saved(Decimal),
}

/// Which action the commit key currently performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitLabel {
    /// The buffer is a chain; committing reduces it.
    Compute,
    /// The buffer is a single term; committing saves it.
    Done,
}

impl CommitLabel {
    /// Returns the label for `buffer`.
    pub fn for_buffer(buffer: &str) -> Self {
        if has_internal_operator(buffer) {
            CommitLabel::Compute
        } else {
            CommitLabel::Done
        }
    }
}

/// Result of [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub phase: EntryPhase,
    pub buffer: String,
    pub outcome: CommitOutcome,
}

impl Transition {
    fn rejected(
        phase: EntryPhase,
        buffer: &str,
    ) -> Self {
        Self {
            phase,
            buffer: buffer.to_string(),
            outcome: CommitOutcome::Rejected,
        }
    }
}

/// Computes the next phase and buffer after `key`.
///
/// Editing keys go through the validator and put the session back into
/// [`EntryPhase::Editing`] when they change the buffer. The commit key is
/// accepted only while the buffer is savable: it reduces a chain, or saves a
/// single term. A saved session rejects everything.
pub fn transition(
    phase: EntryPhase,
    buffer: &str,
    key: Key,
) -> Transition {
    if phase.is_saved() {
        return Transition::rejected(phase, buffer);
    }

    if key != Key::Commit {
        let next = apply(buffer, key);
        if next == buffer {
            return Transition::rejected(phase, buffer);
        }
        return Transition {
            phase: EntryPhase::Editing,
            buffer: next,
            outcome: CommitOutcome::Edited,
        };
    }

    if !is_savable(buffer) {
        return Transition::rejected(phase, buffer);
    }

    if has_internal_operator(buffer) {
        return match evaluate(buffer) {
            Ok(value) => {
                let reduced = format_two_decimals(value);
                Transition {
                    phase: EntryPhase::Reduced,
                    buffer: reduced.clone(),
                    outcome: CommitOutcome::Reduced(reduced),
                }
            }
            Err(_) => Transition::rejected(phase, buffer),
        };
    }

    match check_savable(buffer) {
        Ok(amount) => Transition {
            phase: EntryPhase::Saved(amount),
            buffer: buffer.to_string(),
            outcome: CommitOutcome::Saved(amount),
        },
        Err(_) => Transition::rejected(phase, buffer),
    }
}

/// Buffer and phase of one amount field, from opening the form to saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySession {
    buffer: String,
    phase: EntryPhase,
}

impl Default for EntrySession {
    fn default() -> Self {
        Self::new()
    }
}

impl EntrySession {
    /// Starts a session with an empty buffer, as when adding a new bill.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            phase: EntryPhase::Editing,
        }
    }

    /// Starts a session pre-filled with an existing amount, as when editing
    /// a bill. The amount is shown with two decimals.
    pub fn with_amount(amount: Decimal) -> Self {
        Self {
            buffer: format_two_decimals(amount),
            phase: EntryPhase::Editing,
        }
    }

    /// The text typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn phase(&self) -> EntryPhase {
        self.phase
    }

    /// The saved amount, once the session reached [`EntryPhase::Saved`].
    pub fn saved_amount(&self) -> Option<Decimal> {
        match self.phase {
            EntryPhase::Saved(amount) => Some(amount),
            _ => None,
        }
    }

    pub fn commit_label(&self) -> CommitLabel {
        CommitLabel::for_buffer(&self.buffer)
    }

    /// Whether the commit key is enabled.
    pub fn can_commit(&self) -> bool {
        !self.phase.is_saved() && is_savable(&self.buffer)
    }

    /// Whether pressing `key` would currently be accepted.
    pub fn is_key_enabled(
        &self,
        key: Key,
    ) -> bool {
        !self.phase.is_saved() && is_key_enabled(&self.buffer, key)
    }

    /// Applies one keystroke.
    pub fn press(
        &mut self,
        key: Key,
    ) -> CommitOutcome {
        let Transition {
            phase,
            buffer,
            outcome,
        } = transition(self.phase, &self.buffer, key);

        if let CommitOutcome::Saved(amount) = &outcome {
            debug!(%amount, "amount saved");
        }
        self.phase = phase;
        self.buffer = buffer;
        outcome
    }

    /// Applies keystrokes in order and returns the outcome of the last one.
    pub fn press_all<I>(
        &mut self,
        keys: I,
    ) -> CommitOutcome
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter()
            .fold(CommitOutcome::Rejected, |_, key| self.press(key))
    }

    /// Text for the amount display: currency symbol followed by the buffer,
    /// or by the placeholder while the buffer is empty.
    pub fn display(
        &self,
        config: &EntryConfig,
    ) -> String {
        let shown = if self.buffer.is_empty() {
            config.placeholder.as_str()
        } else {
            self.buffer.as_str()
        };
        format!("{}{}", config.currency_symbol, shown)
    }

    /// Clears the buffer for another entry.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn press_script(
        session: &mut EntrySession,
        script: &str,
    ) -> CommitOutcome {
        session.press_all(script.split_whitespace().map(|label| label.parse::<Key>().unwrap()))
    }

    // =========================================================================
    // transition tests
    // =========================================================================

    #[test]
    fn commit_on_single_term_saves() {
        let step = transition(EntryPhase::Editing, "12.5", Key::Commit);

        assert_eq!(step.phase, EntryPhase::Saved(dec!(12.5)));
        assert_eq!(step.buffer, "12.5");
        assert_eq!(step.outcome, CommitOutcome::Saved(dec!(12.5)));
    }

    #[test]
    fn commit_on_chain_reduces() {
        let step = transition(EntryPhase::Editing, "12.50+7-3.20", Key::Commit);

        assert_eq!(step.phase, EntryPhase::Reduced);
        assert_eq!(step.buffer, "16.30");
        assert_eq!(step.outcome, CommitOutcome::Reduced("16.30".to_string()));
    }

    #[test]
    fn commit_rejected_while_not_savable() {
        for buffer in ["", "-", "0.00", "-5+3", "12+", "12."] {
            let step = transition(EntryPhase::Editing, buffer, Key::Commit);

            assert_eq!(step, Transition::rejected(EntryPhase::Editing, buffer));
        }
    }

    #[test]
    fn edit_after_reduce_returns_to_editing() {
        let step = transition(EntryPhase::Reduced, "16.30", Key::Plus);

        assert_eq!(step.phase, EntryPhase::Editing);
        assert_eq!(step.buffer, "16.30+");
        assert_eq!(step.outcome, CommitOutcome::Edited);
    }

    #[test]
    fn rejected_edit_keeps_phase() {
        let step = transition(EntryPhase::Reduced, "16.30", Key::Digit(1));

        assert_eq!(step, Transition::rejected(EntryPhase::Reduced, "16.30"));
    }

    #[test]
    fn saved_phase_rejects_every_key() {
        let saved = EntryPhase::Saved(dec!(5));
        for key in [Key::Digit(1), Key::Delete, Key::Commit, Key::Minus] {
            assert_eq!(transition(saved, "5", key), Transition::rejected(saved, "5"));
        }
    }

    // =========================================================================
    // EntrySession tests
    // =========================================================================

    #[test]
    fn chain_takes_two_commits_to_save() {
        let mut session = EntrySession::new();
        press_script(&mut session, "1 2 . 5 0 + 7 - 3 . 2 0");
        assert_eq!(session.commit_label(), CommitLabel::Compute);

        let first = session.press(Key::Commit);
        assert_eq!(first, CommitOutcome::Reduced("16.30".to_string()));
        assert_eq!(session.commit_label(), CommitLabel::Done);
        assert_eq!(session.saved_amount(), None);

        let second = session.press(Key::Commit);
        assert_eq!(second, CommitOutcome::Saved(dec!(16.30)));
        assert_eq!(session.saved_amount(), Some(dec!(16.30)));
        assert!(!session.can_commit());
    }

    #[test]
    fn negative_chain_cannot_be_committed() {
        let mut session = EntrySession::new();
        press_script(&mut session, "- 5 + 3");

        assert!(!session.can_commit());
        assert_eq!(session.press(Key::Commit), CommitOutcome::Rejected);
        assert_eq!(session.buffer(), "-5+3");
        assert_eq!(session.phase(), EntryPhase::Editing);
    }

    #[test]
    fn editing_existing_amount_prefills_two_decimals() {
        let mut session = EntrySession::with_amount(dec!(99.9));
        assert_eq!(session.buffer(), "99.90");

        // The fraction is already full, so digits are refused.
        assert!(!session.is_key_enabled(Key::Digit(1)));
        assert_eq!(session.press(Key::Digit(1)), CommitOutcome::Rejected);

        press_script(&mut session, "⌫ ⌫ 5 0");
        assert_eq!(session.press(Key::Commit), CommitOutcome::Saved(dec!(99.50)));
    }

    #[test]
    fn display_uses_placeholder_for_empty_buffer() {
        let config = EntryConfig::default();
        let mut session = EntrySession::new();

        assert_eq!(session.display(&config), "¥0.00");
        session.press(Key::Digit(8));
        assert_eq!(session.display(&config), "¥8");
        assert_eq!(session.buffer(), "8");
    }

    #[test]
    fn display_respects_configured_symbol() {
        let config = EntryConfig {
            currency_symbol: "$".to_string(),
            ..EntryConfig::default()
        };
        let session = EntrySession::with_amount(dec!(3));

        assert_eq!(session.display(&config), "$3.00");
    }

    #[test]
    fn reset_starts_a_new_entry() {
        let mut session = EntrySession::new();
        press_script(&mut session, "4 2 =");
        assert!(session.phase().is_saved());

        session.reset();

        assert_eq!(session, EntrySession::new());
        assert_eq!(session.press(Key::Digit(1)), CommitOutcome::Edited);
    }

    #[test]
    fn phase_display_names() {
        assert_eq!(EntryPhase::Editing.to_string(), "editing");
        assert_eq!(EntryPhase::Reduced.to_string(), "reduced");
        assert_eq!(EntryPhase::Saved(dec!(7.5)).to_string(), "saved 7.50");
    }

    #[test]
    fn saved_session_disables_all_keys() {
        let mut session = EntrySession::new();
        press_script(&mut session, "4 2 =");

        assert!(!session.is_key_enabled(Key::Digit(1)));
        assert!(!session.is_key_enabled(Key::Delete));
        assert_eq!(session.press(Key::Delete), CommitOutcome::Rejected);
        assert_eq!(session.buffer(), "42");
    }
}

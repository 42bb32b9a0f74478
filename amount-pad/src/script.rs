use std::fmt;

use amount_core::{CommitOutcome, EntryConfig, EntryPhase, EntrySession, Key, KeyParseError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when reading a key script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown key '{key}' in token {token}")]
    UnknownKey { token: usize, key: String },
}

/// One keystroke of a replay and the state it left the form in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStep {
    pub key: Key,
    pub outcome: CommitOutcome,
    pub display: String,
    pub commit_label: String,
    pub can_commit: bool,
    pub phase: EntryPhase,
}

impl fmt::Display for ReplayStep {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let marker = match &self.outcome {
            CommitOutcome::Rejected => " (rejected)",
            _ => "",
        };
        let enabled = if self.can_commit { "" } else { ", disabled" };
        write!(
            f,
            "{:>2}  {:<16} [{}{}] {}{}",
            self.key.label(),
            self.display,
            self.commit_label,
            enabled,
            self.phase,
            marker,
        )
    }
}

/// Reads and replays keypad scripts.
///
/// A script is a whitespace-separated list of tokens. A token that names a
/// key (`"00"`, `"del"`, `"ok"`, ...) is that key; any other token is read
/// one character at a time, each character naming a key. `"12.5+7 = ="`
/// therefore types `1`, `2`, `.`, `5`, `+`, `7` and commits twice.
pub struct KeyScript;

impl KeyScript {
    /// Parses a script into keys.
    pub fn parse(script: &str) -> Result<Vec<Key>, ScriptError> {
        let mut keys = Vec::new();

        for (token_index, token) in script.split_whitespace().enumerate() {
            if let Ok(key) = token.parse::<Key>() {
                keys.push(key);
                continue;
            }
            for c in token.chars() {
                let key = c
                    .to_string()
                    .parse::<Key>()
                    .map_err(|KeyParseError(key)| ScriptError::UnknownKey {
                        token: token_index,
                        key,
                    })?;
                keys.push(key);
            }
        }

        Ok(keys)
    }

    /// Presses `keys` on `session` and records the form state after each one.
    pub fn replay(
        session: &mut EntrySession,
        keys: &[Key],
        config: &EntryConfig,
    ) -> Vec<ReplayStep> {
        keys.iter()
            .map(|&key| {
                let outcome = session.press(key);
                let step = ReplayStep {
                    key,
                    outcome,
                    display: session.display(config),
                    commit_label: config.label_for(session.commit_label()).to_string(),
                    can_commit: session.can_commit(),
                    phase: session.phase(),
                };
                debug!(%step, "replayed key");
                step
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_parse_compact_script() {
        let keys = KeyScript::parse("12.5+7").expect("Failed to parse script");

        assert_eq!(
            keys,
            vec![
                Key::Digit(1),
                Key::Digit(2),
                Key::Point,
                Key::Digit(5),
                Key::Plus,
                Key::Digit(7),
            ]
        );
    }

    #[test]
    fn test_parse_named_tokens() {
        let keys = KeyScript::parse("5 00 del ⌫ ok =").expect("Failed to parse script");

        assert_eq!(
            keys,
            vec![
                Key::Digit(5),
                Key::DoubleZero,
                Key::Delete,
                Key::Delete,
                Key::Commit,
                Key::Commit,
            ]
        );
    }

    #[test]
    fn test_parse_digit_runs_split_into_single_digits() {
        let keys = KeyScript::parse("100").expect("Failed to parse script");

        assert_eq!(keys, vec![Key::Digit(1), Key::Digit(0), Key::Digit(0)]);
    }

    #[test]
    fn test_parse_unknown_key() {
        let result = KeyScript::parse("12 3*4");

        assert_eq!(
            result,
            Err(ScriptError::UnknownKey {
                token: 1,
                key: "*".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_empty_script() {
        assert_eq!(KeyScript::parse("   "), Ok(vec![]));
    }

    #[test]
    fn test_replay_records_each_step() {
        let config = EntryConfig::default();
        let mut session = EntrySession::new();
        let keys = KeyScript::parse("5+3 = =").expect("Failed to parse script");

        let steps = KeyScript::replay(&mut session, &keys, &config);

        assert_eq!(steps.len(), 5);
        assert_eq!(steps[2].display, "¥5+3");
        assert_eq!(steps[2].commit_label, "Compute");
        assert_eq!(steps[3].outcome, CommitOutcome::Reduced("8.00".to_string()));
        assert_eq!(steps[3].commit_label, "Done");
        assert_eq!(steps[4].outcome, CommitOutcome::Saved(dec!(8)));
        assert_eq!(steps[4].phase, EntryPhase::Saved(dec!(8)));
        assert!(!steps[4].can_commit);
    }

    #[test]
    fn test_step_display_marks_rejections() {
        let config = EntryConfig::default();
        let mut session = EntrySession::new();

        let steps = KeyScript::replay(&mut session, &[Key::Plus], &config);

        assert_eq!(
            steps[0].to_string(),
            " +  ¥0.00            [Done, disabled] editing (rejected)"
        );
    }
}

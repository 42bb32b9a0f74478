use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::session::CommitLabel;

/// Errors returned by [`EntryConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryConfigError {
    #[error("placeholder must not be empty")]
    EmptyPlaceholder,

    #[error("{0} label must not be empty")]
    EmptyLabel(&'static str),
}

/// How an amount field presents itself.
///
/// Every field has a default, so a configuration file only needs to name the
/// values it changes:
///
/// ```
/// use amount_core::EntryConfig;
///
/// let config: EntryConfig = toml::from_str(r#"currency_symbol = "$""#).unwrap();
///
/// assert_eq!(config.currency_symbol, "$");
/// assert_eq!(config.placeholder, "0.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Printed before the amount. May be empty.
    pub currency_symbol: String,

    /// Shown instead of an empty buffer. Never written into the buffer.
    pub placeholder: String,

    /// Commit key text while the buffer is a chain.
    pub compute_label: String,

    /// Commit key text while the buffer is a single amount.
    pub done_label: String,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "¥".to_string(),
            placeholder: "0.00".to_string(),
            compute_label: "Compute".to_string(),
            done_label: "Done".to_string(),
        }
    }
}

impl EntryConfig {
    /// Checks that every text the form needs to show is present.
    ///
    /// # Errors
    ///
    /// Returns [`EntryConfigError`] for an empty placeholder or commit label.
    pub fn validate(&self) -> Result<(), EntryConfigError> {
        if self.placeholder.trim().is_empty() {
            return Err(EntryConfigError::EmptyPlaceholder);
        }
        if self.compute_label.trim().is_empty() {
            return Err(EntryConfigError::EmptyLabel("compute"));
        }
        if self.done_label.trim().is_empty() {
            return Err(EntryConfigError::EmptyLabel("done"));
        }
        Ok(())
    }

    /// Text for the commit key.
    pub fn label_for(
        &self,
        label: CommitLabel,
    ) -> &str {
        match label {
            CommitLabel::Compute => &self.compute_label,
            CommitLabel::Done => &self.done_label,
        }
    }
}

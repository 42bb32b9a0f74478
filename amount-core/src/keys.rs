//! Keys of the amount-entry keypad.
//!
//! The keypad is a numeric pad augmented with `+`, `-`, a decimal point, a
//! double-zero key, a delete key and a commit key. Every keystroke the entry
//! form receives is one of the [`Key`] variants below.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Label shown on the delete key.
pub const DELETE_LABEL: &str = "⌫";

/// Label shown on the commit key.
pub const COMMIT_LABEL: &str = "=";

/// A single keypad key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A decimal digit, always in `0..=9`.
    Digit(u8),
    /// The `"00"` key.
    DoubleZero,
    /// The decimal point.
    Point,
    Plus,
    Minus,
    /// Removes the last character of the buffer.
    Delete,
    /// Reduces a chain, or finalizes a single amount.
    Commit,
}

/// The keypad as laid out on the bill-entry form, row by row.
pub const KEYPAD_LAYOUT: [[Key; 4]; 4] = [
    [Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::Plus],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::Minus],
    [Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::Delete],
    [Key::Point, Key::Digit(0), Key::DoubleZero, Key::Commit],
];

/// Error returned when a label does not name a keypad key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key '{0}'")]
pub struct KeyParseError(pub String);

impl Key {
    /// Creates a digit key, or `None` if `value` is not a single decimal digit.
    ///
    /// # Example
    ///
    /// ```
    /// use amount_core::Key;
    ///
    /// assert_eq!(Key::digit(7), Some(Key::Digit(7)));
    /// assert_eq!(Key::digit(10), None);
    /// ```
    pub fn digit(value: u8) -> Option<Self> {
        (value <= 9).then_some(Key::Digit(value))
    }

    /// Returns `true` for the binary operator keys `+` and `-`.
    pub fn is_operator(self) -> bool {
        matches!(self, Key::Plus | Key::Minus)
    }

    /// The text this key would append to a buffer, if it appends anything.
    ///
    /// Delete and commit edit the buffer in other ways and return `None`.
    pub(crate) fn text(self) -> Option<&'static str> {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            Key::Digit(d) => DIGITS.get(usize::from(d)).copied(),
            Key::DoubleZero => Some("00"),
            Key::Point => Some("."),
            Key::Plus => Some("+"),
            Key::Minus => Some("-"),
            Key::Delete | Key::Commit => None,
        }
    }

    /// The label printed on the key.
    pub fn label(self) -> &'static str {
        match self {
            Key::Delete => DELETE_LABEL,
            Key::Commit => COMMIT_LABEL,
            other => other.text().unwrap_or("?"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Parses a key label.
    ///
    /// Besides the printed labels, `del`, `back` and `<` name the delete key
    /// and `ok`, `done` and `enter` name the commit key (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s {
            "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" => {
                let value = s.as_bytes()[0] - b'0';
                Key::Digit(value)
            }
            "00" => Key::DoubleZero,
            "." => Key::Point,
            "+" => Key::Plus,
            "-" => Key::Minus,
            DELETE_LABEL | "<" => Key::Delete,
            COMMIT_LABEL => Key::Commit,
            other => match other.to_ascii_lowercase().as_str() {
                "del" | "back" => Key::Delete,
                "ok" | "done" | "enter" => Key::Commit,
                _ => return Err(KeyParseError(s.to_string())),
            },
        };
        Ok(key)
    }
}

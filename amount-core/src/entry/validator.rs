//! Keystroke validation for the amount buffer.
//!
//! [`apply`] is a pure function of `(buffer, key)`: it returns the new buffer
//! if the keystroke is accepted and an unchanged copy if it is rejected. A
//! rejected keystroke is not an error; the caller cannot tell it from a
//! no-op and does not need to.
//!
//! Starting from an empty buffer, every sequence of keys keeps the buffer a
//! signed-term chain in which each term has at most one decimal point and at
//! most [`MAX_FRACTION_DIGITS`] digits after it.

use tracing::{debug, trace};

use crate::entry::common::{
    MAX_FRACTION_DIGITS, current_term, format_two_decimals, fraction_digits,
    has_internal_operator, is_operator,
};
use crate::entry::evaluator::evaluate;
use crate::entry::policy::is_savable;
use crate::keys::Key;

/// Applies a keystroke to `buffer` and returns the resulting buffer.
///
/// # Example
///
/// ```
/// use amount_core::Key;
/// use amount_core::entry::validator::apply;
///
/// assert_eq!(apply("", Key::Minus), "-");
/// assert_eq!(apply("", Key::Plus), "");
/// assert_eq!(apply("12.5", Key::Point), "12.5");
/// assert_eq!(apply("12+", Key::Point), "12+0.");
/// assert_eq!(apply("5+3", Key::Commit), "8.00");
/// ```
pub fn apply(
    buffer: &str,
    key: Key,
) -> String {
    let accepted = match key {
        Key::Digit(_) => can_add_digit(buffer).then(|| append(buffer, key.text())),
        Key::Point => can_add_point(buffer).then(|| {
            let text = if current_term(buffer).is_empty() { "0." } else { "." };
            append(buffer, Some(text))
        }),
        Key::Plus | Key::Minus => {
            can_add_operator(buffer, key).then(|| append(buffer, key.text()))
        }
        Key::DoubleZero => can_add_double_zero(buffer).then(|| {
            // An empty buffer only ever receives a single zero.
            let text = if buffer.is_empty() { "0" } else { "00" };
            append(buffer, Some(text))
        }),
        Key::Delete => Some(delete_last(buffer)),
        Key::Commit => reduce(buffer),
    };

    accepted.unwrap_or_else(|| {
        trace!(%buffer, %key, "keystroke rejected");
        buffer.to_string()
    })
}

/// Applies `keys` in order, starting from `buffer`.
pub fn apply_all<I>(
    buffer: &str,
    keys: I,
) -> String
where
    I: IntoIterator<Item = Key>,
{
    keys.into_iter()
        .fold(buffer.to_string(), |current, key| apply(&current, key))
}

/// Returns `true` if pressing `key` on `buffer` would do something.
///
/// The commit key is enabled only for savable buffers and delete only for
/// non-empty ones; every other key is enabled when [`apply`] would accept it.
pub fn is_key_enabled(
    buffer: &str,
    key: Key,
) -> bool {
    match key {
        Key::Commit => is_savable(buffer),
        Key::Delete => !buffer.is_empty(),
        _ => apply(buffer, key) != buffer,
    }
}

fn append(
    buffer: &str,
    text: Option<&str>,
) -> String {
    let mut next = buffer.to_string();
    next.push_str(text.unwrap_or_default());
    next
}

fn delete_last(buffer: &str) -> String {
    let mut next = buffer.to_string();
    next.pop();
    next
}

fn can_add_digit(buffer: &str) -> bool {
    fraction_digits(current_term(buffer)).is_none_or(|digits| digits < MAX_FRACTION_DIGITS)
}

fn can_add_point(buffer: &str) -> bool {
    !current_term(buffer).contains('.')
}

fn can_add_operator(
    buffer: &str,
    key: Key,
) -> bool {
    match buffer.chars().last() {
        None => key == Key::Minus,
        Some(last) => !is_operator(last) && last != '.',
    }
}

fn can_add_double_zero(buffer: &str) -> bool {
    if buffer.is_empty() {
        return true;
    }
    let term = current_term(buffer);
    !term.contains('.') && term != "0"
}

/// Replaces a chain with its two-decimal result. Single terms and chains
/// that fail to evaluate are left for the caller.
fn reduce(buffer: &str) -> Option<String> {
    if !has_internal_operator(buffer) {
        return None;
    }
    match evaluate(buffer) {
        Ok(value) => {
            let reduced = format_two_decimals(value);
            debug!(%buffer, %reduced, "reduced chain");
            Some(reduced)
        }
        Err(error) => {
            debug!(%buffer, %error, "chain not reducible");
            None
        }
    }
}

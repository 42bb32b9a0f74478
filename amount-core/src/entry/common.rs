//! Buffer helpers shared by the validator, the evaluator and the policy.
//!
//! A buffer is the text typed so far on the keypad. The helpers here only
//! look at its characters; none of them allocate except
//! [`format_two_decimals`].

use rust_decimal::{Decimal, RoundingStrategy};

/// Maximum number of digits allowed after the decimal point of a term.
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Returns `true` for the two operator characters.
pub fn is_operator(c: char) -> bool {
    c == '+' || c == '-'
}

/// Returns `true` if the buffer is a chain, i.e. contains a `+` or `-`
/// after its first character.
///
/// A leading `-` is the sign of the first term and does not count.
///
/// # Examples
///
/// ```
/// use amount_core::entry::common::has_internal_operator;
///
/// assert!(has_internal_operator("5+3"));
/// assert!(has_internal_operator("-5-3"));
/// assert!(!has_internal_operator("-5.00"));
/// assert!(!has_internal_operator("-"));
/// ```
pub fn has_internal_operator(buffer: &str) -> bool {
    buffer.chars().skip(1).any(is_operator)
}

/// Returns the term currently being typed: everything after the last
/// operator character, or the whole buffer when there is none.
///
/// The result is empty when the buffer is empty or ends with an operator.
pub fn current_term(buffer: &str) -> &str {
    match buffer.rfind(is_operator) {
        Some(index) => &buffer[index + 1..],
        None => buffer,
    }
}

/// Number of digits after the decimal point of `term`, or `None` if the term
/// has no decimal point.
pub fn fraction_digits(term: &str) -> Option<usize> {
    term.split_once('.').map(|(_, fraction)| fraction.len())
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use amount_core::entry::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds `value` to two decimal places and gives it a scale of exactly two,
/// or `None` when the mantissa has no room for the extra digits.
///
/// Zero comes back unsigned.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use amount_core::entry::common::checked_two_decimals;
///
/// assert_eq!(checked_two_decimals(dec!(16.3)).unwrap().to_string(), "16.30");
/// assert_eq!(checked_two_decimals(Decimal::MAX), None);
/// ```
pub fn checked_two_decimals(value: Decimal) -> Option<Decimal> {
    let mut rounded = round_half_up(value);
    if rounded.is_zero() {
        // Avoid "-0.00"
        rounded = Decimal::ZERO;
    }
    rounded.rescale(2);
    (rounded.scale() == 2).then_some(rounded)
}

/// Formats an amount with exactly two decimal places, e.g. `16.3` as `"16.30"`.
///
/// This is the text a reduced chain is replaced with, and the text an entry
/// session starts from when editing an existing amount.
///
/// Every value [`evaluate`](crate::entry::evaluator::evaluate) accepts gets two
/// decimals. Values past about 10^26 in magnitude have no room for them and
/// print with fewer.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use amount_core::entry::common::format_two_decimals;
///
/// assert_eq!(format_two_decimals(dec!(16.3)), "16.30");
/// assert_eq!(format_two_decimals(dec!(-2)), "-2.00");
/// assert_eq!(format_two_decimals(dec!(0.005)), "0.01");
/// ```
pub fn format_two_decimals(value: Decimal) -> String {
    match checked_two_decimals(value) {
        Some(rounded) => rounded.to_string(),
        None => round_half_up(value).to_string(),
    }
}

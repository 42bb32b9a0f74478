//! Whether a finished buffer may be saved, and the amount it stands for.
//!
//! The save control is enabled only while [`is_savable`] holds. It is
//! checked on every buffer change and once more, through [`check_savable`],
//! right before the amount is handed to the save flow.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::entry::common::has_internal_operator;
use crate::entry::evaluator::{EvalError, evaluate};

/// Reasons a buffer cannot be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The buffer is not a well-formed amount or chain.
    #[error(transparent)]
    Malformed(#[from] EvalError),

    /// The buffer evaluates, but not to a strictly positive amount.
    #[error("amount must be greater than zero, got {0}")]
    NonPositive(Decimal),
}

/// Returns the amount a buffer stands for.
///
/// A chain is evaluated; a single term is parsed as a literal.
///
/// # Errors
///
/// Returns [`EvalError`] if the buffer is empty, is a bare sign, or is not a
/// well-formed chain.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use amount_core::entry::policy::finalize;
///
/// assert_eq!(finalize("12.50+7-3.20"), Ok(dec!(16.30)));
/// assert_eq!(finalize("-5+3"), Ok(dec!(-2)));
/// assert!(finalize("12.").is_err());
/// ```
pub fn finalize(buffer: &str) -> Result<Decimal, EvalError> {
    // A literal is a chain of one term; the evaluator handles both.
    evaluate(buffer)
}

/// Returns the amount to save, or why the buffer cannot be saved.
///
/// # Errors
///
/// Returns [`AmountError::Malformed`] when [`finalize`] fails and
/// [`AmountError::NonPositive`] when the amount is zero or negative.
pub fn check_savable(buffer: &str) -> Result<Decimal, AmountError> {
    let amount = finalize(buffer)?;
    if amount <= Decimal::ZERO {
        return Err(AmountError::NonPositive(amount));
    }
    Ok(amount)
}

/// Returns `true` if the buffer denotes a strictly positive amount.
///
/// # Example
///
/// ```
/// use amount_core::entry::policy::is_savable;
///
/// assert!(is_savable("0.01"));
/// assert!(is_savable("5+3"));
/// assert!(!is_savable("0.00"));
/// assert!(!is_savable("-5+3"));
/// assert!(!is_savable("-"));
/// ```
pub fn is_savable(buffer: &str) -> bool {
    if buffer.is_empty() || buffer == "-" {
        return false;
    }
    let result = check_savable(buffer);
    if let Err(error) = &result {
        debug!(%buffer, chain = has_internal_operator(buffer), %error, "not savable");
    }
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::entry::common::format_two_decimals;
    use crate::entry::evaluator::MalformedReason;

    // =========================================================================
    // is_savable tests
    // =========================================================================

    #[test]
    fn empty_buffer_and_bare_sign_are_not_savable() {
        assert!(!is_savable(""));
        assert!(!is_savable("-"));
    }

    #[test]
    fn zero_is_not_savable() {
        assert!(!is_savable("0"));
        assert!(!is_savable("0.00"));
        assert!(!is_savable("00"));
    }

    #[test]
    fn smallest_positive_amount_is_savable() {
        assert!(is_savable("0.01"));
    }

    #[test]
    fn negative_literals_are_not_savable() {
        assert!(!is_savable("-5"));
        assert!(!is_savable("-0.01"));
    }

    #[test]
    fn chains_are_savable_when_positive() {
        assert!(is_savable("5+3"));
        assert!(is_savable("-5+6"));
        assert!(!is_savable("-5+3"));
        assert!(!is_savable("5-5"));
    }

    #[test]
    fn unfinished_input_is_not_savable() {
        assert!(!is_savable("12+"));
        assert!(!is_savable("12."));
        assert!(!is_savable("1+2."));
    }

    // =========================================================================
    // finalize / check_savable tests
    // =========================================================================

    #[test]
    fn finalize_evaluates_chains() {
        assert_eq!(finalize("12.50+7-3.20"), Ok(dec!(16.30)));
        assert_eq!(finalize("-5+3"), Ok(dec!(-2)));
    }

    #[test]
    fn finalize_parses_literals() {
        assert_eq!(finalize("42"), Ok(dec!(42)));
        assert_eq!(finalize("-5.00"), Ok(dec!(-5)));
    }

    #[test]
    fn finalize_reports_malformed_input() {
        for input in ["12++3", "+12", "12.", "", "-"] {
            let error = finalize(input).unwrap_err();
            assert!(error.is_malformed(), "{input:?} gave {error:?}");
        }
    }

    #[test]
    fn finalize_rejects_terms_it_would_have_to_round() {
        let input = "1.999999999999999999999999999999";

        assert_eq!(finalize(input), Err(EvalError::Overflow(input.to_string())));
        assert!(!is_savable(input));
    }

    #[test]
    fn finalize_round_trips_two_decimal_formatting() {
        for value in [dec!(0.01), dec!(0.1), dec!(1), dec!(12.5), dec!(16.30), dec!(99999.99)] {
            assert_eq!(finalize(&format_two_decimals(value)), Ok(value));
        }
    }

    #[test]
    fn check_savable_separates_non_positive_from_malformed() {
        assert_eq!(check_savable("7.25"), Ok(dec!(7.25)));
        assert_eq!(
            check_savable("-5+3"),
            Err(AmountError::NonPositive(dec!(-2)))
        );
        assert_eq!(
            check_savable("12+"),
            Err(AmountError::Malformed(EvalError::MalformedExpression {
                input: "12+".to_string(),
                reason: MalformedReason::EmptyTerm { index: 1 },
            }))
        );
    }
}

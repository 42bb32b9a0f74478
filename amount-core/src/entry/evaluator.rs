//! Left-to-right evaluation of signed-term chains.
//!
//! A chain is a sequence of decimal terms joined by `+` and `-`, for example
//! `"12.5+7-3.2"`. Only addition and subtraction exist, so there is no
//! precedence: the chain is reduced strictly from left to right.
//!
//! # Grammar
//!
//! | Piece      | Form                          |
//! |------------|-------------------------------|
//! | chain      | `term (op term)*`             |
//! | op         | `+` or `-`                    |
//! | first term | `-? digits ('.' digits)?`     |
//! | term       | `digits ('.' digits)?`        |
//!
//! The evaluator does not trust its input. The keypad validator never
//! produces a malformed chain, but strings built elsewhere (pre-filled
//! amounts, tests, other front ends) go through the same checks and yield an
//! [`EvalError`] instead of a panic.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use amount_core::entry::evaluator::evaluate;
//!
//! assert_eq!(evaluate("12.50+7-3.20"), Ok(dec!(16.30)));
//! assert_eq!(evaluate("-5+3"), Ok(dec!(-2)));
//! assert!(evaluate("12++3").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::entry::common::{checked_two_decimals, fraction_digits, is_operator};

/// Why an expression is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    /// A term between two operators (or at either end) is empty.
    #[error("term {index} is empty")]
    EmptyTerm { index: usize },

    /// A term is not a decimal literal.
    #[error("term {index} ('{term}') is not a decimal literal")]
    InvalidTerm { index: usize, term: String },

    /// The number of terms is not one more than the number of operators.
    ///
    /// The tokenizer closes a term at every operator and once at the end, so
    /// this only fires if that invariant is broken.
    #[error("{terms} terms for {operators} operators")]
    CountMismatch { terms: usize, operators: usize },
}

/// Errors that can occur while evaluating a chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The text is not a well-formed signed-term chain.
    #[error("malformed expression '{input}': {reason}")]
    MalformedExpression {
        input: String,
        reason: MalformedReason,
    },

    /// A term, the running total or its two-decimal form does not fit in a
    /// [`Decimal`], or a term has more fraction digits than a [`Decimal`]
    /// holds.
    #[error("expression '{0}' is out of range")]
    Overflow(String),
}

impl EvalError {
    fn malformed(
        input: &str,
        reason: MalformedReason,
    ) -> Self {
        EvalError::MalformedExpression {
            input: input.to_string(),
            reason,
        }
    }

    /// Returns `true` if the input was not a well-formed chain.
    pub fn is_malformed(&self) -> bool {
        matches!(self, EvalError::MalformedExpression { .. })
    }
}

/// A binary operator between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            _ => None,
        }
    }

    fn apply(
        self,
        lhs: Decimal,
        rhs: Decimal,
    ) -> Option<Decimal> {
        match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Operator::Add => f.write_str("+"),
            Operator::Subtract => f.write_str("-"),
        }
    }
}

/// A tokenized chain: `terms.len() == operators.len() + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    terms: Vec<Decimal>,
    operators: Vec<Operator>,
}

impl Expression {
    /// Tokenizes `input` into terms and operators.
    ///
    /// A `-` in first position is the sign of the first term; every other
    /// `+` or `-` separates two terms.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::MalformedExpression`] if any term is empty or not
    /// a decimal literal, and [`EvalError::Overflow`] if a term does not fit
    /// in a [`Decimal`].
    pub fn parse(input: &str) -> Result<Self, EvalError> {
        let mut terms = Vec::new();
        let mut operators = Vec::new();
        let mut start = 0;

        for (i, c) in input.char_indices() {
            if i == 0 && c == '-' {
                continue;
            }
            if let Some(op) = Operator::from_char(c) {
                terms.push(parse_term(input, &input[start..i], terms.len())?);
                operators.push(op);
                start = i + c.len_utf8();
            }
        }
        terms.push(parse_term(input, &input[start..], terms.len())?);

        if terms.len() != operators.len() + 1 {
            return Err(EvalError::malformed(
                input,
                MalformedReason::CountMismatch {
                    terms: terms.len(),
                    operators: operators.len(),
                },
            ));
        }

        Ok(Self { terms, operators })
    }

    /// The terms in input order, the first one carrying its sign.
    pub fn terms(&self) -> &[Decimal] {
        &self.terms
    }

    /// The operators in input order.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Returns `true` if the expression has more than one term.
    pub fn is_chain(&self) -> bool {
        !self.operators.is_empty()
    }

    /// Reduces the chain from left to right, or `None` on overflow.
    pub fn value(&self) -> Option<Decimal> {
        let (first, rest) = self.terms.split_first()?;
        self.operators
            .iter()
            .zip(rest)
            .try_fold(*first, |total, (op, term)| op.apply(total, *term))
    }
}

impl FromStr for Expression {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expression::parse(s)
    }
}

/// Returns `true` if `term` is `-? digits ('.' digits)?`.
fn is_decimal_literal(term: &str) -> bool {
    let unsigned = term.strip_prefix('-').unwrap_or(term);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    all_digits(whole) && fraction.is_none_or(all_digits)
}

fn parse_term(
    input: &str,
    term: &str,
    index: usize,
) -> Result<Decimal, EvalError> {
    if term.is_empty() || term == "-" {
        return Err(EvalError::malformed(
            input,
            MalformedReason::EmptyTerm { index },
        ));
    }
    if !is_decimal_literal(term) || (index > 0 && term.starts_with('-')) {
        return Err(EvalError::malformed(
            input,
            MalformedReason::InvalidTerm {
                index,
                term: term.to_string(),
            },
        ));
    }
    let value = Decimal::from_str(term).map_err(|_| EvalError::Overflow(input.to_string()))?;
    // `from_str` rounds fractions past the 28-digit scale limit.
    if value.scale() as usize != fraction_digits(term).unwrap_or(0) {
        return Err(EvalError::Overflow(input.to_string()));
    }
    Ok(value)
}

/// Evaluates a chain to a single decimal value.
///
/// A single literal is a chain of one term, so `evaluate("12.5")` is `12.5`.
///
/// # Errors
///
/// Returns [`EvalError::MalformedExpression`] for trailing or doubled
/// operators, empty terms and terms that are not decimal literals, and
/// [`EvalError::Overflow`] when a term or the running total leaves the
/// [`Decimal`] range, when a term is too precise for a [`Decimal`], or when
/// the result has no room for two decimal places.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use amount_core::entry::evaluator::{evaluate, EvalError};
///
/// assert_eq!(evaluate("1+2+3"), Ok(dec!(6)));
/// assert!(matches!(evaluate("12."), Err(EvalError::MalformedExpression { .. })));
/// ```
pub fn evaluate(input: &str) -> Result<Decimal, EvalError> {
    let expression = Expression::parse(input).inspect_err(|error| {
        if !input.chars().all(|c| c.is_ascii_digit() || c == '.' || is_operator(c)) {
            warn!(%input, %error, "evaluating text outside the keypad alphabet");
        }
    })?;
    expression
        .value()
        .filter(|value| checked_two_decimals(*value).is_some())
        .ok_or_else(|| EvalError::Overflow(input.to_string()))
}

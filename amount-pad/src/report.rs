use amount_core::{AmountError, EvalError, check_savable, finalize, format_two_decimals};

/// Describes the value of an expression and whether it may be saved,
/// e.g. `"16.30 (savable)"`.
///
/// # Errors
///
/// Returns [`EvalError`] when the expression cannot be evaluated.
pub fn describe_expression(expression: &str) -> Result<String, EvalError> {
    let value = finalize(expression)?;
    let verdict = match check_savable(expression) {
        Ok(_) => "savable".to_string(),
        Err(AmountError::NonPositive(_)) => "not savable: amount must be greater than zero".to_string(),
        Err(AmountError::Malformed(error)) => format!("not savable: {error}"),
    };
    Ok(format!("{} ({verdict})", format_two_decimals(value)))
}

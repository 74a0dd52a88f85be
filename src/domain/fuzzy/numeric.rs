//! Numeric-string parsing for manual judgment entry.
//!
//! Accepts plain decimals and simple `"p/q"` fractions. Unlike the tabular
//! import (which marks bad cells as NaN for the validator to report), manual
//! entry fails with a recoverable error identifying the offending input.

use crate::domain::foundation::ValidationError;

/// Parses `"2/3"`, `"0.5"`, `"4"` and similar forms into an `f64`.
///
/// `field` names the input being parsed (e.g. `"lower"`) so the error can
/// point the user at the offending bound.
pub fn parse_ratio(field: &str, input: &str) -> Result<f64, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError::empty_field(field));
    }

    if let Some((num, den)) = s.split_once('/') {
        let p: f64 = num.trim().parse().map_err(|_| {
            ValidationError::invalid_format(field, format!("invalid numerator in '{}'", s))
        })?;
        let q: f64 = den.trim().parse().map_err(|_| {
            ValidationError::invalid_format(field, format!("invalid denominator in '{}'", s))
        })?;
        if !p.is_finite() || !q.is_finite() {
            return Err(ValidationError::invalid_format(
                field,
                format!("fraction '{}' is not finite", s),
            ));
        }
        if q == 0.0 {
            return Err(ValidationError::invalid_format(
                field,
                format!("zero denominator in '{}'", s),
            ));
        }
        return Ok(p / q);
    }

    let n: f64 = s.parse().map_err(|_| {
        ValidationError::invalid_format(field, format!("not a number: '{}'", s))
    })?;
    if !n.is_finite() {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not finite", s),
        ));
    }
    Ok(n)
}

/// Lenient variant used by the tabular import: bad cells become NaN so the
/// matrix validators can report every offending coordinate in one pass.
pub fn parse_cell(input: &str) -> f64 {
    parse_ratio("cell", input).unwrap_or(f64::NAN)
}

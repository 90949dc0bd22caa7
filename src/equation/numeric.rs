//! # Numeric constants
//!
//! Literal numbers appearing in expression text. Constants follow US English
//! conventions (period as decimal separator) and accept scientific notation:
//!
//! ```bnf
//! number ::= { [digit]+[.[digit]*] | [digit]*.[digit]+ }[{E | e} [{+ | -}] [digit]+]
//! ```
//!
//! ```rust
//! use concavity::NumericConstant;
//! use std::str::FromStr;
//!
//! let fraction = NumericConstant::from_str(".375").unwrap();
//! let large = NumericConstant::from_str("6E5").unwrap();
//!
//! let value: f64 = large.into();
//! assert_eq!(value, 600000.0);
//! assert_eq!(f64::from(fraction), 0.375);
//! ```
//!
//! A leading sign is accepted; a redundant `+` is logged as a warning.

use log::warn;
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NumericConstantError {
    #[error("Empty numeric constant")]
    EmptyNumericConstant,

    #[error("Multiple decimal points: '{0}'")]
    MultipleDecimalPoints(String),

    #[error("Invalid scientific notation: '{0}'")]
    InvalidScientificNotation(String),

    #[error("Unexpected character: '{1}' in '{0}'")]
    UnexpectedCharacter(String, char),

    #[error("No digits: '{0}'")]
    NoDigits(String),

    /// Overflowed to infinity, or otherwise not a finite real.
    #[error("Not a real number: '{0}' is not a valid real number")]
    NotARealNumber(String),

    #[error("Parse error: '{0}' cannot be parsed as a number: {1}")]
    ParseFloatError(String, std::num::ParseFloatError),
}

/// A finite literal number.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NumericConstant(pub f64);

fn split_exponent(input: &str) -> (&str, Option<&str>) {
    match input.find(['E', 'e']) {
        Some(pos) => (&input[..pos], Some(&input[pos + 1..])),
        None => (input, None),
    }
}

fn validate_mantissa(full: &str, mantissa: &str) -> Result<(), NumericConstantError> {
    let digits = mantissa.strip_prefix(['+', '-']).unwrap_or(mantissa);
    if digits.is_empty() && full.len() > mantissa.len() {
        return Err(NumericConstantError::InvalidScientificNotation(
            full.to_string(),
        ));
    }

    let mut has_digits = false;
    let mut has_decimal = false;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => has_digits = true,
            '.' if has_decimal => {
                return Err(NumericConstantError::MultipleDecimalPoints(
                    full.to_string(),
                ));
            }
            '.' => has_decimal = true,
            c => {
                return Err(NumericConstantError::UnexpectedCharacter(
                    full.to_string(),
                    c,
                ));
            }
        }
    }

    if !has_digits {
        return Err(NumericConstantError::NoDigits(full.to_string()));
    }
    Ok(())
}

fn validate_exponent(full: &str, exponent: &str) -> Result<(), NumericConstantError> {
    let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(NumericConstantError::InvalidScientificNotation(
            full.to_string(),
        ));
    }
    Ok(())
}

impl FromStr for NumericConstant {
    type Err = NumericConstantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(NumericConstantError::EmptyNumericConstant);
        }

        let (mantissa, exponent) = split_exponent(input);
        validate_mantissa(input, mantissa)?;
        if let Some(exponent) = exponent {
            validate_exponent(input, exponent)?;
        }

        if input.starts_with('+') {
            warn!(
                "Numeric constant '{}' starts with a redundant '+' sign, ignoring.",
                input
            );
        }

        let value = input
            .parse::<f64>()
            .map_err(|e| NumericConstantError::ParseFloatError(input.to_string(), e))?;
        if !value.is_finite() {
            return Err(NumericConstantError::NotARealNumber(input.to_string()));
        }

        Ok(NumericConstant(value))
    }
}

impl From<f64> for NumericConstant {
    fn from(value: f64) -> Self {
        NumericConstant(value)
    }
}

impl From<NumericConstant> for f64 {
    fn from(value: NumericConstant) -> Self {
        value.0
    }
}

impl fmt::Display for NumericConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_constants() {
        let cases = [
            ("0", 0.0),
            ("-1", -1.0),
            (".375", 0.375),
            ("14.", 14.0),
            ("6E5", 600000.0),
            ("+8.123e-10", 8.123e-10),
        ];
        for (input, expected) in cases {
            let value: f64 = NumericConstant::from_str(input).unwrap().into();
            assert_eq!(value, expected, "parsing '{}'", input);
        }
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            NumericConstant::from_str(""),
            Err(NumericConstantError::EmptyNumericConstant)
        ));
        assert!(matches!(
            NumericConstant::from_str("1.2.3"),
            Err(NumericConstantError::MultipleDecimalPoints(_))
        ));
        assert!(matches!(
            NumericConstant::from_str("1E"),
            Err(NumericConstantError::InvalidScientificNotation(_))
        ));
        assert!(matches!(
            NumericConstant::from_str("E5"),
            Err(NumericConstantError::InvalidScientificNotation(_))
        ));
        assert!(matches!(
            NumericConstant::from_str("."),
            Err(NumericConstantError::NoDigits(_))
        ));
        assert!(matches!(
            NumericConstant::from_str("1a2"),
            Err(NumericConstantError::UnexpectedCharacter(_, 'a'))
        ));
        assert!(matches!(
            NumericConstant::from_str("1e400"),
            Err(NumericConstantError::NotARealNumber(_))
        ));
    }
}

use std::fmt;

use crate::types::ValidationResult;

pub fn _chain<T>(
    result: ValidationResult<T>,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    match result {
        ValidationResult::Valid(_) => {}
        ValidationResult::Warnings(_, warns) => {
            warnings.extend(warns);
        }
        ValidationResult::Invalid(warns, errs) => {
            warnings.extend(warns);
            errors.extend(errs);
        }
    }
}

pub fn _return(warnings: Vec<String>, errors: Vec<String>) -> ValidationResult {
    if !errors.is_empty() {
        ValidationResult::Invalid(warnings, errors)
    } else if !warnings.is_empty() {
        ValidationResult::Warnings((), warnings)
    } else {
        ValidationResult::Valid(())
    }
}

pub fn validate_strictly_ascending<V: PartialOrd + fmt::Display>(points: &[V]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for i in 1..points.len() {
        if points[i] <= points[i - 1] {
            errors.push(format!(
                "values are not strictly increasing: {} >= {} at index {}",
                points[i - 1],
                points[i],
                i
            ));
        }
    }

    _return(warnings, errors)
}

pub fn validate_finite(points: &[f64]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for (i, &value) in points.iter().enumerate() {
        if !value.is_finite() {
            errors.push(format!(
                "value at index {} is not a valid number: {}",
                i, value
            ));
        }
    }

    _return(warnings, errors)
}

/// Checks that `value` lies in the closed interval `[min, max]`.
pub fn validate_range<V: PartialOrd + fmt::Display>(
    name: &str,
    value: V,
    min: V,
    max: V,
) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    // NaN fails both comparisons, so negate the in-range test
    if !(value >= min && value <= max) {
        errors.push(format!(
            "{} must be within [{}, {}], got {}",
            name, min, max, value
        ));
    }

    _return(warnings, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_ascending() {
        assert!(validate_strictly_ascending(&[1.0, 2.0, 3.0]).is_valid());
        assert!(!validate_strictly_ascending(&[1.0, 1.0, 3.0]).is_valid());
        assert!(!validate_strictly_ascending(&[3.0, 2.0]).is_valid());
    }

    #[test]
    fn test_finite() {
        assert!(validate_finite(&[0.0, -1.5]).is_valid());
        let result = validate_finite(&[0.0, f64::NAN, f64::INFINITY]);
        assert_eq!(result.errors().len(), 2);
    }

    #[test]
    fn test_range() {
        assert!(validate_range("x_min", -5.0, -10.0, 0.0).is_valid());
        assert!(validate_range("x_min", 0.0, -10.0, 0.0).is_valid());
        assert!(!validate_range("x_min", 0.5, -10.0, 0.0).is_valid());
        assert!(!validate_range("x_min", f64::NAN, -10.0, 0.0).is_valid());
    }
}

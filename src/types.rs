/// The outcome of validating a value that may be accepted with caveats.
///
/// Validation collects every problem it finds rather than stopping at the
/// first one, so callers can report all of them together.
///
/// # Examples
///
/// ```rust
/// use concavity::types::ValidationResult;
///
/// let result: ValidationResult = ValidationResult::Warnings((), vec!["few samples".to_string()]);
/// assert!(result.is_valid());
/// assert_eq!(result.warnings().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T = ()> {
    /// Valid with nothing to report.
    Valid(T),
    /// Valid, but with warnings.
    Warnings(T, Vec<String>),
    /// Invalid: (warnings, errors).
    Invalid(Vec<String>, Vec<String>),
}

impl<T> ValidationResult<T> {
    /// Returns true unless the result is `Invalid`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, ValidationResult::Invalid(_, _))
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Warnings(_, warnings) => warnings,
            ValidationResult::Invalid(warnings, _) => warnings,
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            ValidationResult::Invalid(_, errors) => errors,
            _ => &[],
        }
    }
}

/// Types that can check their own invariants.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}

//! # Identifiers
//!
//! Names in expression text: the grid variable `x`, named constants such as
//! `pi`, and function names such as `sin`. Identifiers start with a letter or
//! underscore and continue with letters, digits or underscores. A name may be
//! qualified with dot notation (`np.sin`) so that expressions written against
//! array libraries read naturally.
//!
//! Comparison is case-insensitive: `SIN`, `Sin` and `sin` are the same name.
//!
//! ```rust
//! use concavity::Identifier;
//!
//! let id = Identifier::parse("np.Sin").unwrap();
//! assert!(id.is_qualified());
//! assert_eq!(id.qualifier(), Some("np"));
//! assert_eq!(id.normalized(), "sin");
//! assert_eq!(id, Identifier::parse("NP.SIN").unwrap());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("Empty identifier provided")]
    EmptyIdentifier,

    #[error("Invalid first character: '{0}'")]
    InvalidFirstCharacter(char),

    #[error("Invalid character in identifier: '{0}'")]
    InvalidCharacter(char),

    /// Empty segment around a dot, e.g. `np.` or `.sin`.
    #[error("Invalid qualified name format")]
    InvalidQualifiedName,
}

#[derive(Debug, Clone)]
pub struct Identifier {
    /// The identifier exactly as written
    raw: String,
    /// Lower-cased final segment
    normalized: String,
    /// Lower-cased leading segments, joined with '.'
    qualifier: Option<String>,
}

fn validate_segment(segment: &str) -> Result<(), IdentifierError> {
    let mut chars = segment.chars();
    match chars.next() {
        None => return Err(IdentifierError::InvalidQualifiedName),
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(c) => return Err(IdentifierError::InvalidFirstCharacter(c)),
    }

    match chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        Some(c) => Err(IdentifierError::InvalidCharacter(c)),
        None => Ok(()),
    }
}

impl Identifier {
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(IdentifierError::EmptyIdentifier);
        }

        let segments: Vec<&str> = raw.split('.').collect();
        for segment in &segments {
            validate_segment(segment)?;
        }

        let (name, namespace) = match segments.split_last() {
            Some((name, namespace)) => (*name, namespace),
            None => return Err(IdentifierError::EmptyIdentifier),
        };
        let qualifier = if namespace.is_empty() {
            None
        } else {
            Some(namespace.join(".").to_ascii_lowercase())
        };

        Ok(Identifier {
            raw: raw.to_string(),
            normalized: name.to_ascii_lowercase(),
            qualifier,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The lower-cased, unqualified name used for lookups.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn is_qualified(&self) -> bool {
        self.qualifier.is_some()
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized && self.qualifier == other.qualifier
    }
}

impl Eq for Identifier {}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.qualifier.hash(state);
        self.normalized.hash(state);
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::parse(s)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_identifier() {
        let id = Identifier::parse("x").unwrap();
        assert_eq!(id.raw(), "x");
        assert_eq!(id.normalized(), "x");
        assert!(!id.is_qualified());
    }

    #[test]
    fn test_case_insensitive_equality() {
        assert_eq!(
            Identifier::parse("PI").unwrap(),
            Identifier::parse("pi").unwrap()
        );
        assert_ne!(
            Identifier::parse("np.pi").unwrap(),
            Identifier::parse("pi").unwrap()
        );
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(Identifier::parse(""), Err(IdentifierError::EmptyIdentifier));
        assert_eq!(
            Identifier::parse("1x"),
            Err(IdentifierError::InvalidFirstCharacter('1'))
        );
        assert_eq!(
            Identifier::parse("x-y"),
            Err(IdentifierError::InvalidCharacter('-'))
        );
        assert_eq!(
            Identifier::parse("np."),
            Err(IdentifierError::InvalidQualifiedName)
        );
    }

    #[test]
    fn test_nested_qualifier() {
        let id = Identifier::parse("numpy.ma.sin").unwrap();
        assert_eq!(id.qualifier(), Some("numpy.ma"));
        assert_eq!(id.normalized(), "sin");
        assert_eq!(id.to_string(), "numpy.ma.sin");
    }
}

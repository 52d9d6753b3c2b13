//! Rejection reasons for command tokens.

use std::fmt;
use thiserror::Error;

/// Why a token was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// More runes than allowed.
    TooLong {
        /// Upper bound, inclusive.
        max: usize,
        /// Runes in the token.
        actual: usize,
    },
    /// Fewer runes than required.
    TooShort {
        /// Lower bound, inclusive.
        min: usize,
        /// Runes in the token.
        actual: usize,
    },
    /// A character the field may not contain.
    ForbiddenCharacter {
        /// Offending character.
        found: char,
    },
    /// Not one of a fixed list of names.
    NotInSet {
        /// What the list holds, e.g. `category`.
        set: &'static str,
        /// The token.
        actual: String,
    },
    /// Could not be read as the expected type.
    InvalidFormat {
        /// Expected type, e.g. `unsigned integer`.
        expected: String,
        /// The token.
        actual: String,
    },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { max, actual } => {
                write!(f, "{actual} runes, at most {max} allowed")
            }
            Self::TooShort { min, actual } => {
                write!(f, "{actual} runes, at least {min} required")
            }
            Self::ForbiddenCharacter { found } => write!(f, "may not contain '{found}'"),
            Self::NotInSet { set, actual } => write!(f, "'{actual}' is not a known {set}"),
            Self::InvalidFormat { expected, actual } => {
                write!(f, "'{actual}' is not a valid {expected}")
            }
        }
    }
}

/// A rejected token and the field it was given for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {kind}")]
pub struct ValidationError {
    /// Keyword or positional the token belongs to.
    pub field: String,
    /// Reason.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Rejection of `field` for `kind`.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    #[must_use]
    pub(crate) fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(field, ValidationErrorKind::TooLong { max, actual })
    }

    #[must_use]
    pub(crate) fn too_short(field: impl Into<String>, min: usize, actual: usize) -> Self {
        Self::new(field, ValidationErrorKind::TooShort { min, actual })
    }

    #[must_use]
    pub(crate) fn forbidden_character(field: impl Into<String>, found: char) -> Self {
        Self::new(field, ValidationErrorKind::ForbiddenCharacter { found })
    }

    #[must_use]
    pub(crate) fn not_in_set(
        field: impl Into<String>,
        set: &'static str,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            ValidationErrorKind::NotInSet {
                set,
                actual: actual.into(),
            },
        )
    }

    #[must_use]
    pub(crate) fn invalid_format(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(
            field,
            ValidationErrorKind::InvalidFormat {
                expected: expected.into(),
                actual: actual.into(),
            },
        )
    }

    /// Whether the token was rejected for its rune count.
    #[must_use]
    pub fn is_length_error(&self) -> bool {
        matches!(
            self.kind,
            ValidationErrorKind::TooLong { .. } | ValidationErrorKind::TooShort { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_long_names_field_and_bound() {
        let err = ValidationError::too_long("name", 10, 20);
        assert!(err.is_length_error());
        assert_eq!(err.to_string(), "invalid name: 20 runes, at most 10 allowed");
    }

    #[test]
    fn too_short_is_length_error() {
        let err = ValidationError::too_short("group", 4, 3);
        assert!(err.is_length_error());
        assert_eq!(err.to_string(), "invalid group: 3 runes, at least 4 required");
    }

    #[test]
    fn forbidden_character_quotes_it() {
        let err = ValidationError::forbidden_character("section", ':');
        assert!(!err.is_length_error());
        assert_eq!(err.to_string(), "invalid section: may not contain ':'");
    }

    #[test]
    fn not_in_set_names_the_set() {
        let err = ValidationError::not_in_set("category", "category", "bogus");
        assert_eq!(
            err.to_string(),
            "invalid category: 'bogus' is not a known category"
        );
    }

    #[test]
    fn invalid_format_names_expected_type() {
        let err = ValidationError::invalid_format("employeenr", "unsigned integer", "ten");
        assert_eq!(
            err.to_string(),
            "invalid employeenr: 'ten' is not a valid unsigned integer"
        );
    }
}

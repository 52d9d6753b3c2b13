//! Character and length checks on single tokens.

use crate::error::ValidationError;

/// Separator between a qualifier and a name (`category::permission`).
const QUALIFIER_SEPARATOR: char = ':';

/// Reject tokens containing a colon.
///
/// Names of sections, actions and permissions may not contain `:` because
/// the command grammar uses `::` to qualify them.
///
/// # Errors
///
/// Returns `ValidationError` if `value` contains `:`.
///
/// # Example
///
/// ```
/// use arbor_validation::validate_no_colon;
///
/// assert!(validate_no_colon("section", "auth").is_ok());
/// assert!(validate_no_colon("section", "auth::login").is_err());
/// ```
pub fn validate_no_colon(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.contains(QUALIFIER_SEPARATOR) {
        return Err(ValidationError::forbidden_character(
            field,
            QUALIFIER_SEPARATOR,
        ));
    }
    Ok(())
}

/// Bound the number of Unicode scalar values in `value` from above.
///
/// # Errors
///
/// Returns `ValidationError` if `value` has more than `max` characters.
pub fn validate_rune_count(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let count = value.chars().count();
    if count > max {
        return Err(ValidationError::too_long(field, max, count));
    }
    Ok(())
}

/// Bound the number of Unicode scalar values in `value` to `[min, max]`.
///
/// # Errors
///
/// Returns `ValidationError` if the character count is outside the range.
pub fn validate_rune_count_range(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let count = value.chars().count();
    if count < min {
        return Err(ValidationError::too_short(field, min, count));
    }
    if count > max {
        return Err(ValidationError::too_long(field, max, count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;

    #[test]
    fn rune_count_counts_scalars_not_bytes() {
        // four scalars, eight bytes
        let value = "äöüß";
        assert_eq!(value.len(), 8);
        assert!(validate_rune_count("name", value, 4).is_ok());
        assert!(validate_rune_count("name", value, 3).is_err());
    }

    #[test]
    fn rune_count_range_reports_which_bound() {
        let err = validate_rune_count_range("group", "api", 4, 256).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::TooShort { min: 4, actual: 3 });

        let long = "x".repeat(257);
        let err = validate_rune_count_range("group", &long, 4, 256).unwrap_err();
        assert_eq!(
            err.kind,
            ValidationErrorKind::TooLong {
                max: 256,
                actual: 257
            }
        );
    }

    #[test]
    fn rune_count_range_is_inclusive() {
        assert!(validate_rune_count_range("group", "abcd", 4, 256).is_ok());
        assert!(validate_rune_count_range("group", &"y".repeat(256), 4, 256).is_ok());
    }

    #[test]
    fn single_colon_is_rejected_too() {
        assert!(validate_no_colon("action", "a:b").is_err());
        assert!(validate_no_colon("action", "").is_ok());
    }
}

//! Numeric validation functions.

use crate::error::ValidationError;

/// Decode an unsigned decimal token.
///
/// # Errors
///
/// Returns `ValidationError` if `value` is not a non-negative integer that
/// fits in a `u64`.
pub fn validate_unsigned(field: &str, value: &str) -> Result<u64, ValidationError> {
    value
        .parse::<u64>()
        .map_err(|_| ValidationError::invalid_format(field, "unsigned integer", value))
}

/// Decode a signed decimal token.
///
/// # Errors
///
/// Returns `ValidationError` if `value` is not an integer that fits in an
/// `i64`.
pub fn validate_signed(field: &str, value: &str) -> Result<i64, ValidationError> {
    value
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format(field, "integer", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("0", 0)]
    #[test_case("300", 300)]
    #[test_case("18446744073709551615", u64::MAX)]
    fn unsigned_accepts(input: &str, expected: u64) {
        assert_eq!(validate_unsigned("interval", input), Ok(expected));
    }

    #[test_case("-1")]
    #[test_case("1.5")]
    #[test_case("")]
    #[test_case("5m")]
    fn unsigned_rejects(input: &str) {
        let err = validate_unsigned("interval", input).unwrap_err();
        assert_eq!(err.field, "interval");
    }

    #[test]
    fn signed_accepts_negative() {
        assert_eq!(validate_signed("value", "-42"), Ok(-42));
        assert!(validate_signed("value", "ten").is_err());
    }
}

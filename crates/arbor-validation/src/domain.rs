//! Membership checks against the closed vocabularies the server knows.

use crate::error::ValidationError;

/// Permission categories known to the client.
pub const CATEGORIES: &[&str] = &[
    "omnipotence",
    "system",
    "global",
    "global:grant",
    "permission",
    "permission:grant",
    "operations",
    "operations:grant",
    "repository",
    "repository:grant",
    "team",
    "team:grant",
    "monitoring",
    "monitoring:grant",
    "identity",
    "identity:grant",
    "self",
];

/// System property names known to the server.
pub const SYSTEM_PROPERTIES: &[&str] = &[
    "cluster_datacenter_default",
    "cluster_datacenter_failover",
    "disable_all_monitoring",
    "disable_check_configuration",
    "disable_monitoring",
    "dns_name",
    "dns_zone",
    "documentation",
    "fqdn",
    "group_id",
    "information_system",
    "link",
    "mailing_list",
    "monitoring_service_level",
    "nagios_hostname",
    "tag",
    "wiki",
];

/// Accepted attribute cardinalities.
pub const CARDINALITIES: &[&str] = &["once", "multi"];

/// Check that `value` is a known permission category.
///
/// # Errors
///
/// Returns `ValidationError` if the category is unknown.
///
/// # Example
///
/// ```
/// use arbor_validation::validate_category;
///
/// assert!(validate_category("global").is_ok());
/// assert!(validate_category("Global").is_err());
/// ```
pub fn validate_category(value: &str) -> Result<(), ValidationError> {
    if CATEGORIES.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::not_in_set("category", "category", value))
}

/// Check that `value` is a known system property name.
///
/// # Errors
///
/// Returns `ValidationError` if the name is unknown.
pub fn validate_system_property(value: &str) -> Result<(), ValidationError> {
    if SYSTEM_PROPERTIES.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::not_in_set(
        "system property",
        "system property",
        value,
    ))
}

/// Check that `value` is `once` or `multi`.
///
/// # Errors
///
/// Returns `ValidationError` for any other token.
pub fn validate_cardinality(value: &str) -> Result<(), ValidationError> {
    if CARDINALITIES.contains(&value) {
        return Ok(());
    }
    Err(ValidationError::not_in_set("cardinality", "cardinality", value))
}

/// Decode a boolean token.
///
/// Accepts `true`, `false`, `yes`, `no`, `1` and `0`, case-insensitively.
///
/// # Errors
///
/// Returns `ValidationError` for any other token.
pub fn validate_bool(field: &str, value: &str) -> Result<bool, ValidationError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(ValidationError::invalid_format(
            field,
            "one of true, false, yes, no, 1, 0",
            value,
        )),
    }
}

/// Whether `value` is already an opaque server identifier.
#[must_use]
pub fn is_uuid(value: &str) -> bool {
    uuid::Uuid::try_parse(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("true", true ; "true")]
    #[test_case("TRUE", true ; "upper true")]
    #[test_case("Yes", true ; "mixed yes")]
    #[test_case("1", true ; "one")]
    #[test_case("false", false ; "false")]
    #[test_case("no", false ; "no")]
    #[test_case("NO", false ; "upper no")]
    #[test_case("0", false ; "zero")]
    fn bool_tokens_decode(input: &str, expected: bool) {
        assert_eq!(validate_bool("inheritance", input), Ok(expected));
    }

    #[test_case("" ; "empty")]
    #[test_case("on" ; "on")]
    #[test_case("2" ; "two")]
    #[test_case("truee" ; "typo")]
    fn bad_bool_tokens_fail(input: &str) {
        assert!(validate_bool("inheritance", input).is_err());
    }

    #[test]
    fn grant_categories_are_known() {
        for category in ["global:grant", "repository:grant", "self"] {
            assert!(validate_category(category).is_ok(), "{category}");
        }
    }

    #[test]
    fn unknown_system_property_names_the_value() {
        let err = validate_system_property("dns-name").unwrap_err();
        assert!(err.to_string().contains("'dns-name'"));
    }

    #[test]
    fn cardinality_is_closed() {
        assert!(validate_cardinality("once").is_ok());
        assert!(validate_cardinality("multi").is_ok());
        assert!(validate_cardinality("Once").is_err());
    }

    #[test]
    fn uuid_detection() {
        assert!(is_uuid("0b9d1f4e-5d2a-4c84-9a0c-4f7c2f0e9b11"));
        assert!(!is_uuid("prodbucket"));
    }
}

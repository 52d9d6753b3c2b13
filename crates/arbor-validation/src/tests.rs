//! Property-based tests across the validators.

use crate::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // -------------------------------------------------------------------------
    // Category membership
    // -------------------------------------------------------------------------

    #[test]
    fn prop_category_is_pure(s in ".{0,24}") {
        let first = validate_category(&s);
        let second = validate_category(&s);
        prop_assert_eq!(first.is_ok(), second.is_ok());
        prop_assert_eq!(first.is_ok(), CATEGORIES.contains(&s.as_str()));
    }

    #[test]
    fn prop_known_categories_pass(idx in 0..CATEGORIES.len()) {
        prop_assert!(validate_category(CATEGORIES[idx]).is_ok());
    }

    // -------------------------------------------------------------------------
    // Colons
    // -------------------------------------------------------------------------

    #[test]
    fn prop_colon_anywhere_fails(
        prefix in "[a-z_]{0,16}",
        suffix in "[a-z_]{0,16}"
    ) {
        let token = format!("{prefix}:{suffix}");
        prop_assert!(validate_no_colon("section", &token).is_err());
    }

    #[test]
    fn prop_colon_free_passes(token in "[^:]{0,32}") {
        prop_assert!(validate_no_colon("section", &token).is_ok());
    }

    // -------------------------------------------------------------------------
    // Rune counts
    // -------------------------------------------------------------------------

    #[test]
    fn prop_rune_count_matches_chars(s in "\\PC{0,64}", max in 0usize..64) {
        let ok = validate_rune_count("name", &s, max).is_ok();
        prop_assert_eq!(ok, s.chars().count() <= max);
    }

    #[test]
    fn prop_range_agrees_with_bounds(s in "\\PC{0,40}", min in 0usize..20, span in 0usize..20) {
        let max = min + span;
        let count = s.chars().count();
        let ok = validate_rune_count_range("name", &s, min, max).is_ok();
        prop_assert_eq!(ok, count >= min && count <= max);
    }

    // -------------------------------------------------------------------------
    // Booleans and integers
    // -------------------------------------------------------------------------

    #[test]
    fn prop_bool_case_insensitive(
        token in prop::sample::select(vec!["true", "false", "yes", "no"]),
        upper in any::<bool>()
    ) {
        let input = if upper { token.to_uppercase() } else { token.to_string() };
        let expected = matches!(token, "true" | "yes");
        prop_assert_eq!(validate_bool("flag", &input), Ok(expected));
    }

    #[test]
    fn prop_unsigned_roundtrips_display(n in any::<u64>()) {
        prop_assert_eq!(validate_unsigned("interval", &n.to_string()), Ok(n));
    }
}

#[test]
fn system_properties_and_categories_are_sorted_sets() {
    let mut props = SYSTEM_PROPERTIES.to_vec();
    props.sort_unstable();
    props.dedup();
    assert_eq!(props.len(), SYSTEM_PROPERTIES.len());

    let mut cats = CATEGORIES.to_vec();
    cats.sort_unstable();
    cats.dedup();
    assert_eq!(cats.len(), CATEGORIES.len());
}

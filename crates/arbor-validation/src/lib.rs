//! Token validators for the arbor administrative client.
//!
//! Every validator is a pure function of its input. On violation it returns
//! a [`ValidationError`] naming the offending field; coercing validators
//! such as [`validate_bool`] return the decoded value on success.
//!
//! ```
//! use arbor_validation::{validate_bool, validate_category, validate_rune_count_range};
//!
//! validate_category("global")?;
//! validate_rune_count_range("group", "frontend", 4, 256)?;
//! assert!(validate_bool("inheritance", "yes")?);
//! # Ok::<(), arbor_validation::ValidationError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod domain;
mod error;
mod numeric;
mod strings;

pub use domain::{
    is_uuid, validate_bool, validate_cardinality, validate_category, validate_system_property,
    CARDINALITIES, CATEGORIES, SYSTEM_PROPERTIES,
};
pub use error::{ValidationError, ValidationErrorKind};
pub use numeric::{validate_signed, validate_unsigned};
pub use strings::{validate_no_colon, validate_rune_count, validate_rune_count_range};

/// Maximum length of property names and service attribute names and values.
pub const MAX_PROPERTY_RUNES: usize = 128;

/// Minimum length of group and cluster names.
pub const MIN_OBJECT_NAME_RUNES: usize = 4;

/// Maximum length of group and cluster names.
pub const MAX_OBJECT_NAME_RUNES: usize = 256;

#[cfg(test)]
mod tests;

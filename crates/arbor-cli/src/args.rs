//! Token model and the variadic keyword parser.
//!
//! A leaf command receives its arguments as a flat token list. The first
//! token is usually the *subject*; the rest is the *tail*, read strictly
//! left to right as `keyword value` pairs and checked against a
//! [`Contract`] declared by the command.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while splitting and parsing command tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// The keyword tail has an odd number of tokens.
    #[error("malformed arguments: keywords and values must come in pairs")]
    MalformedTail,

    /// A keyword is not declared by the command.
    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),

    /// A single-use keyword was given twice.
    #[error("keyword may only be given once: {0}")]
    DuplicateUnique(String),

    /// A required keyword is missing.
    #[error("missing required keyword: {0}")]
    MissingRequired(String),

    /// Wrong number of positional arguments.
    #[error("wrong number of arguments: expected {expected}, got {actual}")]
    Arity {
        /// Human-readable description of the accepted counts.
        expected: String,
        /// Number of tokens received.
        actual: usize,
    },

    /// A token does not fit the command grammar at its position.
    #[error("unexpected argument '{token}': {reason}")]
    Unexpected {
        /// The offending token.
        token: String,
        /// What was expected instead.
        reason: String,
    },
}

impl ArgumentError {
    pub(crate) fn unexpected(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unexpected {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

/// Keyword declaration for one command.
///
/// `multiple` keywords accept any number of values, `unique` ones at most
/// one, and every `required` keyword must be present. A required keyword
/// that is not declared multiple is treated as unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contract {
    multiple: Vec<String>,
    unique: Vec<String>,
    required: Vec<String>,
}

impl Contract {
    /// Empty contract: accepts only an empty tail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare multi-valued keywords.
    #[must_use]
    pub fn multiple<I>(mut self, keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.multiple
            .extend(keywords.into_iter().map(|k| k.as_ref().to_owned()));
        self
    }

    /// Declare single-valued keywords.
    #[must_use]
    pub fn unique<I>(mut self, keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.unique
            .extend(keywords.into_iter().map(|k| k.as_ref().to_owned()));
        self
    }

    /// Declare mandatory keywords.
    #[must_use]
    pub fn required<I>(mut self, keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.required
            .extend(keywords.into_iter().map(|k| k.as_ref().to_owned()));
        self
    }

    fn is_multiple(&self, keyword: &str) -> bool {
        self.multiple.iter().any(|k| k == keyword)
    }

    fn is_unique(&self, keyword: &str) -> bool {
        self.unique.iter().any(|k| k == keyword)
            || (self.required.iter().any(|k| k == keyword) && !self.is_multiple(keyword))
    }

    /// Parse `tail` against this contract.
    ///
    /// # Errors
    ///
    /// Fails on an odd tail, an undeclared keyword, a repeated single-use
    /// keyword, or a missing required keyword, in that order of checking.
    pub fn parse(&self, tail: &[String]) -> Result<KeywordMap, ArgumentError> {
        if tail.len() % 2 != 0 {
            return Err(ArgumentError::MalformedTail);
        }

        let mut values: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for pair in tail.chunks_exact(2) {
            let (keyword, value) = (&pair[0], &pair[1]);
            let unique = self.is_unique(keyword);
            if !unique && !self.is_multiple(keyword) {
                return Err(ArgumentError::UnknownKeyword(keyword.clone()));
            }
            let slot = values.entry(keyword.clone()).or_default();
            if unique && !slot.is_empty() {
                return Err(ArgumentError::DuplicateUnique(keyword.clone()));
            }
            slot.push(value.clone());
        }

        for keyword in &self.required {
            if values.get(keyword).is_none_or(Vec::is_empty) {
                return Err(ArgumentError::MissingRequired(keyword.clone()));
            }
        }

        Ok(KeywordMap { values })
    }
}

/// Parsed keyword tail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMap {
    values: BTreeMap<String, Vec<String>>,
}

impl KeywordMap {
    /// Value of a single-use keyword, if given.
    #[must_use]
    pub fn one(&self, keyword: &str) -> Option<&str> {
        self.values
            .get(keyword)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Value of a keyword the contract made required.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequired` if the keyword is absent.
    pub fn required(&self, keyword: &str) -> Result<&str, ArgumentError> {
        self.one(keyword)
            .ok_or_else(|| ArgumentError::MissingRequired(keyword.to_owned()))
    }

    /// All values of a keyword, in input order.
    #[must_use]
    pub fn all(&self, keyword: &str) -> &[String] {
        self.values.get(keyword).map_or(&[], Vec::as_slice)
    }

    /// Whether the keyword was given.
    #[must_use]
    pub fn has(&self, keyword: &str) -> bool {
        self.values.contains_key(keyword)
    }

    /// Keywords that were given, sorted.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Require exactly `n` tokens.
///
/// # Errors
///
/// Returns `Arity` on any other count.
pub fn exactly(args: &[String], n: usize) -> Result<(), ArgumentError> {
    if args.len() == n {
        return Ok(());
    }
    Err(ArgumentError::Arity {
        expected: n.to_string(),
        actual: args.len(),
    })
}

/// Require at least `n` tokens.
///
/// # Errors
///
/// Returns `Arity` if fewer tokens were given.
pub fn at_least(args: &[String], n: usize) -> Result<(), ArgumentError> {
    if args.len() >= n {
        return Ok(());
    }
    Err(ArgumentError::Arity {
        expected: format!("at least {n}"),
        actual: args.len(),
    })
}

/// Require one of the listed token counts.
///
/// # Errors
///
/// Returns `Arity` if the count is not listed.
pub fn one_of_lengths(args: &[String], lengths: &[usize]) -> Result<(), ArgumentError> {
    if lengths.contains(&args.len()) {
        return Ok(());
    }
    let expected = lengths
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(ArgumentError::Arity {
        expected,
        actual: args.len(),
    })
}

/// Split the subject from the keyword tail.
///
/// # Errors
///
/// Returns `Arity` if there is no subject.
pub fn split_subject(args: &[String]) -> Result<(&str, &[String]), ArgumentError> {
    match args.split_first() {
        Some((subject, tail)) => Ok((subject.as_str(), tail)),
        None => Err(ArgumentError::Arity {
            expected: "at least 1".into(),
            actual: 0,
        }),
    }
}

/// The single positional argument.
///
/// # Errors
///
/// Returns `Arity` unless exactly one token was given.
pub fn sole(args: &[String]) -> Result<&str, ArgumentError> {
    match args {
        [only] => Ok(only.as_str()),
        _ => Err(ArgumentError::Arity {
            expected: "1".into(),
            actual: args.len(),
        }),
    }
}

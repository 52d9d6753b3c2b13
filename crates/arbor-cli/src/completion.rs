//! Shell completion for leaf commands.
//!
//! Given the tokens typed after a leaf's verb path, a [`Completion`]
//! proposes the legal next tokens. Completion never guesses values: where
//! the next token is the value of a keyword, nothing is proposed.

use std::io::{self, Write};

/// Completion behaviour of one leaf command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Never propose anything.
    None,
    /// Subject first, then single-use keywords each taking one value.
    Generic(&'static [&'static str]),
    /// Like [`Completion::Generic`] but without a subject.
    Direct(&'static [&'static str]),
    /// Subject first, then single-use keywords each taking two values.
    Triple(&'static [&'static str]),
    /// Subject first, then keywords of which `multi` may repeat.
    Multi {
        /// Keywords suppressed after their first use.
        single: &'static [&'static str],
        /// Keywords always proposed.
        multi: &'static [&'static str],
    },
    /// Subject from `data`, then [`Completion::Generic`] over `keywords`.
    DataFirst {
        /// Candidate subjects.
        data: &'static [&'static str],
        /// Keywords after the subject.
        keywords: &'static [&'static str],
    },
    /// Subject from a data set, nothing afterwards.
    DataOnly(&'static [&'static str]),
    /// The `check-config create` grammar.
    CheckConfig,
}

impl Completion {
    /// Candidate next tokens after `args`.
    #[must_use]
    pub fn candidates(&self, args: &[String]) -> Vec<&'static str> {
        match *self {
            Self::None => Vec::new(),
            Self::Generic(keywords) => after_subject(args, |tail| {
                unused_keywords(tail, keywords, &[], 1)
            }),
            Self::Direct(keywords) => unused_keywords(args, keywords, &[], 1),
            Self::Triple(keywords) => after_subject(args, |tail| {
                unused_keywords(tail, keywords, &[], 2)
            }),
            Self::Multi { single, multi } => after_subject(args, |tail| {
                unused_keywords(tail, single, multi, 1)
            }),
            Self::DataFirst { data, keywords } => {
                if args.is_empty() {
                    data.to_vec()
                } else {
                    Self::Generic(keywords).candidates(args)
                }
            }
            Self::DataOnly(data) => {
                if args.is_empty() {
                    data.to_vec()
                } else {
                    Vec::new()
                }
            }
            Self::CheckConfig => after_subject(args, check_config),
        }
    }

    /// Write candidates, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn complete<W: Write>(&self, args: &[String], out: &mut W) -> io::Result<()> {
        for candidate in self.candidates(args) {
            writeln!(out, "{candidate}")?;
        }
        Ok(())
    }
}

fn after_subject<F>(args: &[String], rest: F) -> Vec<&'static str>
where
    F: FnOnce(&[String]) -> Vec<&'static str>,
{
    match args.split_first() {
        Some((_, tail)) => rest(tail),
        None => Vec::new(),
    }
}

fn unused_keywords(
    tokens: &[String],
    single: &'static [&'static str],
    multi: &'static [&'static str],
    arity: usize,
) -> Vec<&'static str> {
    let mut seen: Vec<&str> = Vec::new();
    let mut pending = 0;
    for token in tokens {
        if pending > 0 {
            pending -= 1;
            continue;
        }
        let token = token.as_str();
        if single.contains(&token) || multi.contains(&token) {
            seen.push(token);
            pending = arity;
        }
    }
    if pending > 0 {
        return Vec::new();
    }
    single
        .iter()
        .filter(|k| !seen.contains(k))
        .chain(multi.iter())
        .copied()
        .collect()
}

/// Top-level single-use keywords of `check-config create`.
pub const CHECK_KEYWORDS: &[&str] = &[
    "in",
    "on",
    "with",
    "interval",
    "inheritance",
    "childrenonly",
    "extern",
];
/// Repeatable sub-context keywords of `check-config create`.
pub const CHECK_REPEATABLE: &[&str] = &["threshold", "constraint"];
/// Object kinds accepted after `on`.
pub const ON_ARGS: &[&str] = &["repository", "bucket", "group", "cluster", "node"];
/// Keywords inside a `threshold`.
pub const THRESHOLD_ARGS: &[&str] = &["predicate", "level", "value"];
/// Constraint kinds inside a `constraint`.
pub const CONSTRAINT_ARGS: &[&str] = &["service", "oncall", "attribute", "system", "native", "custom"];

const ALL_THRESHOLD: u8 = 0b111;

/// Where in the `check-config create` grammar the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Top,
    /// After `on`: object kind, then object name.
    On,
    /// Inside `threshold`, with seen-bits over [`THRESHOLD_ARGS`].
    Threshold(u8),
    /// After `constraint`, expecting a kind.
    Constraint,
    /// Reading the values of a constraint.
    ConstraintValues,
}

#[derive(Debug)]
struct CheckState {
    context: Context,
    /// Seen-bits over [`CHECK_KEYWORDS`].
    seen: u8,
    /// Value tokens still expected.
    pending: usize,
}

impl CheckState {
    fn new() -> Self {
        Self {
            context: Context::Top,
            seen: 0,
            pending: 0,
        }
    }

    fn feed(&mut self, token: &str) {
        if self.pending > 0 {
            self.pending -= 1;
            if self.pending == 0 {
                self.settle();
            }
            return;
        }
        match self.context {
            Context::Threshold(bits) => match position(THRESHOLD_ARGS, token) {
                Some(i) if bits & (1 << i) == 0 => {
                    self.context = Context::Threshold(bits | (1 << i));
                    self.pending = 1;
                }
                _ => {
                    self.context = Context::Top;
                    self.top(token);
                }
            },
            Context::Constraint => match token {
                "service" | "oncall" => {
                    self.context = Context::ConstraintValues;
                    self.pending = 1;
                }
                "attribute" | "system" | "native" | "custom" => {
                    self.context = Context::ConstraintValues;
                    self.pending = 2;
                }
                _ => {
                    self.context = Context::Top;
                    self.top(token);
                }
            },
            Context::Top | Context::On | Context::ConstraintValues => {
                self.context = Context::Top;
                self.top(token);
            }
        }
    }

    fn top(&mut self, token: &str) {
        if let Some(i) = position(CHECK_KEYWORDS, token) {
            self.seen |= 1 << i;
            if token == "on" {
                self.context = Context::On;
                self.pending = 2;
            } else {
                self.pending = 1;
            }
            return;
        }
        match token {
            "threshold" => self.context = Context::Threshold(0),
            "constraint" => self.context = Context::Constraint,
            _ => {}
        }
    }

    /// Leave a sub-context once it is complete.
    fn settle(&mut self) {
        match self.context {
            Context::On | Context::ConstraintValues | Context::Threshold(ALL_THRESHOLD) => {
                self.context = Context::Top;
            }
            _ => {}
        }
    }

    fn candidates(&self) -> Vec<&'static str> {
        match (self.context, self.pending) {
            // Unlike every other value slot, a pending threshold value does
            // not silence completion: the keywords not yet given in this
            // block are still offered.
            (Context::Threshold(bits), _) => THRESHOLD_ARGS
                .iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << i) == 0)
                .map(|(_, k)| *k)
                .collect(),
            (Context::On, 2) => ON_ARGS.to_vec(),
            (_, p) if p > 0 => Vec::new(),
            (Context::Constraint, _) => CONSTRAINT_ARGS.to_vec(),
            _ => CHECK_KEYWORDS
                .iter()
                .enumerate()
                .filter(|(i, _)| self.seen & (1 << i) == 0)
                .map(|(_, k)| *k)
                .chain(CHECK_REPEATABLE.iter().copied())
                .collect(),
        }
    }
}

fn position(alphabet: &[&str], token: &str) -> Option<usize> {
    alphabet.iter().position(|k| *k == token)
}

fn check_config(tail: &[String]) -> Vec<&'static str> {
    let mut state = CheckState::new();
    for token in tail {
        state.feed(token);
    }
    state.candidates()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    const KW: &[&str] = &["to", "in", "view"];

    #[test]
    fn generic_waits_for_subject() {
        assert!(Completion::Generic(KW).candidates(&[]).is_empty());
        assert_eq!(Completion::Generic(KW).candidates(&toks("api")), KW);
    }

    #[test]
    fn generic_drops_used_keywords() {
        let got = Completion::Generic(KW).candidates(&toks("api to grp"));
        assert_eq!(got, ["in", "view"]);
    }

    #[test]
    fn generic_is_silent_at_value_slot() {
        assert!(Completion::Generic(KW).candidates(&toks("api to")).is_empty());
    }

    #[test]
    fn direct_has_no_subject() {
        assert_eq!(Completion::Direct(&["in"]).candidates(&[]), ["in"]);
        assert!(Completion::Direct(&["in"]).candidates(&toks("in global")).is_empty());
    }

    #[test]
    fn triple_skips_two_values() {
        let c = Completion::Triple(&["attribute", "level"]);
        assert!(c.candidates(&toks("x attribute k")).is_empty());
        assert_eq!(c.candidates(&toks("x attribute k v")), ["level"]);
    }

    #[test]
    fn multi_reproposes_repeatable() {
        let c = Completion::Multi {
            single: &["team"],
            multi: &["port"],
        };
        assert_eq!(c.candidates(&toks("svc team ops port 80")), ["port"]);
    }

    #[test]
    fn data_first_then_keywords() {
        let c = Completion::DataFirst {
            data: &["dns_zone", "fqdn"],
            keywords: &["value"],
        };
        assert_eq!(c.candidates(&[]), ["dns_zone", "fqdn"]);
        assert_eq!(c.candidates(&toks("fqdn")), ["value"]);
    }

    #[test]
    fn data_only_stops_after_subject() {
        let c = Completion::DataOnly(&["once", "multi"]);
        assert_eq!(c.candidates(&[]), ["once", "multi"]);
        assert!(c.candidates(&toks("once")).is_empty());
    }

    #[test]
    fn check_config_threshold_offers_remaining_keywords() {
        let got = Completion::CheckConfig.candidates(&toks("foo in X threshold predicate"));
        assert_eq!(got, ["level", "value"]);
    }

    #[test]
    fn check_config_threshold_exits_when_complete() {
        let got = Completion::CheckConfig
            .candidates(&toks("foo in X threshold predicate >= level warn value 80"));
        assert_eq!(
            got,
            [
                "on",
                "with",
                "interval",
                "inheritance",
                "childrenonly",
                "extern",
                "threshold",
                "constraint"
            ]
        );
    }

    #[test]
    fn check_config_on_offers_object_kinds() {
        assert_eq!(
            Completion::CheckConfig.candidates(&toks("foo on")),
            ON_ARGS
        );
        assert!(Completion::CheckConfig
            .candidates(&toks("foo on group"))
            .is_empty());
        let after = Completion::CheckConfig.candidates(&toks("foo on group api"));
        assert!(!after.contains(&"on"));
        assert!(after.contains(&"in"));
    }

    #[test]
    fn check_config_constraint_alphabet() {
        assert_eq!(
            Completion::CheckConfig.candidates(&toks("foo constraint")),
            CONSTRAINT_ARGS
        );
        assert!(Completion::CheckConfig
            .candidates(&toks("foo constraint system dns_zone"))
            .is_empty());
        let after = Completion::CheckConfig.candidates(&toks("foo constraint system dns_zone x"));
        assert!(after.contains(&"constraint"));
        assert!(after.contains(&"threshold"));
    }

    #[test]
    fn check_config_silent_at_top_value_slot() {
        assert!(Completion::CheckConfig
            .candidates(&toks("foo interval"))
            .is_empty());
        assert!(Completion::CheckConfig.candidates(&[]).is_empty());
    }

    #[test]
    fn check_config_leaves_threshold_on_top_keyword() {
        let got = Completion::CheckConfig
            .candidates(&toks("foo threshold predicate >= with cap"));
        assert!(!got.contains(&"with"));
        assert!(got.contains(&"threshold"));
    }

    #[test]
    fn complete_writes_lines() {
        let mut out = Vec::new();
        Completion::Generic(&["to", "in"])
            .complete(&toks("api"), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "to\nin\n");
    }

    const SINGLE: &[&str] = &["to", "in", "view", "value"];
    const MULTI: &[&str] = &["port", "tag"];

    proptest! {
        #[test]
        fn prop_used_single_keyword_not_reproposed(
            used in proptest::sample::subsequence(SINGLE.to_vec(), 0..=SINGLE.len()),
            repeats in proptest::collection::vec(proptest::sample::select(MULTI.to_vec()), 0..4),
        ) {
            let mut args = vec!["subject".to_owned()];
            for kw in used.iter().chain(repeats.iter()) {
                args.push((*kw).to_owned());
                args.push("v".to_owned());
            }
            let got = Completion::Multi { single: SINGLE, multi: MULTI }.candidates(&args);
            for kw in &used {
                prop_assert!(!got.contains(kw));
            }
            for kw in MULTI {
                prop_assert!(got.contains(kw));
            }
        }

        #[test]
        fn prop_silent_after_keyword(
            prefix in proptest::sample::subsequence(SINGLE.to_vec(), 0..SINGLE.len()),
            last in proptest::sample::select(MULTI.to_vec()),
        ) {
            let mut args = vec!["subject".to_owned()];
            for kw in &prefix {
                args.push((*kw).to_owned());
                args.push("v".to_owned());
            }
            args.push(last.to_owned());
            let got = Completion::Multi { single: SINGLE, multi: MULTI }.candidates(&args);
            prop_assert!(got.is_empty());
        }
    }
}

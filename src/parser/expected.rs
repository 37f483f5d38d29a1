//! Static diagnostic metadata carried by every parser.
//!
//! An [`Expected`] set names the prefixes a parser could accept at its entry
//! point. It is derived structurally while the grammar is built and is only
//! read when a failure has to be described; matching never consults it.
//!
//! | Parser | Expected set |
//! |---|---|
//! | lifted matcher `m` | `{m}` |
//! | `a.then(b)` | set of `a` |
//! | `a.or(b)` | set of `a` ∪ set of `b` |
//! | `a.optional()`, `a.zero_or_more()`, ... | set of `a` |
//! | `a.label(name)` | `{name}` |

use std::fmt;
use std::rc::Rc;

use crate::matcher::{Matcher, PrefixMatcher};

/// One entry of an expected set.
#[derive(Clone)]
pub enum Expectation {
    Prefix(Matcher),
    /// A name standing in for a whole sub-grammar.
    Label(Rc<str>),
}

impl Expectation {
    pub fn description(&self) -> String {
        match self {
            Expectation::Prefix(matcher) => matcher.description(),
            Expectation::Label(name) => name.to_string(),
        }
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Expected {
    prefixes: Vec<Expectation>,
    skips_whitespace: bool,
}

impl Expected {
    /// The empty set, for parsers that cannot fail.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn matcher(matcher: &Matcher) -> Self {
        Self {
            prefixes: vec![Expectation::Prefix(matcher.clone())],
            skips_whitespace: false,
        }
    }

    pub fn label(name: &str) -> Self {
        Self {
            prefixes: vec![Expectation::Label(Rc::from(name))],
            skips_whitespace: false,
        }
    }

    pub fn prefixes(&self) -> &[Expectation] {
        &self.prefixes
    }

    /// Whether ambient whitespace may be skipped before the first prefix.
    pub fn skips_whitespace(&self) -> bool {
        self.skips_whitespace
    }

    pub fn union(&self, other: &Expected) -> Expected {
        let mut prefixes = self.prefixes.clone();
        merge(&mut prefixes, &other.prefixes);
        Expected {
            prefixes,
            skips_whitespace: self.skips_whitespace || other.skips_whitespace,
        }
    }

    pub fn with_whitespace_skip(mut self) -> Self {
        self.skips_whitespace = true;
        self
    }

    /// Same prefixes, but keeping `other`'s whitespace flag.
    pub fn relabel(&self, other: &Expected) -> Expected {
        Expected {
            prefixes: self.prefixes.clone(),
            skips_whitespace: other.skips_whitespace,
        }
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.prefixes.iter().map(Expectation::description).collect()
    }
}

/// Append the entries of `extra` not already described in `target`,
/// preserving first-seen order.
pub(crate) fn merge(target: &mut Vec<Expectation>, extra: &[Expectation]) {
    for expectation in extra {
        let description = expectation.description();
        if !target.iter().any(|seen| seen.description() == description) {
            target.push(expectation.clone());
        }
    }
}

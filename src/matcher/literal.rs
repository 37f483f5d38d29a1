//! Exact text matchers.

use super::{MatchOutcome, Matcher, PrefixMatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseRule {
    Sensitive,
    Insensitive,
}

/// Matches a fixed string at the start of the input.
///
/// Case-insensitive comparison folds each character through its full Unicode
/// upper- and lowercase mappings, so non-ASCII letters compare equal as well
/// (`"ÄÖÜ"` vs `"äöü"`, `"Σ"` vs `"ς"`). The consumed
/// length is measured on the input side, which may differ in bytes from the
/// literal.
#[derive(Debug, Clone)]
pub struct Literal {
    text: String,
    case: CaseRule,
}

impl Literal {
    pub fn new(text: impl Into<String>, case: CaseRule) -> Self {
        Self {
            text: text.into(),
            case,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn match_folded(&self, input: &str) -> Option<usize> {
        let mut consumed = 0;
        let mut remaining = input.chars();
        for expected in self.text.chars() {
            let actual = remaining.next()?;
            if actual != expected && !fold(actual).eq(fold(expected)) {
                return None;
            }
            consumed += actual.len_utf8();
        }
        Some(consumed)
    }
}

fn fold(ch: char) -> impl Iterator<Item = char> {
    ch.to_uppercase().flat_map(char::to_lowercase)
}

impl PrefixMatcher for Literal {
    fn match_prefix(&self, input: &str) -> MatchOutcome {
        match self.case {
            CaseRule::Sensitive if input.starts_with(self.text.as_str()) => {
                MatchOutcome::Matched(self.text.len())
            }
            CaseRule::Sensitive => MatchOutcome::NoMatch,
            CaseRule::Insensitive => self.match_folded(input).into(),
        }
    }

    fn description(&self) -> String {
        match self.case {
            CaseRule::Sensitive => format!("^{:?}", self.text),
            CaseRule::Insensitive => format!("~^{:?}", self.text),
        }
    }
}

pub fn literal(text: impl Into<String>) -> Matcher {
    Matcher::new(Literal::new(text, CaseRule::Sensitive))
}

pub fn literal_ci(text: impl Into<String>) -> Matcher {
    Matcher::new(Literal::new(text, CaseRule::Insensitive))
}

//! Regular-expression matchers.

use regex::{Regex, RegexBuilder};

use crate::error::MatcherError;

use super::{CaseRule, MatchOutcome, Matcher, PrefixMatcher};

/// Matches a regular expression anchored at the start of the input.
///
/// The pattern is compiled once, wrapped as `^(?:pattern)`, and evaluated
/// against the remaining slice only. Greedy repetitions consume as much as
/// they can.
///
/// This is not longest-match. Alternations follow the regex crate's
/// leftmost-first preference, so `a|ab` consumes only `a` of `"ab"`. Put the
/// longer alternative first (`ab|a`) when it should win.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    case: CaseRule,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: impl Into<String>, case: CaseRule) -> Result<Self, MatcherError> {
        let source = source.into();
        let regex = RegexBuilder::new(&format!("^(?:{source})"))
            .case_insensitive(case == CaseRule::Insensitive)
            .build()
            .map_err(|err| MatcherError::InvalidPattern {
                pattern: source.clone(),
                source: err,
            })?;
        Ok(Self {
            source,
            case,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl PrefixMatcher for Pattern {
    fn match_prefix(&self, input: &str) -> MatchOutcome {
        self.regex.find(input).map(|found| found.end()).into()
    }

    fn description(&self) -> String {
        match self.case {
            CaseRule::Sensitive => format!("/{:?}", self.source),
            CaseRule::Insensitive => format!("~/{:?}", self.source),
        }
    }
}

pub fn pattern(source: impl Into<String>) -> Result<Matcher, MatcherError> {
    Ok(Matcher::new(Pattern::new(source, CaseRule::Sensitive)?))
}

pub fn pattern_ci(source: impl Into<String>) -> Result<Matcher, MatcherError> {
    Ok(Matcher::new(Pattern::new(source, CaseRule::Insensitive)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_match() {
        let m = pattern("[a-z]+[0-9]*").unwrap();
        assert_eq!(m.match_prefix("abc12 rest"), MatchOutcome::Matched(5));
        assert_eq!(m.match_prefix(" abc"), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_alternation_is_anchored_as_a_whole() {
        // without the group, `b` would be free to match anywhere
        let m = pattern("a|b").unwrap();
        assert_eq!(m.match_prefix("xb"), MatchOutcome::NoMatch);
        assert_eq!(m.match_prefix("bx"), MatchOutcome::Matched(1));
    }

    #[test]
    fn test_alternation_prefers_first_branch() {
        assert_eq!(pattern("a|ab").unwrap().match_prefix("ab"), MatchOutcome::Matched(1));
        assert_eq!(pattern("ab|a").unwrap().match_prefix("ab"), MatchOutcome::Matched(2));
    }

    #[test]
    fn test_zero_width_pattern_matches() {
        let m = pattern("x*").unwrap();
        assert_eq!(m.match_prefix("yyy"), MatchOutcome::Matched(0));
    }

    #[test]
    fn test_case_insensitive() {
        let m = pattern_ci("def|extern").unwrap();
        assert_eq!(m.match_prefix("EXTERN sin"), MatchOutcome::Matched(6));
        assert_eq!(m.match_prefix("Ünknown"), MatchOutcome::NoMatch);
        let m = pattern_ci("über").unwrap();
        assert_eq!(m.match_prefix("ÜBER"), MatchOutcome::Matched("ÜBER".len()));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = pattern("(unclosed").unwrap_err();
        assert!(matches!(err, MatcherError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(pattern("[0-9]+").unwrap().description(), r#"/"[0-9]+""#);
        assert_eq!(pattern_ci("def").unwrap().description(), r#"~/"def""#);
    }
}

//! Primitive prefix matchers.
//!
//! A [`PrefixMatcher`] looks at the start of the remaining input and reports
//! how many bytes it consumes. Matchers never search ahead: a match always
//! begins at position 0 of the slice they are given.
//!
//! - [`literal`] - exact text, optionally case-insensitive
//! - [`pattern`] - anchored regular expressions
//! - [`class`] - character classes with single and maximal-run matching
//!
//! [`Optional`] and [`Repeated`] wrap any other matcher, and [`EndOfInput`] is
//! the zero-width anchor used by the driver.

pub mod class;
pub mod literal;
pub mod pattern;

use std::fmt;
use std::rc::Rc;

use crate::input::Input;

pub use class::{CharClass, ClassMatcher, NamedClass, class, not_class};
pub use literal::{CaseRule, Literal, literal, literal_ci};
pub use pattern::{Pattern, pattern, pattern_ci};

/// Result of running a matcher against the start of some input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The first `n` bytes were consumed. `Matched(0)` is a successful
    /// zero-width match and is distinct from [`MatchOutcome::NoMatch`].
    Matched(usize),
    NoMatch,
}

impl MatchOutcome {
    pub fn len(self) -> Option<usize> {
        match self {
            MatchOutcome::Matched(len) => Some(len),
            MatchOutcome::NoMatch => None,
        }
    }

    pub fn is_match(self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }
}

impl From<Option<usize>> for MatchOutcome {
    fn from(len: Option<usize>) -> Self {
        len.map_or(MatchOutcome::NoMatch, MatchOutcome::Matched)
    }
}

pub trait PrefixMatcher {
    /// Match one occurrence at the start of `input`.
    fn match_prefix(&self, input: &str) -> MatchOutcome;

    /// Match the maximal run of occurrences, if this matcher can do so
    /// natively. `None` means [`Repeated`] has to loop over
    /// [`PrefixMatcher::match_prefix`] instead.
    fn match_many_prefix(&self, _input: &str) -> Option<MatchOutcome> {
        None
    }

    /// Human-readable form used verbatim in diagnostics.
    fn description(&self) -> String;
}

/// Shared, immutable handle to a prefix matcher.
///
/// Cloning is cheap, so the same matcher can appear in many parsers and in
/// their diagnostic sets.
#[derive(Clone)]
pub struct Matcher {
    inner: Rc<dyn PrefixMatcher>,
}

impl Matcher {
    pub fn new<M: PrefixMatcher + 'static>(matcher: M) -> Self {
        Matcher {
            inner: Rc::new(matcher),
        }
    }

    /// Run the matcher against a cursor, splitting off the consumed text.
    pub fn match_input<'src>(&self, input: Input<'src>) -> Option<(&'src str, Input<'src>)> {
        self.inner
            .match_prefix(input.rest())
            .len()
            .map(|len| input.split_at(len))
    }

    /// Zero-or-one occurrence. Always matches.
    pub fn optional(self) -> Matcher {
        Matcher::new(Optional { inner: self })
    }

    /// One-or-more occurrences.
    pub fn repeated(self) -> Matcher {
        Matcher::new(Repeated { inner: self })
    }

    /// Zero-or-more occurrences, i.e. `Optional(Repeated(..))`.
    pub fn zero_or_more(self) -> Matcher {
        self.repeated().optional()
    }
}

impl PrefixMatcher for Matcher {
    fn match_prefix(&self, input: &str) -> MatchOutcome {
        self.inner.match_prefix(input)
    }

    fn match_many_prefix(&self, input: &str) -> Option<MatchOutcome> {
        self.inner.match_many_prefix(input)
    }

    fn description(&self) -> String {
        self.inner.description()
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher({})", self.inner.description())
    }
}

pub struct Optional {
    inner: Matcher,
}

impl PrefixMatcher for Optional {
    fn match_prefix(&self, input: &str) -> MatchOutcome {
        match self.inner.match_prefix(input) {
            MatchOutcome::NoMatch => MatchOutcome::Matched(0),
            matched => matched,
        }
    }

    fn description(&self) -> String {
        format!("{}?", self.inner.description())
    }
}

pub struct Repeated {
    inner: Matcher,
}

impl PrefixMatcher for Repeated {
    fn match_prefix(&self, input: &str) -> MatchOutcome {
        if let Some(outcome) = self.inner.match_many_prefix(input) {
            return outcome;
        }

        let mut end = 0;
        let mut matched_once = false;
        while let MatchOutcome::Matched(len) = self.inner.match_prefix(&input[end..]) {
            matched_once = true;
            // a zero-width repetition would never advance
            if len == 0 {
                break;
            }
            end += len;
        }

        if matched_once {
            MatchOutcome::Matched(end)
        } else {
            MatchOutcome::NoMatch
        }
    }

    fn match_many_prefix(&self, input: &str) -> Option<MatchOutcome> {
        Some(self.match_prefix(input))
    }

    fn description(&self) -> String {
        format!("{}+", self.inner.description())
    }
}

/// Zero-width anchor that only matches once no input remains.
pub struct EndOfInput;

impl PrefixMatcher for EndOfInput {
    fn match_prefix(&self, input: &str) -> MatchOutcome {
        if input.is_empty() {
            MatchOutcome::Matched(0)
        } else {
            MatchOutcome::NoMatch
        }
    }

    fn description(&self) -> String {
        "$".to_string()
    }
}

pub fn end_of_input() -> Matcher {
    Matcher::new(EndOfInput)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single-occurrence matcher without a native many-mode.
    struct Ab;

    impl PrefixMatcher for Ab {
        fn match_prefix(&self, input: &str) -> MatchOutcome {
            if input.starts_with("ab") {
                MatchOutcome::Matched(2)
            } else {
                MatchOutcome::NoMatch
            }
        }

        fn description(&self) -> String {
            "ab".to_string()
        }
    }

    #[test]
    fn test_optional_matches_empty() {
        let m = Matcher::new(Ab).optional();
        assert_eq!(m.match_prefix("xyz"), MatchOutcome::Matched(0));
        assert_eq!(m.match_prefix("abx"), MatchOutcome::Matched(2));
        assert_eq!(m.description(), "ab?");
    }

    #[test]
    fn test_repeated_falls_back_to_loop() {
        let m = Matcher::new(Ab).repeated();
        assert_eq!(m.match_prefix("ababax"), MatchOutcome::Matched(4));
        assert_eq!(m.match_prefix("xab"), MatchOutcome::NoMatch);
        assert_eq!(m.description(), "ab+");
    }

    #[test]
    fn test_repeated_optional_terminates() {
        let m = Matcher::new(Ab).optional().repeated();
        assert_eq!(m.match_prefix("abab"), MatchOutcome::Matched(4));
        assert_eq!(m.match_prefix("zz"), MatchOutcome::Matched(0));
    }

    #[test]
    fn test_zero_or_more() {
        let m = Matcher::new(Ab).zero_or_more();
        assert_eq!(m.match_prefix(""), MatchOutcome::Matched(0));
        assert_eq!(m.match_prefix("ababab"), MatchOutcome::Matched(6));
        assert_eq!(m.description(), "ab+?");
    }

    #[test]
    fn test_end_of_input() {
        let m = end_of_input();
        assert_eq!(m.match_prefix(""), MatchOutcome::Matched(0));
        assert_eq!(m.match_prefix(" "), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_match_input_splits_cursor() {
        let source = "ababc";
        let (matched, rest) = Matcher::new(Ab)
            .repeated()
            .match_input(Input::new(source))
            .expect("should match");
        assert_eq!(matched, "abab");
        assert_eq!(rest.rest(), "c");
        assert_eq!(rest.offset(), 4);
    }
}

//! Character classes.
//!
//! A [`CharClass`] is a set of characters built from explicit characters,
//! inclusive ranges and named Unicode categories, optionally complemented.
//! [`ClassMatcher`] consumes one member in single mode and the maximal run of
//! members in many mode, which lets [`super::Repeated`] avoid re-scanning.

use std::fmt::Write;

use super::{MatchOutcome, Matcher, PrefixMatcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedClass {
    /// Any character with the Unicode `White_Space` property.
    Whitespace,
    /// `\n` and `\r`.
    Newline,
    /// ASCII digits `0-9`.
    Digit,
    Alphabetic,
    Alphanumeric,
    Lowercase,
    Uppercase,
    /// ASCII punctuation.
    Punctuation,
    Any,
}

impl NamedClass {
    fn contains(self, ch: char) -> bool {
        match self {
            NamedClass::Whitespace => ch.is_whitespace(),
            NamedClass::Newline => ch == '\n' || ch == '\r',
            NamedClass::Digit => ch.is_ascii_digit(),
            NamedClass::Alphabetic => ch.is_alphabetic(),
            NamedClass::Alphanumeric => ch.is_alphanumeric(),
            NamedClass::Lowercase => ch.is_lowercase(),
            NamedClass::Uppercase => ch.is_uppercase(),
            NamedClass::Punctuation => ch.is_ascii_punctuation(),
            NamedClass::Any => true,
        }
    }

    fn name(self) -> &'static str {
        match self {
            NamedClass::Whitespace => "whitespace",
            NamedClass::Newline => "newline",
            NamedClass::Digit => "digit",
            NamedClass::Alphabetic => "alphabetic",
            NamedClass::Alphanumeric => "alphanumeric",
            NamedClass::Lowercase => "lowercase",
            NamedClass::Uppercase => "uppercase",
            NamedClass::Punctuation => "punctuation",
            NamedClass::Any => "any",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassItem {
    Char(char),
    Range(char, char),
    Named(NamedClass),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharClass {
    items: Vec<ClassItem>,
    negated: bool,
}

impl CharClass {
    /// The empty class. Matches nothing until items are added.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chars(chars: &str) -> Self {
        Self::new().with_chars(chars)
    }

    pub fn range(first: char, last: char) -> Self {
        Self::new().with_range(first, last)
    }

    pub fn named(class: NamedClass) -> Self {
        Self::new().with_named(class)
    }

    pub fn digits() -> Self {
        Self::range('0', '9')
    }

    pub fn whitespace() -> Self {
        Self::named(NamedClass::Whitespace)
    }

    pub fn with_chars(mut self, chars: &str) -> Self {
        self.items.extend(chars.chars().map(ClassItem::Char));
        self
    }

    pub fn with_range(mut self, first: char, last: char) -> Self {
        self.items.push(ClassItem::Range(first, last));
        self
    }

    pub fn with_named(mut self, class: NamedClass) -> Self {
        self.items.push(ClassItem::Named(class));
        self
    }

    /// The complement of this class.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn contains(&self, ch: char) -> bool {
        let listed = self.items.iter().any(|item| match *item {
            ClassItem::Char(c) => c == ch,
            ClassItem::Range(first, last) => (first..=last).contains(&ch),
            ClassItem::Named(class) => class.contains(ch),
        });
        listed != self.negated
    }

    pub fn description(&self) -> String {
        let mut out = String::from("[");
        if self.negated {
            out.push('^');
        }
        for item in &self.items {
            match *item {
                ClassItem::Char(c) => push_escaped(&mut out, c),
                ClassItem::Range(first, last) => {
                    push_escaped(&mut out, first);
                    out.push('-');
                    push_escaped(&mut out, last);
                }
                ClassItem::Named(class) => {
                    let _ = write!(out, ":{}:", class.name());
                }
            }
        }
        out.push(']');
        out
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' | ']' | '-' | '^' => {
            out.push('\\');
            out.push(ch);
        }
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ if ch.is_control() => out.extend(ch.escape_unicode()),
        _ => out.push(ch),
    }
}

/// Prefix matcher over a [`CharClass`].
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    class: CharClass,
}

impl ClassMatcher {
    pub fn new(class: CharClass) -> Self {
        Self { class }
    }

    pub fn class(&self) -> &CharClass {
        &self.class
    }
}

impl PrefixMatcher for ClassMatcher {
    fn match_prefix(&self, input: &str) -> MatchOutcome {
        match input.chars().next() {
            Some(ch) if self.class.contains(ch) => MatchOutcome::Matched(ch.len_utf8()),
            _ => MatchOutcome::NoMatch,
        }
    }

    fn match_many_prefix(&self, input: &str) -> Option<MatchOutcome> {
        let end = input
            .char_indices()
            .find(|&(_, ch)| !self.class.contains(ch))
            .map_or(input.len(), |(index, _)| index);
        Some(if end == 0 {
            MatchOutcome::NoMatch
        } else {
            MatchOutcome::Matched(end)
        })
    }

    fn description(&self) -> String {
        self.class.description()
    }
}

pub fn class(class: CharClass) -> Matcher {
    Matcher::new(ClassMatcher::new(class))
}

/// Matcher for every character outside `class`.
pub fn not_class(class: CharClass) -> Matcher {
    Matcher::new(ClassMatcher::new(class.negate()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("7", true)]
    #[case("0", true)]
    #[case("a", false)]
    #[case("٣", false)]
    fn test_digit_membership(#[case] input: &str, #[case] member: bool) {
        let ch = input.chars().next().unwrap();
        assert_eq!(CharClass::digits().contains(ch), member);
    }

    #[test]
    fn test_single_mode_consumes_one_char() {
        let m = class(CharClass::named(NamedClass::Alphabetic));
        assert_eq!(m.match_prefix("éa"), MatchOutcome::Matched(2));
        assert_eq!(m.match_prefix("1"), MatchOutcome::NoMatch);
        assert_eq!(m.match_prefix(""), MatchOutcome::NoMatch);
    }

    #[test]
    fn test_many_mode_is_maximal() {
        let m = class(CharClass::digits());
        assert_eq!(m.match_many_prefix("123abc"), Some(MatchOutcome::Matched(3)));
        assert_eq!(m.match_many_prefix("123"), Some(MatchOutcome::Matched(3)));
        assert_eq!(m.match_many_prefix("abc"), Some(MatchOutcome::NoMatch));
    }

    #[test]
    fn test_repeated_uses_many_mode() {
        let m = class(CharClass::digits()).repeated();
        assert_eq!(m.match_prefix("2024-10"), MatchOutcome::Matched(4));
        assert_eq!(m.description(), "[0-9]+");
    }

    #[test]
    fn test_negation() {
        let m = not_class(CharClass::chars("\"\\"));
        assert_eq!(m.match_prefix("a\""), MatchOutcome::Matched(1));
        assert_eq!(m.match_prefix("\"a"), MatchOutcome::NoMatch);
        assert_eq!(m.description(), r#"[^"\\]"#);
        assert!(CharClass::digits().negate().negate().contains('5'));
    }

    #[test]
    fn test_descriptions() {
        let class = CharClass::range('a', 'z').with_chars("_-").with_named(NamedClass::Digit);
        assert_eq!(class.description(), r"[a-z_\-:digit:]");
        assert_eq!(CharClass::whitespace().description(), "[:whitespace:]");
        assert_eq!(CharClass::chars("\n").description(), r"[\n]");
    }
}

use std::rc::{Rc, Weak};

use once_cell::unsync::OnceCell;

use crate::matcher::Matcher;

use super::expected::Expected;
use super::{ParseResult, Parser};

// === Combinators as methods ===

impl<T: 'static> Parser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn then<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        let expected = self.expected().clone();
        Parser::new(expected, move |input, ctx| match self.parse(input, ctx) {
            ParseResult::Parsed(a, rest) => other.parse(rest, ctx).map(|b| (a, b)),
            ParseResult::Failed(at) => ParseResult::Failed(at),
        })
    }

    /// Sequence with the ambient whitespace skipped between self and other
    pub fn then_ws<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        self.then(other.skipping_whitespace())
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        self.then(other).map(|(a, _)| a)
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: Parser<U>) -> Parser<U> {
        self.then(other).map(|(_, b)| b)
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> Parser<U> {
        let expected = self.expected().clone();
        Parser::new(expected, move |input, ctx| self.parse(input, ctx).map(&f))
    }

    /// Replace the result with a fixed value
    pub fn to<U: Clone + 'static>(self, value: U) -> Parser<U> {
        self.map(move |_| value.clone())
    }

    /// Choice: try self, if it fails try other from the same position
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        let expected = self.expected().union(other.expected());
        Parser::new(expected, move |input, ctx| match self.parse(input, ctx) {
            ParseResult::Failed(_) => other.parse(input, ctx),
            parsed => parsed,
        })
    }

    /// Optional: parse zero or one, never fails
    pub fn optional(self) -> Parser<Option<T>> {
        let expected = self.expected().clone();
        Parser::new(expected, move |input, ctx| match self.parse(input, ctx) {
            ParseResult::Parsed(value, rest) => ParseResult::Parsed(Some(value), rest),
            ParseResult::Failed(_) => ParseResult::Parsed(None, input),
        })
    }

    /// Parse zero or more occurrences
    pub fn zero_or_more(self) -> Parser<Vec<T>> {
        repeat(self, 0, false)
    }

    /// Parse one or more occurrences
    pub fn one_or_more(self) -> Parser<Vec<T>> {
        repeat(self, 1, false)
    }

    /// Zero or more, skipping whitespace between occurrences
    pub fn zero_or_more_ws(self) -> Parser<Vec<T>> {
        repeat(self, 0, true)
    }

    /// One or more, skipping whitespace between occurrences
    pub fn one_or_more_ws(self) -> Parser<Vec<T>> {
        repeat(self, 1, true)
    }

    /// Add a label to this parser for better error messages
    ///
    /// Failures at the label's own starting point are reported as the label;
    /// failures deeper inside are kept as they are.
    pub fn label(self, name: &str) -> Parser<T> {
        let expected = Expected::label(name).relabel(self.expected());
        Parser::new(expected, move |input, ctx| {
            let saved = ctx.take_furthest();
            let result = self.parse(input, ctx);
            let inner = ctx
                .take_furthest()
                .filter(|failure| result.is_parsed() || failure.at.offset() > input.offset());
            ctx.restore_furthest(saved, inner);
            result
        })
    }

    // === Whitespace ===

    /// Skip the ambient whitespace before parsing
    pub fn skipping_whitespace(self) -> Parser<T> {
        let expected = self.expected().clone().with_whitespace_skip();
        Parser::new(expected, move |input, ctx| {
            let start = ctx.skip_whitespace(input);
            let result = self.parse(start, ctx);
            if let ParseResult::Failed(at) = &result {
                if at.offset() == start.offset() {
                    ctx.record_failure_after_whitespace(start, self.expected());
                }
            }
            result
        })
    }

    /// Skip the ambient whitespace after a successful parse
    pub fn skipping_trailing_whitespace(self) -> Parser<T> {
        let expected = self.expected().clone();
        Parser::new(expected, move |input, ctx| match self.parse(input, ctx) {
            ParseResult::Parsed(value, rest) => {
                let rest = ctx.skip_whitespace(rest);
                ParseResult::Parsed(value, rest)
            }
            failed => failed,
        })
    }

    /// Parse with `whitespace` as the ambient policy; the caller's policy is
    /// back in place when this returns, whatever the outcome
    pub fn with_whitespace(self, whitespace: Parser<()>) -> Parser<T> {
        scoped_whitespace(self, Some(whitespace))
    }

    /// Parse with whitespace skipping disabled, e.g. inside string literals
    pub fn without_whitespace(self) -> Parser<T> {
        scoped_whitespace(self, None)
    }
}

fn scoped_whitespace<T: 'static>(parser: Parser<T>, whitespace: Option<Parser<()>>) -> Parser<T> {
    let expected = parser.expected().clone();
    Parser::new(expected, move |input, ctx| {
        log::trace!(
            "whitespace override at offset {}: {:?}",
            input.offset(),
            whitespace.as_ref().map(|ws| ws.expected().descriptions())
        );
        let mut scope = ctx.scope_whitespace(whitespace.clone());
        parser.parse(input, &mut scope)
    })
}

fn repeat<T: 'static>(parser: Parser<T>, min: usize, skip_whitespace: bool) -> Parser<Vec<T>> {
    let expected = parser.expected().clone();
    Parser::new(expected, move |input, ctx| {
        let mut results = Vec::new();
        let mut rest = input;
        loop {
            let start = if skip_whitespace && !results.is_empty() {
                ctx.skip_whitespace(rest)
            } else {
                rest
            };
            match parser.parse(start, ctx) {
                ParseResult::Parsed(item, next) => {
                    results.push(item);
                    let advanced = next.offset() > rest.offset();
                    rest = next;
                    // an occurrence that consumed nothing would repeat forever
                    if !advanced {
                        break;
                    }
                }
                ParseResult::Failed(at) if results.len() < min => {
                    return ParseResult::Failed(at);
                }
                ParseResult::Failed(_) => break,
            }
        }
        ParseResult::Parsed(results, rest)
    })
}

// === Free functions ===

pub fn sequence<A: 'static, B: 'static>(first: Parser<A>, second: Parser<B>) -> Parser<(A, B)> {
    first.then(second)
}

pub fn either<T: 'static>(first: Parser<T>, second: Parser<T>) -> Parser<T> {
    first.or(second)
}

pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    parser.optional()
}

pub fn zero_or_more<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    parser.zero_or_more()
}

pub fn one_or_more<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    parser.one_or_more()
}

/// Ordered choice over any number of alternatives
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    let expected = parsers
        .iter()
        .fold(Expected::none(), |acc, parser| acc.union(parser.expected()));
    Parser::new(expected, move |input, ctx| {
        let mut last = ParseResult::Failed(input);
        for parser in &parsers {
            last = parser.parse(input, ctx);
            if last.is_parsed() {
                break;
            }
        }
        last
    })
}

/// First matcher in `matchers` that matches, returned as-is
pub fn one_of(matchers: Vec<Matcher>) -> Parser<Matcher> {
    let expected = matchers
        .iter()
        .fold(Expected::none(), |acc, matcher| acc.union(&Expected::matcher(matcher)));
    Parser::new(expected, move |input, _ctx| {
        for matcher in &matchers {
            if let Some((_, rest)) = matcher.match_input(input) {
                return ParseResult::Parsed(matcher.clone(), rest);
            }
        }
        ParseResult::Failed(input)
    })
}

/// Parser that consumes nothing and always produces `value`
pub fn succeed<T: Clone + 'static>(value: T) -> Parser<T> {
    Parser::new(Expected::none(), move |input, _ctx| {
        ParseResult::Parsed(value.clone(), input)
    })
}

// === Recursion ===

/// Build a self-referential parser.
///
/// `define` receives a placeholder that stands for the parser being defined
/// and may be used anywhere inside it. The placeholder only reaches the real
/// parser while parsing, through a weak reference, so the finished grammar
/// holds no reference cycle.
///
/// # Panics
///
/// Running the placeholder after the returned parser has been dropped, or
/// from within `define` itself, panics.
///
/// ```ignore
/// let nested = recursive(|nested| {
///     literal("(").ignore()
///         .skip_left(nested.optional())
///         .skip(literal(")").ignore())
///         .map(|inner| inner.map_or(1, |depth| depth + 1))
/// });
/// ```
pub fn recursive<T: 'static>(define: impl FnOnce(Parser<T>) -> Parser<T>) -> Parser<T> {
    let cell: Rc<OnceCell<Parser<T>>> = Rc::new(OnceCell::new());
    let weak: Weak<OnceCell<Parser<T>>> = Rc::downgrade(&cell);

    // The placeholder cannot know its expected set before `define` ran.
    let placeholder = Parser::new(Expected::none(), move |input, ctx| {
        let cell = weak
            .upgrade()
            .unwrap_or_else(|| panic!("recursive parser used after it was dropped"));
        let parser = cell
            .get()
            .unwrap_or_else(|| panic!("recursive parser used before it was defined"));
        parser.parse(input, ctx)
    });

    let defined = define(placeholder);
    let expected = defined.expected().clone();
    if cell.set(defined).is_err() {
        unreachable!("recursive parser cell is only filled once");
    }

    Parser::new(expected, move |input, ctx| match cell.get() {
        Some(parser) => parser.parse(input, ctx),
        None => unreachable!("recursive parser cell is filled on construction"),
    })
}

//! Typed parsers built from prefix matchers.
//!
//! A [`Parser<T>`] consumes a prefix of an [`Input`] and produces a `T`.
//! Parsers are cheap reference-counted handles, so composing them never
//! copies a grammar, and a grammar built once can be run any number of times.
//!
//! - `state`: the [`ParseContext`] threaded through every call
//! - `expected`: the static [`Expected`] sets used for diagnostics
//! - `combinators`: sequencing, choice, repetition, whitespace scoping

mod combinators;
mod expected;
mod state;

use std::rc::Rc;

use crate::input::Input;
use crate::matcher::Matcher;

pub use combinators::*;
pub use expected::{Expectation, Expected};
pub use state::{Failure, ParseContext};

/// Outcome of running a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult<'src, T> {
    /// A value and the input left after it.
    Parsed(T, Input<'src>),
    /// The input at the point matching stopped.
    Failed(Input<'src>),
}

impl<'src, T> ParseResult<'src, T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<'src, U> {
        match self {
            ParseResult::Parsed(value, rest) => ParseResult::Parsed(f(value), rest),
            ParseResult::Failed(at) => ParseResult::Failed(at),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseResult::Parsed(..))
    }

    pub fn rest(&self) -> Option<Input<'src>> {
        match self {
            ParseResult::Parsed(_, rest) => Some(*rest),
            ParseResult::Failed(_) => None,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            ParseResult::Parsed(value, _) => Some(value),
            ParseResult::Failed(_) => None,
        }
    }
}

type ParseFn<T> = Rc<dyn for<'src> Fn(Input<'src>, &mut ParseContext<'src>) -> ParseResult<'src, T>>;

pub struct Parser<T> {
    parse_fn: ParseFn<T>,
    expected: Expected,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            parse_fn: Rc::clone(&self.parse_fn),
            expected: self.expected.clone(),
        }
    }
}

impl<T: 'static> Parser<T> {
    pub fn new<F>(expected: Expected, parse_fn: F) -> Self
    where
        F: for<'src> Fn(Input<'src>, &mut ParseContext<'src>) -> ParseResult<'src, T> + 'static,
    {
        Parser {
            parse_fn: Rc::new(parse_fn),
            expected,
        }
    }

    /// Run the parser at `input`.
    ///
    /// A failure at the parser's own entry point is recorded in `ctx` with
    /// this parser's expected set.
    pub fn parse<'src>(
        &self,
        input: Input<'src>,
        ctx: &mut ParseContext<'src>,
    ) -> ParseResult<'src, T> {
        let result = (self.parse_fn)(input, ctx);
        if let ParseResult::Failed(at) = &result {
            if at.offset() == input.offset() {
                ctx.record_failure(input, &self.expected);
            }
        }
        result
    }

    pub fn expected(&self) -> &Expected {
        &self.expected
    }
}

// === Primitive lifts ===

impl Matcher {
    /// Parser producing the matched text.
    pub fn parser(&self) -> Parser<String> {
        self.map(str::to_string)
    }

    /// Parser producing `f` applied to the matched text.
    pub fn map<T: 'static, F: Fn(&str) -> T + 'static>(&self, f: F) -> Parser<T> {
        let matcher = self.clone();
        Parser::new(Expected::matcher(self), move |input, _ctx| {
            match matcher.match_input(input) {
                Some((text, rest)) => ParseResult::Parsed(f(text), rest),
                None => ParseResult::Failed(input),
            }
        })
    }

    /// Parser producing a fixed value whenever the matcher matches.
    pub fn to<T: Clone + 'static>(&self, value: T) -> Parser<T> {
        self.map(move |_| value.clone())
    }

    pub fn ignore(&self) -> Parser<()> {
        self.map(|_| ())
    }
}

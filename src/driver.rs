//! Entry points that run a parser over a complete source text.
//!
//! [`Parser::parse_to_end`] anchors the grammar at end-of-input, allowing
//! ambient whitespace on both sides, and turns a failure into a located
//! [`ParseError`]. Failure positions are always views into the caller's
//! buffer; anything else is a bug in a matcher or combinator and aborts with
//! a panic instead of producing an error.

use std::time::Instant;

use crate::error::ParseError;
use crate::input::Input;
use crate::matcher::end_of_input;
use crate::parser::{Expectation, ParseContext, ParseResult, Parser};

const DEFAULT_SNIPPET_CHARS: usize = 40;

/// Settings for a single parse.
#[derive(Clone)]
pub struct ParseConfig {
    whitespace: Option<Parser<()>>,
    snippet_chars: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            whitespace: None,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The whitespace policy in effect at the top level.
    pub fn whitespace(mut self, whitespace: Parser<()>) -> Self {
        self.whitespace = Some(whitespace);
        self
    }

    /// Maximum number of characters of remaining input kept in a
    /// [`ParseError`].
    pub fn snippet_chars(mut self, chars: usize) -> Self {
        self.snippet_chars = chars;
        self
    }
}

impl<T: 'static> Parser<T> {
    /// Parse all of `source`, failing if any input is left over.
    pub fn parse_to_end(&self, source: &str) -> Result<T, ParseError> {
        self.parse_to_end_with(source, &ParseConfig::default())
    }

    /// Like [`Parser::parse_to_end`], starting from `config`.
    ///
    /// Whitespace accepted by the configured policy is skipped before the
    /// grammar and again before the end-of-input anchor.
    pub fn parse_to_end_with(&self, source: &str, config: &ParseConfig) -> Result<T, ParseError> {
        let anchored = self
            .clone()
            .skipping_whitespace()
            .skip(end_of_input().ignore().skipping_whitespace());
        anchored.run(source, config).map(|(value, _)| value)
    }

    /// Parse a prefix of `source`, returning the value and the unparsed rest.
    ///
    /// Nothing is skipped around the grammar, leading whitespace included.
    pub fn parse_partial<'src>(&self, source: &'src str) -> Result<(T, &'src str), ParseError> {
        self.parse_partial_with(source, &ParseConfig::default())
    }

    pub fn parse_partial_with<'src>(
        &self,
        source: &'src str,
        config: &ParseConfig,
    ) -> Result<(T, &'src str), ParseError> {
        self.run(source, config)
    }

    fn run<'src>(
        &self,
        source: &'src str,
        config: &ParseConfig,
    ) -> Result<(T, &'src str), ParseError> {
        let started = Instant::now();
        let mut ctx = ParseContext::with_whitespace(config.whitespace.clone());
        let result = self.parse(Input::new(source), &mut ctx);
        log::debug!("parsed {} bytes in {:?}", source.len(), started.elapsed());

        match result {
            ParseResult::Parsed(value, rest) => {
                assert!(
                    rest.is_view_of(source),
                    "parser returned input that is not part of the source"
                );
                Ok((value, rest.rest()))
            }
            ParseResult::Failed(at) => {
                let error = locate_failure(source, at, &ctx, config.snippet_chars);
                log::debug!("parse failed at line {}, column {}", error.line, error.column);
                Err(error)
            }
        }
    }
}

fn locate_failure(
    source: &str,
    at: Input<'_>,
    ctx: &ParseContext<'_>,
    snippet_chars: usize,
) -> ParseError {
    assert!(
        at.is_view_of(source),
        "failure position does not point into the parsed source"
    );

    let (remainder, expected, expected_whitespace) = match ctx.furthest() {
        Some(furthest) if furthest.at.offset() >= at.offset() => (
            furthest.at,
            describe(&furthest.expected),
            describe(&furthest.whitespace),
        ),
        _ => (at, Vec::new(), Vec::new()),
    };
    assert!(
        remainder.is_view_of(source),
        "furthest failure does not point into the parsed source"
    );

    let offset = remainder.offset();
    let (line, column) = line_column(source, offset);
    ParseError {
        line,
        column,
        offset,
        expected,
        expected_whitespace,
        remaining: remainder.rest().chars().take(snippet_chars).collect(),
    }
}

fn describe(expectations: &[Expectation]) -> Vec<String> {
    expectations.iter().map(Expectation::description).collect()
}

/// 1-based line and 0-based character column of byte `offset` in `source`.
///
/// # Panics
///
/// Panics if `offset` is past the end of `source` or not on a character
/// boundary.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 0;
    for (index, ch) in source.char_indices() {
        if index == offset {
            return (line, column);
        }
        if index > offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    if offset == source.len() {
        return (line, column);
    }
    panic!("offset {offset} does not start a character of the source");
}

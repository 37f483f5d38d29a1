//! # Error Definitions
//!
//! Two kinds of errors leave this crate:
//!
//! - [`MatcherError`] is returned while a grammar is being *built*, e.g. for a
//!   regular expression that does not compile.
//! - [`ParseError`] is returned by the driver when a parse fails. It carries
//!   the location of the furthest failure and the matchers that could have
//!   been accepted there.
//!
//! Failures inside the combinators are ordinary values
//! ([`crate::parser::ParseResult::Failed`]) and never surface as errors
//! until the driver gives up.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A located parse failure.
///
/// # Example Error Message
///
/// ```text
/// line 1, column 3: expected one of [0-9]+
/// remaining input: ""
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ParseError {
    /// 1-based line of the failure.
    pub line: usize,
    /// 0-based column, counted in characters from the start of the line.
    pub column: usize,
    /// Byte offset of the failure within the source.
    pub offset: usize,
    /// Descriptions of the prefix matchers that could have matched here.
    pub expected: Vec<String>,
    /// Descriptions of the whitespace matchers that were allowed before this
    /// point. Empty when no whitespace was permitted.
    pub expected_whitespace: Vec<String>,
    /// The start of the unparsed input, truncated to the configured length.
    pub remaining: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: ", self.line, self.column)?;
        if self.expected.is_empty() {
            f.write_str("unexpected input")?;
        } else {
            write!(f, "expected one of {}", self.expected.join(", "))?;
        }
        if !self.expected_whitespace.is_empty() {
            write!(
                f,
                " (whitespace allowed: {})",
                self.expected_whitespace.join(", ")
            )?;
        }
        write!(f, "\nremaining input: {:?}", self.remaining)
    }
}

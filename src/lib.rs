//! # Kaleid - Backtracking Parser Combinators
//!
//! Kaleid builds recursive-descent parsers out of small, composable pieces.
//! Grammars are ordinary Rust values: primitive prefix matchers are lifted
//! into typed parsers, which are then combined by sequencing, ordered choice,
//! repetition and mapping.
//!
//! ## Architecture Overview
//!
//! ```text
//! PrefixMatcher (literal, pattern, class, optional, repeated)
//!     ↓ lift (parser / map / to / ignore)
//! Parser<T> + Expected set
//!     ↓ combinators (then, or, choice, optional, zero_or_more, ...)
//! Grammar (a single Parser<Program>)
//!     ↓ parse_to_end
//! Result<Program, ParseError>
//! ```
//!
//! 1. **Matchers** (`matcher`) - stateless rules reporting how much of the
//!    start of the remaining input they consume
//! 2. **Parsers** (`parser`) - typed combinators over a shared [`Input`]
//!    cursor; failures are values and every choice backtracks completely
//! 3. **Whitespace scoping** - an ambient, overridable whitespace policy kept
//!    in the [`ParseContext`], restored after every override
//! 4. **Diagnostics** - each parser carries the [`Expected`] set of prefixes
//!    it can start with; the context remembers the furthest failure
//! 5. **Driver** (`driver`) - anchors a parser at end-of-input and reports
//!    failures with line and column
//!
//! ## Key Design Decisions
//!
//! ### Ordered Choice
//! `a.or(b)` is PEG-style: `b` is only tried when `a` fails, and it starts
//! from exactly the input `a` was given. There is no longest-match and no
//! ambiguity resolution beyond the first successful alternative.
//!
//! ### Furthest Failure
//! When a parse fails, the reported position is the deepest point any
//! attempted alternative reached, not the point the last alternative gave up
//! at. The expected prefixes listed are those of every parser that failed at
//! that point.
//!
//! ### Opt-in Whitespace
//! Plain sequencing never skips anything. Whitespace is only skipped where a
//! grammar asks for it (`then_ws`, `skipping_whitespace`, `zero_or_more_ws`),
//! using whatever policy is in effect at that point.
//!
//! ## Example
//!
//! ```ignore
//! use kaleid::{CharClass, class, literal, one_of};
//!
//! let number = class(CharClass::digits()).repeated().map(|text| text.parse::<i64>().unwrap());
//! let op = one_of(vec![literal("+"), literal("-")]);
//! let expr = number.clone().then(op.then(number).zero_or_more());
//!
//! let (first, rest) = expr.parse_to_end("12+3-4")?;
//! ```
//!
//! ## Module Structure
//!
//! - [`input`] - zero-copy cursor into the source
//! - [`matcher`] - prefix matchers and their wrappers
//! - [`parser`] - the parser type, combinators and parse context
//! - [`driver`] - running a parser over a whole source
//! - [`error`] - matcher construction and parse errors

pub mod driver;
pub mod error;
pub mod input;
pub mod matcher;
pub mod parser;

pub use driver::{ParseConfig, line_column};
pub use error::{MatcherError, ParseError};
pub use input::Input;
pub use matcher::{
    CaseRule, CharClass, MatchOutcome, Matcher, NamedClass, PrefixMatcher, class, end_of_input,
    literal, literal_ci, not_class, pattern, pattern_ci,
};
pub use parser::{
    Expectation, Expected, Failure, ParseContext, ParseResult, Parser, choice, either, one_of,
    one_or_more, optional, recursive, sequence, succeed, zero_or_more,
};

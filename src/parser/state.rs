use std::ops::{Deref, DerefMut};

use crate::input::Input;

use super::Parser;
use super::expected::{Expectation, Expected, merge};

/// The furthest point any attempted parser failed at, together with
/// everything that would have been accepted there.
#[derive(Debug, Clone)]
pub struct Failure<'src> {
    pub at: Input<'src>,
    pub expected: Vec<Expectation>,
    /// Whitespace matchers that were allowed immediately before `at`.
    pub whitespace: Vec<Expectation>,
}

/// Mutable state threaded through one parse.
///
/// Holds the ambient whitespace policy, which combinators override in a
/// save/replace/restore fashion, and the furthest recorded failure used for
/// diagnostics. Neither influences which alternative succeeds.
pub struct ParseContext<'src> {
    whitespace: Option<Parser<()>>,
    furthest: Option<Failure<'src>>,
    skipping: usize,
}

impl Default for ParseContext<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'src> ParseContext<'src> {
    pub fn new() -> Self {
        Self::with_whitespace(None)
    }

    pub fn with_whitespace(whitespace: Option<Parser<()>>) -> Self {
        Self {
            whitespace,
            furthest: None,
            skipping: 0,
        }
    }

    /// The whitespace policy currently in effect.
    pub fn whitespace(&self) -> Option<&Parser<()>> {
        self.whitespace.as_ref()
    }

    /// Install a new policy, handing back the previous one. Callers must put
    /// the previous policy back once their subtree is done.
    pub fn replace_whitespace(&mut self, whitespace: Option<Parser<()>>) -> Option<Parser<()>> {
        std::mem::replace(&mut self.whitespace, whitespace)
    }

    /// Install `whitespace` until the returned scope is dropped.
    ///
    /// The scope derefs to this context, so a subtree can be parsed through
    /// it. The previous policy is put back on drop, including while a panic
    /// unwinds through the subtree.
    pub(crate) fn scope_whitespace(
        &mut self,
        whitespace: Option<Parser<()>>,
    ) -> WhitespaceScope<'_, 'src> {
        let previous = self.replace_whitespace(whitespace);
        WhitespaceScope {
            ctx: self,
            previous,
        }
    }

    /// Consume whatever the ambient policy accepts at `input`.
    ///
    /// Failures inside the whitespace parser are not recorded as diagnostics.
    pub fn skip_whitespace(&mut self, input: Input<'src>) -> Input<'src> {
        let Some(whitespace) = self.whitespace.clone() else {
            return input;
        };
        self.skipping += 1;
        let result = whitespace.parse(input, self);
        self.skipping -= 1;
        result.rest().unwrap_or(input)
    }

    /// Note that a parser with the given expected set failed at `at`.
    pub fn record_failure(&mut self, at: Input<'src>, expected: &Expected) {
        self.record(at, expected.prefixes(), expected.skips_whitespace());
    }

    /// Like [`ParseContext::record_failure`], for a failure directly after a
    /// whitespace skip.
    pub(crate) fn record_failure_after_whitespace(&mut self, at: Input<'src>, expected: &Expected) {
        self.record(at, expected.prefixes(), true);
    }

    fn record(&mut self, at: Input<'src>, prefixes: &[Expectation], allows_whitespace: bool) {
        if self.skipping > 0 {
            return;
        }
        if self
            .furthest
            .as_ref()
            .is_some_and(|furthest| furthest.at.offset() > at.offset())
        {
            return;
        }
        let whitespace = match (&self.whitespace, allows_whitespace) {
            (Some(policy), true) => policy.expected().prefixes().to_vec(),
            _ => Vec::new(),
        };
        self.absorb(Failure {
            at,
            expected: prefixes.to_vec(),
            whitespace,
        });
    }

    fn absorb(&mut self, failure: Failure<'src>) {
        if let Some(furthest) = &mut self.furthest {
            if furthest.at.offset() > failure.at.offset() {
                return;
            }
            if furthest.at.offset() == failure.at.offset() {
                merge(&mut furthest.expected, &failure.expected);
                merge(&mut furthest.whitespace, &failure.whitespace);
                return;
            }
        }
        self.furthest = Some(failure);
    }

    pub fn furthest(&self) -> Option<&Failure<'src>> {
        self.furthest.as_ref()
    }

    pub(crate) fn take_furthest(&mut self) -> Option<Failure<'src>> {
        self.furthest.take()
    }

    /// Reinstate a previously taken failure, then fold `extra` back in.
    pub(crate) fn restore_furthest(
        &mut self,
        saved: Option<Failure<'src>>,
        extra: Option<Failure<'src>>,
    ) {
        self.furthest = saved;
        if let Some(extra) = extra {
            self.absorb(extra);
        }
    }
}

/// A whitespace override in effect; see [`ParseContext::scope_whitespace`].
pub(crate) struct WhitespaceScope<'ctx, 'src> {
    ctx: &'ctx mut ParseContext<'src>,
    previous: Option<Parser<()>>,
}

impl<'src> Deref for WhitespaceScope<'_, 'src> {
    type Target = ParseContext<'src>;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for WhitespaceScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for WhitespaceScope<'_, '_> {
    fn drop(&mut self) {
        let previous = self.previous.take();
        self.ctx.replace_whitespace(previous);
    }
}

//! Zero-copy cursor into the source buffer.
//!
//! Every matcher and parser works on an [`Input`]: the full source text plus a
//! byte offset marking where the remaining input starts. Splitting an input
//! never copies, both halves borrow the same backing `str`.

use std::fmt;

/// A view of the remaining input, anchored in the original source buffer.
#[derive(Clone, Copy)]
pub struct Input<'src> {
    source: &'src str,
    offset: usize,
}

impl<'src> Input<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, offset: 0 }
    }

    /// The complete buffer this view was cut from.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset of the first remaining character within [`Input::source`].
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The remaining text.
    pub fn rest(&self) -> &'src str {
        &self.source[self.offset..]
    }

    pub fn is_empty(&self) -> bool {
        self.offset == self.source.len()
    }

    /// Split off the first `len` bytes of the remaining text.
    ///
    /// Returns the consumed text and the view positioned after it. `len` must
    /// lie on a character boundary of [`Input::rest`]; matchers only ever
    /// report such lengths.
    pub fn split_at(self, len: usize) -> (&'src str, Input<'src>) {
        let end = self.offset + len;
        debug_assert!(self.source.is_char_boundary(end));
        let consumed = &self.source[self.offset..end];
        (
            consumed,
            Input {
                source: self.source,
                offset: end,
            },
        )
    }

    /// Whether `other` is the very buffer (same address and length) this view
    /// points into.
    pub fn is_view_of(&self, other: &str) -> bool {
        std::ptr::eq(self.source, other)
    }
}

impl PartialEq for Input<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.source, other.source) && self.offset == other.offset
    }
}

impl Eq for Input<'_> {}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("offset", &self.offset)
            .field("rest", &self.rest())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_reconstructs_input() {
        let source = "héllo world";
        let input = Input::new(source);
        let (head, rest) = input.split_at("hél".len());
        assert_eq!(head, "hél");
        assert_eq!(rest.rest(), "lo world");
        assert_eq!(format!("{head}{}", rest.rest()), source);
    }

    #[test]
    fn test_split_shares_buffer() {
        let source = String::from("abc");
        let (_, rest) = Input::new(&source).split_at(1);
        assert!(rest.is_view_of(&source));
        assert!(!rest.is_view_of("abc"));
        assert_eq!(rest.offset(), 1);
    }

    #[test]
    fn test_equality_requires_same_buffer() {
        let a = String::from("xyz");
        let b = String::from("xyz");
        assert_eq!(Input::new(&a), Input::new(&a));
        assert_ne!(Input::new(&a), Input::new(&b));
    }

    #[test]
    fn test_empty_at_end() {
        let input = Input::new("ab");
        assert!(!input.is_empty());
        let (_, rest) = input.split_at(2);
        assert!(rest.is_empty());
        assert_eq!(rest.rest(), "");
    }
}

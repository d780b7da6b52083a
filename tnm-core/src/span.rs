//! Character-addressed text slices

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A slice of the source text
///
/// `start` and `end` are character offsets, so `end == start + text.chars().count()`.
/// The byte offset of `start` is kept alongside for slicing the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// The covered text
    pub text: String,
    /// Character offset of the first character
    pub start: usize,
    /// Character offset one past the last character
    pub end: usize,
    /// Byte offset of the first character
    #[serde(skip)]
    pub byte_start: usize,
}

impl Span {
    /// Create a span over `source[bytes]` whose first character sits at `char_start`
    pub fn new(source: &str, bytes: Range<usize>, char_start: usize) -> Self {
        let text = source[bytes.clone()].to_string();
        let end = char_start + text.chars().count();
        Self {
            text,
            start: char_start,
            end,
            byte_start: bytes.start,
        }
    }

    /// Byte offset one past the last character
    #[inline]
    pub fn byte_end(&self) -> usize {
        self.byte_start + self.text.len()
    }

    /// Byte range in the source text
    #[inline]
    pub fn byte_range(&self) -> Range<usize> {
        self.byte_start..self.byte_end()
    }

    /// Length in characters
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no characters
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the span consists only of whitespace
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }

    /// `self.start <= other.start && self.end >= other.end`
    #[inline]
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Span from the start of `first` to the end of `last`
    pub fn covering(source: &str, first: &Span, last: &Span) -> Self {
        Self::new(source, first.byte_start..last.byte_end(), first.start)
    }
}

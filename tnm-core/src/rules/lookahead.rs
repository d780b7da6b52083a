//! Value boundary lookahead

use crate::error::Result;
use regex::Regex;

/// Decides whether a code-like fragment ends where it appears to end
///
/// The text after a value must be empty, start with whitespace, or reach an
/// uppercase letter within at most three characters that are not
/// word-continuation consonants. This rejects `Tis` in `Tissue` and `Ta` in
/// `Target` while keeping `ypT0N0M0` or `pT2pN1` splittable.
#[derive(Debug, Clone)]
pub struct Lookahead {
    pattern: String,
    following: Regex,
}

impl Lookahead {
    pub fn new(word_continuation: &str) -> Result<Self> {
        let class: String = word_continuation
            .chars()
            .map(|ch| regex::escape(ch.encode_utf8(&mut [0; 4])))
            .collect();
        let pattern = format!(r"(?:$|\s|[^{class}]{{0,3}}[A-Z])");
        let following = Regex::new(&format!("^{pattern}"))?;
        Ok(Self { pattern, following })
    }

    /// Regex fragment for the text following a value
    ///
    /// The fragment consumes input. Callers place the value in a capture group
    /// and read its end from there.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `rest`, the text immediately after a value, ends the value
    #[inline]
    pub fn accepts(&self, rest: &str) -> bool {
        self.following.is_match(rest)
    }
}

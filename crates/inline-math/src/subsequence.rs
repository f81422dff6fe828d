//! Contiguous token run enumeration.
//!
//! Candidates are produced longest first and, among equal lengths, leftmost first. The
//! orchestrator stops at the first desirable candidate, so this order is what makes the
//! largest enclosing expression win.

use std::iter::FusedIterator;

/// Number of contiguous runs in a sequence of `n` tokens: `n(n+1)/2`.
pub fn candidate_count(n: usize) -> usize {
    n * (n + 1) / 2
}

/// A contiguous run of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Number of tokens in the run.
    pub size: usize,
    /// Index of the first token of the run.
    pub offset: usize,
    /// The tokens of the run.
    pub tokens: &'a [&'a str],
}

impl Candidate<'_> {
    /// The run rejoined with single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }

    /// Enumeration rank: `(size, offset)`.
    pub fn rank(&self) -> (usize, usize) {
        (self.size, self.offset)
    }
}

/// Lazy, single-pass iterator over every contiguous run of a token sequence.
///
/// Sizes go from `tokens.len()` down to `1`; offsets go from `0` up to `tokens.len() - size`.
#[derive(Debug, Clone)]
pub struct Subsequences<'a> {
    tokens: &'a [&'a str],
    size: usize,
    offset: usize,
}

impl<'a> Subsequences<'a> {
    /// Start enumerating runs of `tokens`.
    pub fn new(tokens: &'a [&'a str]) -> Self {
        Self {
            tokens,
            size: tokens.len(),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Subsequences<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.size == 0 {
            return None;
        }

        let size = self.size;
        let offset = self.offset;
        let candidate = Candidate {
            size,
            offset,
            tokens: &self.tokens[offset..offset + size],
        };

        if offset + size < self.tokens.len() {
            self.offset += 1;
        } else {
            self.size -= 1;
            self.offset = 0;
        }

        Some(candidate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Subsequences<'_> {
    fn len(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        // Remaining runs of the current size plus every run of smaller sizes.
        let current = self.tokens.len() - self.size + 1 - self.offset;
        current + candidate_count(self.size - 1)
    }
}

impl FusedIterator for Subsequences<'_> {}

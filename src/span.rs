// ABOUTME: Byte-offset span type for source locations

//! Byte-offset spans into the original source text.

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into the input that was parsed.
///
/// `end` is exclusive. Trailing trivia (whitespace, comments) consumed after
/// a node is never included in its span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Span { start, end }
    }

    /// Span covering just this single empty point, useful for synthetic nodes.
    pub fn point(at: usize) -> Self {
        Span { start: at, end: at }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn slice<'a>(self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

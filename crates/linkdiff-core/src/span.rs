//! Byte spans and per-file diff results.

use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` of byte offsets where two buffers
/// differ.
///
/// Spans produced by the differ are maximal, non-overlapping, and sorted
/// ascending. When the compared buffers have different lengths the last span
/// may be the pure length-mismatch tail `[shorter_len, longer_len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteSpan {
    /// First differing offset (inclusive).
    pub start: u64,
    /// One past the last differing offset (exclusive).
    pub end: u64,
}

impl ByteSpan {
    /// Create a new span. `start` must be strictly less than `end`.
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start < end, "empty or inverted span {start}..{end}");
        Self { start, end }
    }

    /// Number of bytes covered by this span.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Spans are never empty by construction.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl std::fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// The result of diffing two files byte-by-byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    /// Differing byte ranges, ascending and non-overlapping.
    pub spans: Vec<ByteSpan>,
    /// Total number of differing bytes (sum of span widths).
    pub differing_bytes: u64,
    /// Percentage of differing bytes relative to the larger file.
    pub percent: f64,
}

impl FileDiff {
    /// Build a diff result from spans and the two file lengths.
    pub fn from_spans(spans: Vec<ByteSpan>, left_len: u64, right_len: u64) -> Self {
        let differing_bytes: u64 = spans.iter().map(ByteSpan::len).sum();
        let larger = left_len.max(right_len);
        let percent = if larger == 0 {
            0.0
        } else {
            100.0 * differing_bytes as f64 / larger as f64
        };
        Self {
            spans,
            differing_bytes,
            percent,
        }
    }

    /// Whether the two files were byte-identical (and equal length).
    pub fn is_identical(&self) -> bool {
        self.spans.is_empty()
    }
}

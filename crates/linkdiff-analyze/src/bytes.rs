//! Byte-span diffing of two buffers.
//!
//! This is either very fast or very slow depending on the inputs. Two
//! mostly-identical buffers are dismissed by a handful of bulk equality
//! checks; buffers that differ almost everywhere degrade toward O(n log n)
//! comparison work. No early-abort threshold exists for the slow case.

use std::path::Path;

use tracing::debug;

use linkdiff_core::{ByteSpan, Error, FileDiff, Result};

/// Locate all maximal differing byte ranges of two buffers.
///
/// Divide and conquer over the common-length region `[0, n)`: a range whose
/// two sides compare equal as a whole is skipped without per-byte work; an
/// unequal range is split at its midpoint until single differing bytes
/// remain, which are coalesced into maximal spans on emission. When the
/// buffer lengths differ, one final span covers the length-mismatch tail
/// `[n, m)` - those bytes have no counterpart and are differing by
/// definition.
///
/// Ranges are processed with an explicit work stack rather than recursion,
/// so a pathological fully-alternating input costs heap instead of call
/// stack. Emission order matches the recursive formulation exactly.
pub fn diff_bytes(left: &[u8], right: &[u8]) -> Vec<ByteSpan> {
    let n = left.len().min(right.len());
    let m = left.len().max(right.len());

    let mut spans: Vec<ByteSpan> = Vec::new();
    let mut pending: Vec<(usize, usize)> = Vec::new();
    if n > 0 {
        pending.push((0, n));
    }

    while let Some((i, k)) = pending.pop() {
        // Bulk equality over the whole range: the fast path, and the common
        // case for mostly-hardlinked files.
        if left[i..k] == right[i..k] {
            continue;
        }

        if k - i == 1 {
            match spans.last_mut() {
                // A differing byte flush against the previous span extends
                // it, so contiguous differing regions never fragment at
                // split midpoints.
                Some(last) if last.end == i as u64 => last.end = k as u64,
                _ => spans.push(ByteSpan::new(i as u64, k as u64)),
            }
            continue;
        }

        let j = i + (k - i) / 2;
        // Left half on top of the stack: ranges emit in ascending order.
        pending.push((j, k));
        pending.push((i, j));
    }

    if n != m {
        spans.push(ByteSpan::new(n as u64, m as u64));
    }

    spans
}

/// Diff two files byte-by-byte.
///
/// Both files are read fully into memory; target files are runtime images,
/// not unbounded streams. `max_bytes`, when set, refuses files above that
/// size before any read happens.
pub fn diff_files(
    left_path: &Path,
    right_path: &Path,
    max_bytes: Option<u64>,
) -> Result<FileDiff> {
    if let Some(limit) = max_bytes {
        for path in [left_path, right_path] {
            let size = std::fs::metadata(path).map_err(|e| Error::io(path, e))?.len();
            if size > limit {
                return Err(Error::FileTooLarge {
                    path: path.to_path_buf(),
                    size,
                    limit,
                });
            }
        }
    }

    let left = std::fs::read(left_path).map_err(|e| Error::io(left_path, e))?;
    let right = std::fs::read(right_path).map_err(|e| Error::io(right_path, e))?;

    let spans = diff_bytes(&left, &right);
    let diff = FileDiff::from_spans(spans, left.len() as u64, right.len() as u64);

    debug!(
        left = %left_path.display(),
        right = %right_path.display(),
        spans = diff.spans.len(),
        differing_bytes = diff.differing_bytes,
        "files diffed"
    );

    Ok(diff)
}

//! Analysis algorithms for linkdiff.
//!
//! This crate answers the two questions linkdiff exists for:
//!
//! - **Tree classification** - Given two tree inventories, partition their
//!   identities into common / left-only / right-only, and split the paths of
//!   left-only identities into "missing from right entirely" vs "same path,
//!   different storage" (diverged).
//! - **Worst-offender ranking** - Order diverged paths by the larger of
//!   their two sizes so detailed diffing effort goes where the bytes are.
//! - **Byte-span diffing** - Locate the exact differing byte ranges of two
//!   buffers with a divide-and-conquer scheme that skips identical regions
//!   in bulk, which is the common case for mostly-hardlinked files.
//!
//! ```rust,ignore
//! use linkdiff_analyze::{classify, rank_worst_offenders, diff_files};
//! use linkdiff_scan::TreeInventory;
//!
//! let left = TreeInventory::build("/srv/runtime/1.0")?;
//! let right = TreeInventory::build("/srv/runtime/1.1")?;
//!
//! let comparison = classify(&left, &right);
//! for offender in rank_worst_offenders(&left, &right, &comparison.diverged_paths, 25) {
//!     let diff = diff_files(
//!         &left.root.join(&offender.path),
//!         &right.root.join(&offender.path),
//!         None,
//!     )?;
//!     println!("{}: {} bytes differ", offender.path.display(), diff.differing_bytes);
//! }
//! ```

mod bytes;
mod classify;
mod rank;

pub use bytes::{diff_bytes, diff_files};
pub use classify::{IdentityPartition, TreeComparison, classify};
pub use rank::{WorstOffender, rank_worst_offenders};

// Re-export core types
pub use linkdiff_core::{ByteSpan, Error, FileDiff, FileIdentity, Result};

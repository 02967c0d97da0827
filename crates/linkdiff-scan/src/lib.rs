//! Tree inventory building for linkdiff.
//!
//! This crate walks a directory tree once and produces a [`TreeInventory`]:
//! a bidirectional mapping between relative paths and on-disk identity
//! (device + inode), plus a size lookup per identity. The inventory is the
//! input to classification and ranking in `linkdiff-analyze`.
//!
//! # Example
//!
//! ```rust,no_run
//! use linkdiff_scan::TreeInventory;
//!
//! let inventory = TreeInventory::build("/srv/runtime/1.0").unwrap();
//! println!(
//!     "{} files, {} distinct inodes",
//!     inventory.file_count(),
//!     inventory.identity_count()
//! );
//! ```

mod inventory;

pub use inventory::TreeInventory;

// Re-export core types for convenience
pub use linkdiff_core::{Error, FileIdentity, Result};

//! Core types for linkdiff.
//!
//! This crate provides the value types shared by the scanning and analysis
//! crates: file identities (hardlink equivalence classes), byte spans, and
//! the error enum.

mod error;
mod identity;
mod span;

pub use error::Error;
pub use identity::FileIdentity;
pub use span::{ByteSpan, FileDiff};

/// Convenience alias used throughout the linkdiff crates.
pub type Result<T> = std::result::Result<T, Error>;

//! File identity: the hardlink equivalence class.

use serde::{Deserialize, Serialize};

/// On-disk identity of a file: device ID plus inode number.
///
/// Two paths with equal `FileIdentity` are hardlinks of the same storage.
/// Used as a map key; immutable once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileIdentity {
    /// Device ID.
    pub device: u64,
    /// Inode number.
    pub inode: u64,
}

impl FileIdentity {
    /// Create a new identity from a device ID and inode number.
    pub fn new(device: u64, inode: u64) -> Self {
        Self { device, inode }
    }
}

impl std::fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.device, self.inode)
    }
}

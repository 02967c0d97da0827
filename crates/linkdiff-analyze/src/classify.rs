//! Identity-set classification of two tree inventories.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use linkdiff_core::FileIdentity;
use linkdiff_scan::TreeInventory;

/// One partition of the identity space, with aggregate size.
///
/// `total_bytes` sums over unique identities: a file with five hardlinked
/// paths contributes its size once.
#[derive(Debug, Clone, Serialize)]
pub struct IdentityPartition {
    /// Identities in this partition, in left/right walk order.
    pub identities: Vec<FileIdentity>,
    /// Summed size of the unique storage behind these identities.
    pub total_bytes: u64,
}

impl IdentityPartition {
    fn new(identities: Vec<FileIdentity>, inventory: &TreeInventory) -> Self {
        let total_bytes = inventory.sum_identity_size(&identities);
        Self {
            identities,
            total_bytes,
        }
    }

    /// Number of identities in this partition.
    pub fn count(&self) -> usize {
        self.identities.len()
    }
}

/// Result of classifying two tree inventories against each other.
#[derive(Debug, Clone, Serialize)]
pub struct TreeComparison {
    /// Identities present in both trees (still hardlinked/shared).
    pub common: IdentityPartition,
    /// Identities present only in the left tree.
    pub left_only: IdentityPartition,
    /// Identities present only in the right tree.
    pub right_only: IdentityPartition,

    /// Paths of left-only identities that do not exist under any name in
    /// the right tree.
    pub left_paths_missing_in_right: Vec<PathBuf>,

    /// Paths of left-only identities that exist under the same name in the
    /// right tree but point at different storage. These are the interesting
    /// candidates for byte-level diffing.
    pub diverged_paths: Vec<PathBuf>,
}

/// Partition the identities of `left` and `right` and split the paths of
/// left-only identities by their presence in `right`.
///
/// `left_paths_missing_in_right` and `diverged_paths` together cover every
/// path of every left-only identity exactly once. A path lands in the
/// diverged set even when the identical path string exists on the right,
/// as long as the right side's storage differs.
pub fn classify(left: &TreeInventory, right: &TreeInventory) -> TreeComparison {
    let mut common = Vec::new();
    let mut left_only = Vec::new();
    for identity in left.identity_sizes.keys() {
        if right.identity_sizes.contains_key(identity) {
            common.push(*identity);
        } else {
            left_only.push(*identity);
        }
    }
    let right_only: Vec<FileIdentity> = right
        .identity_sizes
        .keys()
        .filter(|identity| !left.identity_sizes.contains_key(*identity))
        .copied()
        .collect();

    let mut left_paths_missing_in_right = Vec::new();
    let mut diverged_paths = Vec::new();
    for identity in &left_only {
        for path in &left.identity_paths[identity] {
            if right.contains_path(path) {
                diverged_paths.push(path.clone());
            } else {
                left_paths_missing_in_right.push(path.clone());
            }
        }
    }

    debug!(
        common = common.len(),
        left_only = left_only.len(),
        right_only = right_only.len(),
        diverged = diverged_paths.len(),
        missing = left_paths_missing_in_right.len(),
        "trees classified"
    );

    TreeComparison {
        common: IdentityPartition::new(common, left),
        left_only: IdentityPartition::new(left_only, left),
        right_only: IdentityPartition::new(right_only, right),
        left_paths_missing_in_right,
        diverged_paths,
    }
}

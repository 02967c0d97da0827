//! Worst-offender ranking of diverged paths.

use std::path::{Path, PathBuf};

use serde::Serialize;

use linkdiff_scan::TreeInventory;

/// A diverged path with its size on each side.
#[derive(Debug, Clone, Serialize)]
pub struct WorstOffender {
    /// Relative path, present in both trees.
    pub path: PathBuf,
    /// Size of the left tree's copy in bytes.
    pub left_bytes: u64,
    /// Size of the right tree's copy in bytes.
    pub right_bytes: u64,
}

impl WorstOffender {
    /// The larger of the two sides, which is what the ranking sorts by.
    pub fn larger_bytes(&self) -> u64 {
        self.left_bytes.max(self.right_bytes)
    }
}

/// Select the `top_n` largest diverged paths, sized by the larger of their
/// two copies.
///
/// The result is ascending by size with the worst offender last. Ties keep
/// their relative order from `diverged_paths` (filesystem walk order), so
/// the ranking is deterministic across runs.
pub fn rank_worst_offenders(
    left: &TreeInventory,
    right: &TreeInventory,
    diverged_paths: &[impl AsRef<Path>],
    top_n: usize,
) -> Vec<WorstOffender> {
    let mut offenders: Vec<WorstOffender> = diverged_paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            WorstOffender {
                path: path.to_path_buf(),
                left_bytes: left.size_of_path(path).unwrap_or(0),
                right_bytes: right.size_of_path(path).unwrap_or(0),
            }
        })
        .collect();

    offenders.sort_by_key(WorstOffender::larger_bytes);

    let keep_from = offenders.len().saturating_sub(top_n);
    offenders.split_off(keep_from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use linkdiff_core::FileIdentity;

    fn inventory(rows: &[(&str, u64, u64)]) -> TreeInventory {
        let mut identity_paths: IndexMap<FileIdentity, Vec<PathBuf>> = IndexMap::new();
        let mut identity_sizes = IndexMap::new();
        let mut path_identities = IndexMap::new();

        for (i, &(path, inode, size)) in rows.iter().enumerate() {
            let identity = FileIdentity::new(1, inode + i as u64 * 1000);
            let path = PathBuf::from(path);
            identity_paths.entry(identity).or_default().push(path.clone());
            identity_sizes.insert(identity, size);
            path_identities.insert(path, identity);
        }

        TreeInventory {
            root: PathBuf::from("/synthetic"),
            identity_paths,
            identity_sizes,
            path_identities,
        }
    }

    #[test]
    fn test_rank_orders_by_larger_side() {
        let left = inventory(&[("small", 1, 10), ("big", 2, 500), ("mid", 3, 50)]);
        let right = inventory(&[("small", 4, 12), ("big", 5, 400), ("mid", 6, 600)]);
        let diverged = [
            PathBuf::from("small"),
            PathBuf::from("big"),
            PathBuf::from("mid"),
        ];

        let ranked = rank_worst_offenders(&left, &right, &diverged, 25);

        // Ascending: small (12), big (500), mid (600).
        let order: Vec<_> = ranked.iter().map(|o| o.path.to_str().unwrap()).collect();
        assert_eq!(order, ["small", "big", "mid"]);
        assert_eq!(ranked[2].larger_bytes(), 600);
    }

    #[test]
    fn test_rank_truncates_to_top_n() {
        let left = inventory(&[("a", 1, 1), ("b", 2, 2), ("c", 3, 3), ("d", 4, 4)]);
        let right = inventory(&[("a", 5, 1), ("b", 6, 2), ("c", 7, 3), ("d", 8, 4)]);
        let diverged = [
            PathBuf::from("a"),
            PathBuf::from("b"),
            PathBuf::from("c"),
            PathBuf::from("d"),
        ];

        let ranked = rank_worst_offenders(&left, &right, &diverged, 2);

        // The two largest survive, still ascending.
        let order: Vec<_> = ranked.iter().map(|o| o.path.to_str().unwrap()).collect();
        assert_eq!(order, ["c", "d"]);
    }

    #[test]
    fn test_rank_ties_keep_walk_order() {
        let left = inventory(&[("first", 1, 7), ("second", 2, 7), ("third", 3, 7)]);
        let right = inventory(&[("first", 4, 7), ("second", 5, 7), ("third", 6, 7)]);
        let diverged = [
            PathBuf::from("first"),
            PathBuf::from("second"),
            PathBuf::from("third"),
        ];

        let ranked = rank_worst_offenders(&left, &right, &diverged, 25);

        let order: Vec<_> = ranked.iter().map(|o| o.path.to_str().unwrap()).collect();
        assert_eq!(order, ["first", "second", "third"]);
    }

    #[test]
    fn test_rank_empty_input() {
        let left = inventory(&[]);
        let right = inventory(&[]);
        let diverged: [PathBuf; 0] = [];

        assert!(rank_worst_offenders(&left, &right, &diverged, 25).is_empty());
    }
}

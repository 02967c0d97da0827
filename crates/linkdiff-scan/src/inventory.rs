//! Inode-indexed inventory of a directory tree.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use jwalk::{Parallelism, WalkDir};
use tracing::debug;

use linkdiff_core::{Error, FileIdentity, Result};

/// Inode-indexed inventory of one directory tree.
///
/// Built by a single walk and read-only afterwards. Every inventoried path
/// appears exactly once in exactly one list of `identity_paths`, and
/// `identity_sizes` is defined for every identity in `identity_paths`. All
/// maps preserve filesystem walk order, which downstream ranking relies on
/// for stable tie-breaking.
#[derive(Debug, Clone)]
pub struct TreeInventory {
    /// Canonicalized root the walk started from.
    pub root: PathBuf,

    /// Identity -> all relative paths hardlinked to that storage.
    pub identity_paths: IndexMap<FileIdentity, Vec<PathBuf>>,

    /// Identity -> byte size (shared by all paths of the identity).
    pub identity_sizes: IndexMap<FileIdentity, u64>,

    /// Relative path -> identity.
    pub path_identities: IndexMap<PathBuf, FileIdentity>,
}

impl TreeInventory {
    /// Walk `root` and build its inventory.
    ///
    /// The walk is serial and sorted, does not follow symlinks, and records
    /// regular files only. Paths are stored relative to `root`. Any I/O
    /// error during the walk aborts the build: a partial inventory would
    /// corrupt the set-based classification downstream.
    pub fn build(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let root = root.canonicalize().map_err(|e| Error::io(root, e))?;
        if !root.is_dir() {
            return Err(Error::NotADirectory { path: root });
        }

        let mut inventory = Self {
            root: root.clone(),
            identity_paths: IndexMap::new(),
            identity_sizes: IndexMap::new(),
            path_identities: IndexMap::new(),
        };

        let walker = WalkDir::new(&root)
            .parallelism(Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true);

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| root.clone());
                    let kind = err
                        .io_error()
                        .map(std::io::Error::kind)
                        .unwrap_or(std::io::ErrorKind::Other);
                    return Err(Error::io(path, std::io::Error::new(kind, err.to_string())));
                }
            };

            // With follow_links off the entry type reflects the link itself,
            // so symlinks never masquerade as regular files here.
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let metadata = std::fs::symlink_metadata(&path).map_err(|e| Error::io(&path, e))?;
            let identity = FileIdentity::new(get_dev(&metadata), get_ino(&metadata));
            let relative = path
                .strip_prefix(&root)
                .unwrap_or(&path)
                .to_path_buf();

            inventory
                .identity_paths
                .entry(identity)
                .or_default()
                .push(relative.clone());
            inventory.identity_sizes.insert(identity, metadata.len());
            inventory.path_identities.insert(relative, identity);
        }

        debug!(
            root = %inventory.root.display(),
            files = inventory.file_count(),
            identities = inventory.identity_count(),
            "tree inventory built"
        );

        Ok(inventory)
    }

    /// Number of inventoried paths.
    pub fn file_count(&self) -> usize {
        self.path_identities.len()
    }

    /// Number of distinct identities (hardlink equivalence classes).
    pub fn identity_count(&self) -> usize {
        self.identity_sizes.len()
    }

    /// Whether a relative path exists in this tree.
    pub fn contains_path(&self, path: &Path) -> bool {
        self.path_identities.contains_key(path)
    }

    /// Size of the file at a relative path, if present.
    pub fn size_of_path(&self, path: &Path) -> Option<u64> {
        let identity = self.path_identities.get(path)?;
        self.identity_sizes.get(identity).copied()
    }

    /// Sum of sizes over a set of identities. Hardlinked storage is counted
    /// once per identity regardless of how many paths alias it.
    pub fn sum_identity_size<'a>(
        &self,
        identities: impl IntoIterator<Item = &'a FileIdentity>,
    ) -> u64 {
        identities
            .into_iter()
            .filter_map(|id| self.identity_sizes.get(id))
            .sum()
    }
}

// Cross-platform metadata helpers. Identity comparison is only meaningful
// where the platform exposes device and inode numbers.

#[cfg(unix)]
fn get_dev(metadata: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.dev()
}

#[cfg(not(unix))]
fn get_dev(_metadata: &std::fs::Metadata) -> u64 {
    0
}

#[cfg(unix)]
fn get_ino(metadata: &std::fs::Metadata) -> u64 {
    use std::os::unix::fs::MetadataExt;
    metadata.ino()
}

#[cfg(not(unix))]
fn get_ino(_metadata: &std::fs::Metadata) -> u64 {
    0
}

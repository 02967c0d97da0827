use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use linkdiff_analyze::{classify, diff_files, rank_worst_offenders};
use linkdiff_scan::TreeInventory;

/// Two runtime-image-like trees on the same filesystem:
///
/// - `shared.bin` hardlinked across the trees (still common),
/// - `patched.bin` present in both under the same name but as separate
///   copies with slightly different bytes (diverged),
/// - `removed.bin` only in the left tree (missing from right).
fn create_tree_pair() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let left = temp.path().join("left");
    let right = temp.path().join("right");
    fs::create_dir_all(left.join("usr/lib")).unwrap();
    fs::create_dir_all(right.join("usr/lib")).unwrap();

    fs::write(left.join("usr/lib/shared.bin"), vec![0xaau8; 4096]).unwrap();
    fs::hard_link(
        left.join("usr/lib/shared.bin"),
        right.join("usr/lib/shared.bin"),
    )
    .unwrap();

    let mut patched = vec![0x11u8; 2048];
    fs::write(left.join("usr/lib/patched.bin"), &patched).unwrap();
    patched[512] = 0x22;
    patched[513] = 0x22;
    fs::write(right.join("usr/lib/patched.bin"), &patched).unwrap();

    fs::write(left.join("usr/lib/removed.bin"), b"dropped in the update").unwrap();

    (temp, left, right)
}

#[test]
fn test_full_pipeline_over_real_trees() {
    let (_temp, left_root, right_root) = create_tree_pair();
    let left = TreeInventory::build(&left_root).unwrap();
    let right = TreeInventory::build(&right_root).unwrap();

    let comparison = classify(&left, &right);

    assert_eq!(comparison.common.count(), 1);
    assert_eq!(comparison.common.total_bytes, 4096);
    assert_eq!(comparison.left_only.count(), 2);
    assert_eq!(comparison.right_only.count(), 1);
    assert_eq!(
        comparison.diverged_paths,
        vec![PathBuf::from("usr/lib/patched.bin")]
    );
    assert_eq!(
        comparison.left_paths_missing_in_right,
        vec![PathBuf::from("usr/lib/removed.bin")]
    );

    let offenders =
        rank_worst_offenders(&left, &right, &comparison.diverged_paths, 25);
    assert_eq!(offenders.len(), 1);
    assert_eq!(offenders[0].left_bytes, 2048);
    assert_eq!(offenders[0].right_bytes, 2048);

    let diff = diff_files(
        &left.root.join(&offenders[0].path),
        &right.root.join(&offenders[0].path),
        None,
    )
    .unwrap();
    assert_eq!(diff.differing_bytes, 2);
    assert_eq!(diff.spans.len(), 1);
    assert_eq!(diff.spans[0].start, 512);
    assert_eq!(diff.spans[0].end, 514);
}

#[test]
fn test_hardlinked_pair_split_on_one_side() {
    // Left links x and y to one inode; right keeps x on that inode but
    // copies y. Which paths diverge depends on the direction of the view.
    let temp = TempDir::new().unwrap();
    let left = temp.path().join("left");
    let right = temp.path().join("right");
    fs::create_dir_all(&left).unwrap();
    fs::create_dir_all(&right).unwrap();

    fs::write(left.join("x"), b"linked contents").unwrap();
    fs::hard_link(left.join("x"), left.join("y")).unwrap();
    fs::hard_link(left.join("x"), right.join("x")).unwrap();
    fs::write(right.join("y"), b"copied contents").unwrap();

    let left_inv = TreeInventory::build(&left).unwrap();
    let right_inv = TreeInventory::build(&right).unwrap();
    assert_eq!(left_inv.identity_count(), 1);
    assert_eq!(right_inv.identity_count(), 2);

    let from_left = classify(&left_inv, &right_inv);
    assert_eq!(from_left.common.count(), 1);
    assert!(from_left.diverged_paths.is_empty());
    assert!(from_left.left_paths_missing_in_right.is_empty());

    let from_right = classify(&right_inv, &left_inv);
    assert_eq!(from_right.common.count(), 1);
    assert_eq!(from_right.diverged_paths, vec![PathBuf::from("y")]);
}

#[test]
fn test_missing_root_aborts() {
    let temp = TempDir::new().unwrap();
    let err = TreeInventory::build(temp.path().join("nope")).unwrap_err();
    assert!(matches!(err, linkdiff_analyze::Error::NotFound { .. }));
}

#[test]
fn test_diverged_copy_with_length_change() {
    let temp = TempDir::new().unwrap();
    let left = temp.path().join("left");
    let right = temp.path().join("right");
    fs::create_dir_all(&left).unwrap();
    fs::create_dir_all(&right).unwrap();

    fs::write(left.join("grown.bin"), b"abc").unwrap();
    fs::write(right.join("grown.bin"), b"abcd").unwrap();

    let diff = diff_files(&left.join("grown.bin"), &right.join("grown.bin"), None).unwrap();
    assert_eq!(diff.spans.len(), 1);
    assert_eq!((diff.spans[0].start, diff.spans[0].end), (3, 4));
    assert!((diff.percent - 25.0).abs() < 1e-9);
}

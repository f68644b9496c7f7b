//! Property tests for the tree engine: any generated source tree survives a
//! copy byte-for-byte, and re-copying changes nothing.

use proptest::prelude::*;
use skillsync::tree::{copy_tree, trees_equal};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

/// One generated file: a relative path built from collision-free segment
/// names (directories `d*`, files `f*`), its content, and a permission mode.
fn arb_entry() -> impl Strategy<Value = (PathBuf, Vec<u8>, u32)> {
    let depth = prop::collection::vec(0u8..3, 0..3);
    let mode = prop::sample::select(vec![0o600u32, 0o644, 0o664, 0o755]);
    (depth, 0u8..5, prop::collection::vec(any::<u8>(), 0..1024), mode).prop_map(
        |(dirs, file, content, mode)| {
            let mut path = PathBuf::new();
            for d in dirs {
                path.push(format!("d{}", d));
            }
            path.push(format!("f{}", file));
            (path, content, mode)
        },
    )
}

fn materialize(entries: &[(PathBuf, Vec<u8>, u32)]) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    for (rel, content, mode) in entries {
        let path = src.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(*mode)).unwrap();
    }
    (tmp, src)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn copy_fidelity(entries in prop::collection::vec(arb_entry(), 0..12)) {
        let (tmp, src) = materialize(&entries);
        let dst = tmp.path().join("dst");

        copy_tree(&src, &dst).unwrap();
        prop_assert!(trees_equal(&src, &dst).unwrap());
    }

    #[test]
    fn copy_is_idempotent(entries in prop::collection::vec(arb_entry(), 0..12)) {
        let (tmp, src) = materialize(&entries);
        let dst = tmp.path().join("dst");

        copy_tree(&src, &dst).unwrap();
        copy_tree(&src, &dst).unwrap();
        prop_assert!(trees_equal(&src, &dst).unwrap());
    }

    #[test]
    fn copy_discards_prior_destination(entries in prop::collection::vec(arb_entry(), 0..8)) {
        let (tmp, src) = materialize(&entries);
        let dst = tmp.path().join("dst");
        fs::create_dir_all(dst.join("stale")).unwrap();
        fs::write(dst.join("stale/leftover.txt"), "stale").unwrap();

        copy_tree(&src, &dst).unwrap();
        prop_assert!(trees_equal(&src, &dst).unwrap());
        prop_assert!(!dst.join("stale").exists());
    }
}

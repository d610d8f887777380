//! Locations for files written by tests.

use std::path::{Path, PathBuf};

const TEST_OUTPUT_DIR: &str = "test_output";

/// `test_output/` at the workspace root, shared by every crate's tests.
pub fn test_output_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .join(TEST_OUTPUT_DIR)
}

/// Path of `name` under the test output root. Parent directories are created.
pub fn test_output_path(name: impl AsRef<Path>) -> PathBuf {
    let path = test_output_root().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
    }
    path
}

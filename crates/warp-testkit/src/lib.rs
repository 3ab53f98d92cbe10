//! Test utilities for warp
//!
//! Shared helpers for the warp workspace: temp dirs under `.tmp/`,
//! environment isolation for config lookups and template-tree fixtures.

pub mod env;
pub mod fixtures;

pub use env::{ENV_LOCK, with_isolated_warp_env};
pub use fixtures::{python_template, write_tree};

use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// # Returns
///
/// A `TempDir` instance that automatically cleans up on drop.
/// The directory is created at `.tmp/<random-name>` relative to the current
/// directory.
///
/// # Panics
///
/// Panics if:
/// - Unable to determine current directory
/// - Unable to create `.tmp/` directory
/// - Unable to create temporary subdirectory
///
/// # Examples
///
/// ```rust
/// use warp_testkit::temp_dir_in_workspace;
///
/// let temp = temp_dir_in_workspace();
/// let file_path = temp.path().join("test.txt");
/// std::fs::write(&file_path, "test data").unwrap();
/// ```
pub fn temp_dir_in_workspace() -> TempDir {
    try_temp_dir_in_workspace().expect("Failed to create temporary directory in .tmp/")
}

/// Alternative with Result for non-test code
pub fn try_temp_dir_in_workspace() -> std::io::Result<TempDir> {
    let workspace_root = std::env::current_dir()?;
    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base)?;
    TempDir::new_in(&tmp_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_in_workspace_creates_in_tmp() {
        let temp = temp_dir_in_workspace();
        let path = temp.path();

        assert!(
            path.to_string_lossy().contains(".tmp"),
            "Path should contain .tmp, got: {}",
            path.display()
        );
        assert!(path.is_dir(), "Path should be a directory");
    }

    #[test]
    fn test_temp_dir_auto_cleanup() {
        let path = {
            let temp = temp_dir_in_workspace();
            let p = temp.path().to_path_buf();
            assert!(p.exists(), "Directory should exist before drop");
            p
        };

        assert!(
            !path.exists(),
            "Directory should not exist after drop: {}",
            path.display()
        );
    }

    #[test]
    fn test_multiple_temp_dirs_unique() {
        let temp1 = temp_dir_in_workspace();
        let temp2 = temp_dir_in_workspace();
        assert_ne!(temp1.path(), temp2.path());
    }

    #[test]
    fn test_try_temp_dir_in_workspace_returns_ok() {
        let temp = try_temp_dir_in_workspace().unwrap();
        assert!(temp.path().exists());
        assert!(temp.path().to_string_lossy().contains(".tmp"));
    }
}

//! Cross-platform path validation utilities
//!
//! `Path::is_absolute()` is platform dependent: on Windows `/tmp` is rooted but
//! not absolute. Everything here works on components instead, so the same
//! checks reject the same inputs on every platform.

use std::path::{Component, Path, PathBuf};

/// Check if path is absolute OR rooted (cross-platform)
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use warp_core::path::has_absolute_or_rooted_component;
///
/// assert!(has_absolute_or_rooted_component(Path::new("/etc/passwd")));
/// assert!(!has_absolute_or_rooted_component(Path::new("foo/bar")));
/// ```
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Resolve `.` and `..` without touching the filesystem
///
/// Leading `..` components that cannot be popped are kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Check that a relative path stays below its base once normalized
///
/// ```
/// # use std::path::Path;
/// # use warp_core::path::is_contained_relative;
/// assert!(is_contained_relative(Path::new("src/main.py")));
/// assert!(is_contained_relative(Path::new("a/../b")));
/// assert!(!is_contained_relative(Path::new("../outside")));
/// assert!(!is_contained_relative(Path::new("/etc/passwd")));
/// ```
pub fn is_contained_relative(path: &Path) -> bool {
    if has_absolute_or_rooted_component(path) {
        return false;
    }
    let normalized = normalize_lexically(path);
    !matches!(normalized.components().next(), Some(Component::ParentDir) | None)
}

/// Check that a relative path names something strictly below its base
///
/// Unlike [`is_contained_relative`], any `..` component is refused, even one
/// that would be cancelled out.
pub fn is_safe_relative_path(path: &Path) -> bool {
    !has_absolute_or_rooted_component(path)
        && path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}

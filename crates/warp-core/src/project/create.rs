//! Project name validation and output directory preparation

use crate::error::{Result, WarpError};
use crate::path::has_absolute_or_rooted_component;
use std::path::{Component, Path, PathBuf};

/// Validate project name for security
///
/// # Security
///
/// Blocks:
/// - Absolute paths (e.g., `/tmp/foo`, `C:\Windows`)
/// - Parent directory traversal (`..`)
/// - Current directory (`.`)
/// - Path separators (multiple components like `foo/bar`)
/// - Empty names
/// - Windows drive prefixes (e.g., `C:`)
///
/// Names must be single directory names without path separators.
///
/// # Examples
///
/// ```
/// # use warp_core::project::create::validate_name;
/// assert!(validate_name("my-project").is_ok());
/// assert!(validate_name("../../../etc/passwd").is_err());
/// assert!(validate_name("/tmp/malicious").is_err());
/// assert!(validate_name("foo/bar").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid("Name cannot be empty".to_string()));
    }

    let path = Path::new(name);

    if has_absolute_or_rooted_component(path) {
        return Err(invalid(format!("Name cannot be an absolute path: '{}'", name)));
    }

    validate_path_components(path, name)
}

/// Validate path components for security
fn validate_path_components(path: &Path, name: &str) -> Result<()> {
    let mut normal_count = 0;

    for component in path.components() {
        match component {
            Component::Normal(_) => normal_count += 1,
            Component::Prefix(_) => {
                return Err(invalid(format!("Name cannot contain drive prefix: '{}'", name)));
            }
            Component::RootDir => {
                return Err(invalid(format!("Name cannot be an absolute path: '{}'", name)));
            }
            Component::CurDir => {
                return Err(invalid(format!(
                    "Name cannot contain current directory (.): '{}'",
                    name
                )));
            }
            Component::ParentDir => {
                return Err(invalid(format!(
                    "Name cannot contain parent directory (..): '{}'",
                    name
                )));
            }
        }
    }

    if normal_count != 1 {
        return Err(invalid(format!(
            "Name must be a single directory name without path separators: '{}'",
            name
        )));
    }

    Ok(())
}

fn invalid(message: String) -> WarpError {
    WarpError::InvalidName(message)
}

/// Resolve and check the output directory of a new project
///
/// Returns `target_dir/project_name`.
///
/// # Errors
///
/// - `InvalidName` if `project_name` is not a single plain directory name
/// - `ProjectExists` if the directory exists and `force` is not set
pub fn prepare_project_dir(target_dir: &Path, project_name: &str, force: bool) -> Result<PathBuf> {
    validate_name(project_name)?;

    let project_dir = target_dir.join(project_name);

    if project_dir.exists() && !force {
        return Err(WarpError::ProjectExists { path: project_dir });
    }

    Ok(project_dir)
}

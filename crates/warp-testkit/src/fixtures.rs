//! Template-tree fixtures

use std::path::Path;

/// Write `(relative path, contents)` pairs under `root`, creating parents
///
/// # Panics
///
/// Panics if a directory or file cannot be written.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
        }
        std::fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
    }
}

/// Small Python project template exercising every template feature
///
/// Writes under `root`:
/// - `README.md` (copied verbatim, contains a placeholder)
/// - `config.json.template`
/// - `src/{{PROJECT_NAME_SNAKE}}/__init__.py.template`
/// - `partials/license.txt` (included by `LICENSE.template`)
/// - `LICENSE.template`
/// - `Dockerfile.template` (docker conditional)
/// - `scripts/setup.sh`
pub fn python_template(root: &Path) {
    write_tree(
        root,
        &[
            ("README.md", "# {{PROJECT_NAME}}\n\nCopied as is.\n"),
            (
                "config.json.template",
                "{\n  \"name\": \"{{PROJECT_NAME}}\",\n  \"python\": \"{{PYTHON_VERSION}}\"\n}\n",
            ),
            (
                "src/{{PROJECT_NAME_SNAKE}}/__init__.py.template",
                "\"\"\"{{PROJECT_DESCRIPTION}}\"\"\"\n__version__ = \"0.1.0\"\n",
            ),
            (
                "partials/license.txt",
                "Copyright (c) {{CURRENT_YEAR}} {{AUTHOR_NAME}}\n",
            ),
            ("LICENSE.template", "MIT License\n\n{{include:partials/license.txt}}"),
            (
                "Dockerfile.template",
                "{{#if_docker}}FROM python:{{PYTHON_VERSION}}-slim\n{{/if_docker}}",
            ),
            ("scripts/setup.sh", "#!/bin/sh\necho setup\n"),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temp_dir_in_workspace;

    #[test]
    fn test_write_tree_creates_parents() {
        let temp = temp_dir_in_workspace();
        write_tree(temp.path(), &[("a/b/c.txt", "deep"), ("top.txt", "top")]);

        assert_eq!(
            std::fs::read_to_string(temp.path().join("a/b/c.txt")).unwrap(),
            "deep"
        );
        assert_eq!(std::fs::read_to_string(temp.path().join("top.txt")).unwrap(), "top");
    }

    #[test]
    fn test_python_template_layout() {
        let temp = temp_dir_in_workspace();
        python_template(temp.path());

        assert!(temp.path().join("config.json.template").is_file());
        assert!(temp.path().join("src/{{PROJECT_NAME_SNAKE}}").is_dir());
        assert!(temp.path().join("scripts/setup.sh").is_file());
    }
}

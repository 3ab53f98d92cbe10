//! Project materialization - template tree in, project tree out
//!
//! Every regular file of the template directory produces one output file:
//!
//! - `*.template` files are rendered and written without the suffix
//! - everything else is copied byte for byte
//!
//! Relative paths go through the variable pass first, so
//! `{{PROJECT_NAME}}.php.template` becomes `demo.php`. Problems with single
//! files are collected in the report and never stop the walk.

use crate::error::{Result, WarpError};
use crate::path::is_safe_relative_path;
use crate::project::create::validate_name;
use crate::template::{
    substitute_path, Diagnostic, FsIncludeResolver, TemplateContext, TemplateEngine,
};
use crate::vars::VariableStore;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Default suffix marking files to render
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".template";

/// Default suffixes of files made executable
pub const DEFAULT_EXECUTABLE_SUFFIXES: &[&str] = &[".sh"];

/// What happened to a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileAction {
    Rendered,
    Copied,
}

/// One file written to the project tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterializedFile {
    /// Path relative to the template directory
    pub source: PathBuf,
    /// Path relative to the project root
    pub output: PathBuf,
    pub action: FileAction,
    pub executable: bool,
}

/// Reason a file produced a warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileProblem {
    /// Rendering reported a diagnostic
    Template { diagnostic: Diagnostic },
    /// Template was not UTF-8 text and was copied unrendered
    NotText,
    ReadFailed { reason: String },
    WriteFailed { reason: String },
    /// Substituted output path was absolute or contained `..`
    RejectedPath { output: String },
    PermissionFailed { reason: String },
}

impl fmt::Display for FileProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileProblem::Template { diagnostic } => write!(f, "{}", diagnostic),
            FileProblem::NotText => write!(f, "not valid UTF-8 text, copied without rendering"),
            FileProblem::ReadFailed { reason } => write!(f, "failed to read: {}", reason),
            FileProblem::WriteFailed { reason } => write!(f, "failed to write: {}", reason),
            FileProblem::RejectedPath { output } => {
                write!(f, "output path '{}' leaves the project directory, skipped", output)
            }
            FileProblem::PermissionFailed { reason } => {
                write!(f, "failed to mark executable: {}", reason)
            }
        }
    }
}

/// Non-fatal problem with a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileWarning {
    /// Source path relative to the template directory
    pub path: PathBuf,
    #[serde(flatten)]
    pub problem: FileProblem,
}

impl fmt::Display for FileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.problem)
    }
}

/// Result of materializing a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    /// Project root (`target_dir/project_name`)
    pub root: PathBuf,
    pub files: Vec<MaterializedFile>,
    pub warnings: Vec<FileWarning>,
}

impl MaterializeReport {
    pub fn rendered_count(&self) -> usize {
        self.count(FileAction::Rendered)
    }

    pub fn copied_count(&self) -> usize {
        self.count(FileAction::Copied)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn count(&self, action: FileAction) -> usize {
        self.files.iter().filter(|f| f.action == action).count()
    }

    fn warn(&mut self, path: &Path, problem: FileProblem) {
        self.warnings.push(FileWarning {
            path: path.to_path_buf(),
            problem,
        });
    }
}

/// Suffix settings for a materialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeOptions {
    pub template_suffix: String,
    pub executable_suffixes: Vec<String>,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            executable_suffixes: DEFAULT_EXECUTABLE_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Builds project trees from template trees
#[derive(Debug, Default)]
pub struct Materializer {
    engine: TemplateEngine,
    options: MaterializeOptions,
}

impl Materializer {
    /// Materializer with the default engine and suffixes
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: MaterializeOptions) -> Self {
        self.options = options;
        self
    }

    /// Materialize `template_dir` into `target_dir/project_name`
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` / `TemplateNotDirectory` for a bad template directory
    /// - `InvalidName` if `project_name` is not a single plain directory name
    /// - `IoError` if the project root cannot be created
    ///
    /// All of these are checked before anything is written. Per-file problems
    /// end up in [`MaterializeReport::warnings`].
    pub fn materialize(
        &self,
        template_dir: &Path,
        project_name: &str,
        vars: &VariableStore,
        target_dir: &Path,
    ) -> Result<MaterializeReport> {
        if !template_dir.exists() {
            return Err(WarpError::TemplateNotFound {
                path: template_dir.to_path_buf(),
            });
        }
        if !template_dir.is_dir() {
            return Err(WarpError::TemplateNotDirectory {
                path: template_dir.to_path_buf(),
            });
        }
        validate_name(project_name)?;

        let root = target_dir.join(project_name);
        fs::create_dir_all(&root)?;
        debug!(template = %template_dir.display(), root = %root.display(), "materializing project");

        // Same directory may be spelled differently (`.`, `sub/..`, relative vs absolute)
        let template_dir = fs::canonicalize(template_dir)?;
        let template_dir = template_dir.as_path();
        let canonical_root = fs::canonicalize(&root)?;

        let mut report = MaterializeReport {
            root,
            ..Default::default()
        };

        for entry in WalkDir::new(template_dir)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .and_then(|p| p.strip_prefix(template_dir).ok())
                        .unwrap_or(Path::new(""))
                        .to_path_buf();
                    warn!(path = %path.display(), error = %e, "failed to walk template entry");
                    report.warn(&path, FileProblem::ReadFailed {
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if entry.path().starts_with(&canonical_root) {
                // Output tree nested inside the template tree
                continue;
            }
            let Ok(source) = entry.path().strip_prefix(template_dir) else {
                continue;
            };
            if source.as_os_str().is_empty() {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_dir() {
                self.create_dir(source, vars, &mut report);
            } else if file_type.is_file() {
                self.process_file(template_dir, source, vars, &mut report);
            } else {
                debug!(path = %source.display(), "skipping non-regular entry");
            }
        }

        self.mark_executables(&mut report);

        Ok(report)
    }

    /// Substitute a relative path; `None` (with a warning) if it is unsafe
    fn output_path(
        &self,
        source: &Path,
        vars: &VariableStore,
        report: &mut MaterializeReport,
    ) -> Option<String> {
        let substituted = substitute_path(&source.to_string_lossy(), vars);
        if is_safe_relative_path(Path::new(&substituted)) {
            return Some(substituted);
        }

        warn!(source = %source.display(), output = %substituted, "rejected output path");
        report.warn(source, FileProblem::RejectedPath { output: substituted });
        None
    }

    fn create_dir(&self, source: &Path, vars: &VariableStore, report: &mut MaterializeReport) {
        let Some(output) = self.output_path(source, vars, report) else {
            return;
        };
        if let Err(e) = fs::create_dir_all(report.root.join(&output)) {
            warn!(path = %output, error = %e, "failed to create directory");
            report.warn(source, FileProblem::WriteFailed {
                reason: e.to_string(),
            });
        }
    }

    fn process_file(
        &self,
        template_dir: &Path,
        source: &Path,
        vars: &VariableStore,
        report: &mut MaterializeReport,
    ) {
        let Some(output) = self.output_path(source, vars, report) else {
            return;
        };

        let source_path = template_dir.join(source);
        let bytes = match fs::read(&source_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %source.display(), error = %e, "failed to read template file");
                report.warn(source, FileProblem::ReadFailed {
                    reason: e.to_string(),
                });
                return;
            }
        };

        let stripped = self.strip_template_suffix(&output).map(str::to_string);
        let (output, contents, action) = match stripped {
            Some(stripped) => {
                match String::from_utf8(bytes) {
                    Ok(text) => {
                        let rendered = self.render(template_dir, &source_path, &text, vars);
                        for diagnostic in rendered.diagnostics {
                            report.warn(source, FileProblem::Template { diagnostic });
                        }
                        (stripped, rendered.output.into_bytes(), FileAction::Rendered)
                    }
                    Err(e) => {
                        report.warn(source, FileProblem::NotText);
                        (stripped, e.into_bytes(), FileAction::Copied)
                    }
                }
            }
            None => (output, bytes, FileAction::Copied),
        };

        let destination = report.root.join(&output);
        if let Err(e) = write_file(&destination, &contents) {
            warn!(path = %output, error = %e, "failed to write output file");
            report.warn(source, FileProblem::WriteFailed {
                reason: e.to_string(),
            });
            return;
        }

        debug!(source = %source.display(), output = %output, ?action, "wrote file");
        report.files.push(MaterializedFile {
            source: source.to_path_buf(),
            output: PathBuf::from(output),
            action,
            executable: false,
        });
    }

    /// `Some(path without suffix)` if the file name ends with the template
    /// suffix and is longer than it
    fn strip_template_suffix<'p>(&self, output: &'p str) -> Option<&'p str> {
        let suffix = self.options.template_suffix.as_str();
        if suffix.is_empty() {
            return None;
        }

        let file_name = Path::new(output).file_name()?.to_str()?;
        if file_name.len() > suffix.len() && file_name.ends_with(suffix) {
            output.strip_suffix(suffix)
        } else {
            None
        }
    }

    fn render(
        &self,
        template_dir: &Path,
        source_path: &Path,
        text: &str,
        vars: &VariableStore,
    ) -> crate::template::Rendered {
        let base_dir = source_path.parent().unwrap_or(template_dir);
        let resolver = FsIncludeResolver::with_root(base_dir, template_dir);
        let context = TemplateContext::new(vars).with_includes(&resolver);
        self.engine.render(text, &context)
    }

    fn is_executable_name(&self, output: &Path) -> bool {
        let Some(name) = output.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.options
            .executable_suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && name.ends_with(suffix.as_str()))
    }

    fn mark_executables(&self, report: &mut MaterializeReport) {
        let mut failures = Vec::new();

        for file in report.files.iter_mut() {
            if !self.is_executable_name(&file.output) {
                continue;
            }
            match set_executable(&report.root.join(&file.output)) {
                Ok(applied) => file.executable = applied,
                Err(e) => {
                    warn!(path = %file.output.display(), error = %e, "failed to set permissions");
                    failures.push((file.source.clone(), e.to_string()));
                }
            }
        }

        for (source, reason) in failures {
            report.warn(&source, FileProblem::PermissionFailed { reason });
        }
    }
}

/// Materialize with default settings
///
/// See [`Materializer::materialize`].
pub fn materialize(
    template_dir: &Path,
    project_name: &str,
    vars: &VariableStore,
    target_dir: &Path,
) -> Result<MaterializeReport> {
    Materializer::new().materialize(template_dir, project_name, vars, target_dir)
}

fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}

/// Set mode 0o755; `Ok(false)` where modes do not exist
#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<bool> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(true)
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<bool> {
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_testkit::{temp_dir_in_workspace, write_tree};

    fn vars() -> VariableStore {
        VariableStore::load("PROJECT_NAME=demo\nPROJECT_TYPE=php\nUSE_DOCKER=true")
    }

    #[test]
    fn test_strip_template_suffix() {
        let m = Materializer::new();
        assert_eq!(m.strip_template_suffix("a/config.json.template"), Some("a/config.json"));
        assert_eq!(m.strip_template_suffix("a/.template"), None);
        assert_eq!(m.strip_template_suffix("README.md"), None);
        assert_eq!(m.strip_template_suffix("x.template/README.md"), None);
    }

    #[test]
    fn test_custom_template_suffix() {
        let m = Materializer::new().with_options(MaterializeOptions {
            template_suffix: ".tmpl".to_string(),
            ..Default::default()
        });
        assert_eq!(m.strip_template_suffix("main.go.tmpl"), Some("main.go"));
        assert_eq!(m.strip_template_suffix("main.go.template"), None);
    }

    #[test]
    fn test_is_executable_name() {
        let m = Materializer::new();
        assert!(m.is_executable_name(Path::new("scripts/setup.sh")));
        assert!(!m.is_executable_name(Path::new("setup.sh.bak")));
    }

    #[test]
    fn test_missing_template_dir() {
        let temp = temp_dir_in_workspace();
        let result = materialize(&temp.path().join("nope"), "demo", &vars(), temp.path());
        assert!(matches!(result, Err(WarpError::TemplateNotFound { .. })));
        assert!(!temp.path().join("demo").exists());
    }

    #[test]
    fn test_template_dir_is_file() {
        let temp = temp_dir_in_workspace();
        write_tree(temp.path(), &[("file.txt", "x")]);
        let result = materialize(&temp.path().join("file.txt"), "demo", &vars(), temp.path());
        assert!(matches!(result, Err(WarpError::TemplateNotDirectory { .. })));
    }

    #[test]
    fn test_invalid_project_name_writes_nothing() {
        let temp = temp_dir_in_workspace();
        let template = temp.path().join("tpl");
        write_tree(&template, &[("README.md", "x")]);
        let out = temp.path().join("out");

        let result = materialize(&template, "../evil", &vars(), &out);
        assert!(matches!(result, Err(WarpError::InvalidName(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_rejected_output_path() {
        let temp = temp_dir_in_workspace();
        let template = temp.path().join("tpl");
        write_tree(&template, &[("{{ESCAPE}}/x.txt", "x"), ("ok.txt", "ok")]);
        let out = temp.path().join("out");
        let vars = VariableStore::load("ESCAPE=..");

        let report = materialize(&template, "demo", &vars, &out).unwrap();
        assert_eq!(report.files.len(), 1);
        assert!(report.warnings.iter().any(|w| matches!(
            &w.problem,
            FileProblem::RejectedPath { output } if output == ".."
        )));
        assert!(!out.join("x.txt").exists());
    }

    #[test]
    fn test_empty_directories_are_created() {
        let temp = temp_dir_in_workspace();
        let template = temp.path().join("tpl");
        std::fs::create_dir_all(template.join("{{PROJECT_NAME}}/empty")).unwrap();
        let out = temp.path().join("out");

        let report = materialize(&template, "demo", &vars(), &out).unwrap();
        assert!(report.files.is_empty());
        assert!(out.join("demo/demo/empty").is_dir());
    }

    #[test]
    fn test_non_utf8_template_copied_with_warning() {
        let temp = temp_dir_in_workspace();
        let template = temp.path().join("tpl");
        std::fs::create_dir_all(&template).unwrap();
        std::fs::write(template.join("logo.bin.template"), [0xff, 0xfe, 0x00]).unwrap();
        let out = temp.path().join("out");

        let report = materialize(&template, "demo", &vars(), &out).unwrap();
        assert_eq!(std::fs::read(out.join("demo/logo.bin")).unwrap(), vec![0xff, 0xfe, 0x00]);
        assert_eq!(report.files[0].action, FileAction::Copied);
        assert_eq!(report.warnings[0].problem, FileProblem::NotText);
    }

    #[test]
    fn test_output_root_inside_template_dir_is_skipped() {
        let temp = temp_dir_in_workspace();
        let template = temp.path().join("tpl");
        write_tree(&template, &[("a.txt", "a"), ("sub/.keep", "")]);

        // Template spelled through `sub/..`, output root created inside it
        let report = materialize(&template.join("sub").join(".."), "demo", &vars(), &template)
            .unwrap();

        assert!(template.join("demo/a.txt").is_file());
        assert!(!template.join("demo/demo").exists());
        assert_eq!(report.files.len(), 2);
        assert!(report.files.iter().all(|f| !f.source.starts_with("demo")));
    }

    #[test]
    fn test_warning_display() {
        let warning = FileWarning {
            path: PathBuf::from("src/main.php.template"),
            problem: FileProblem::Template {
                diagnostic: Diagnostic::UnknownFunction {
                    name: "reverse".to_string(),
                },
            },
        };
        assert_eq!(
            warning.to_string(),
            "src/main.php.template: Unknown function 'reverse', substituted empty text"
        );
    }

    #[test]
    fn test_warning_serializes_flat() {
        let warning = FileWarning {
            path: PathBuf::from("a.txt"),
            problem: FileProblem::ReadFailed {
                reason: "denied".to_string(),
            },
        };
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "path": "a.txt", "kind": "read_failed", "reason": "denied" })
        );
    }
}

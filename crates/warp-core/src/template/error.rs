//! Template error and diagnostic types

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Fatal template errors
///
/// Rendering itself never fails; only locating the template can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Template file does not exist
    NotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// Template file exists but is not UTF-8 text
    NotText {
        /// The offending file
        path: PathBuf,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::NotFound { path } => {
                write!(f, "Template '{}' not found", path.display())
            }
            TemplateError::NotText { path } => {
                write!(f, "Template '{}' is not valid UTF-8 text", path.display())
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Recoverable anomaly found while rendering a template
///
/// The offending token is replaced (or kept) and rendering continues; the
/// diagnostic is handed back to the caller to surface as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `{{include:...}}` named a file that does not exist
    IncludeNotFound { path: String },

    /// `{{include:...}}` named an absolute path or one leaving the template directory
    IncludeRejected { path: String },

    /// `{{include:...}}` recursed into itself or nested too deeply
    IncludeCycle { path: String },

    /// `{{function:...}}` named a function that is not registered
    UnknownFunction { name: String },

    /// `{{#each_...}}` block left unexpanded (loops are not executed)
    UnexpandedLoop { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::IncludeNotFound { path } => {
                write!(f, "Include '{}' not found, substituted empty text", path)
            }
            Diagnostic::IncludeRejected { path } => {
                write!(
                    f,
                    "Include '{}' must be a relative path inside the template directory",
                    path
                )
            }
            Diagnostic::IncludeCycle { path } => {
                write!(
                    f,
                    "Include '{}' is recursive or nested too deeply, substituted empty text",
                    path
                )
            }
            Diagnostic::UnknownFunction { name } => {
                write!(f, "Unknown function '{}', substituted empty text", name)
            }
            Diagnostic::UnexpandedLoop { name } => {
                write!(
                    f,
                    "Loop block '{{{{#each_{}}}}}' is not supported and was left as-is",
                    name
                )
            }
        }
    }
}

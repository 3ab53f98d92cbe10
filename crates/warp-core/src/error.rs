use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarpError {
    // Template errors
    #[error("TEMPLATE_NOT_FOUND: template '{path}' does not exist")]
    TemplateNotFound { path: PathBuf },

    #[error("TEMPLATE_NOT_DIRECTORY: template path '{path}' is not a directory")]
    TemplateNotDirectory { path: PathBuf },

    // Project errors
    #[error("INVALID_NAME: {0}")]
    InvalidName(String),

    #[error("PROJECT_EXISTS: output directory '{path}' already exists")]
    ProjectExists { path: PathBuf },

    #[error("PROJECT_TYPE_UNKNOWN: unknown project type '{0}' (expected python, javascript, wordpress or php)")]
    ProjectTypeUnknown(String),

    // Variable errors
    #[error("VARS_READ_ERROR: failed to read variables from '{path}': {reason}")]
    VarsReadError { path: PathBuf, reason: String },

    #[error("VARS_INVALID_ASSIGNMENT: expected KEY=VALUE, got '{0}'")]
    VarsInvalidAssignment(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl From<crate::template::error::TemplateError> for WarpError {
    fn from(err: crate::template::error::TemplateError) -> Self {
        match err {
            crate::template::error::TemplateError::NotFound { path } => {
                WarpError::TemplateNotFound { path }
            }
            other => WarpError::Generic(format!("Template error: {}", other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, WarpError>;

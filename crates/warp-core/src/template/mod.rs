//! Template module - Pure text substitution template engine
//!
//! Templates are plain text with `{{...}}` placeholders. Nothing is evaluated
//! beyond the placeholders themselves, so the same engine serves source
//! files, configuration files and path names.
//!
//! ## Syntax
//!
//! - Variables: `{{PROJECT_NAME}}` (exact key, no trimming)
//! - Conditionals: `{{#if_docker}} ... {{/if_docker}}` (flat, not nested)
//! - Includes: `{{include:partials/header.txt}}` (relative to the template)
//! - Functions: `{{function:uppercase:text}}`, `{{function:uuid}}`
//! - Loops: `{{#each_items}} ... {{/each_items}}` (recognized, left as-is)

pub mod engine;
pub mod error;

pub use engine::{
    render, substitute_path, FsIncludeResolver, FunctionRegistry, IncludeLookup,
    IncludeResolver, NoIncludes, Rendered, TemplateContext, TemplateEngine,
};
pub use error::{Diagnostic, TemplateError};

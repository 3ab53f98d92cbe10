//! Template engine implementation
//!
//! Rendering runs five passes in a fixed order, each over the output of the
//! previous one:
//!
//! 1. conditional blocks (`{{#if_COND}}...{{/if_COND}}`)
//! 2. includes (`{{include:PATH}}`)
//! 3. loop blocks (`{{#each_X}}`, recognized but left as-is)
//! 4. function calls (`{{function:NAME:ARGS}}`)
//! 5. variables (`{{KEY}}`)
//!
//! Rendering never fails. Anything recoverable is reported as a
//! [`Diagnostic`] next to the output.

mod blocks;
mod functions;
mod helpers;
mod includes;
mod tokenize;

use crate::condition::ConditionRegistry;
use crate::template::error::{Diagnostic, TemplateError};
use crate::vars::VariableStore;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

pub use functions::{
    camel_case, kebab_case, pascal_case, snake_case, FunctionRegistry, TemplateFn,
};
pub use includes::{
    FsIncludeResolver, IncludeLookup, IncludeResolver, NoIncludes, MAX_INCLUDE_DEPTH,
};

use blocks::{scan_loops, strip_conditionals};
use helpers::{apply_functions, substitute_variables};
use includes::expand_includes;

/// Variables and include source for one render
#[derive(Clone, Copy)]
pub struct TemplateContext<'a> {
    vars: &'a VariableStore,
    includes: &'a dyn IncludeResolver,
}

impl<'a> TemplateContext<'a> {
    /// Context without includes (every include is reported missing)
    pub fn new(vars: &'a VariableStore) -> Self {
        Self {
            vars,
            includes: &NoIncludes,
        }
    }

    /// Use `includes` to resolve `{{include:...}}` tokens
    pub fn with_includes(mut self, includes: &'a dyn IncludeResolver) -> Self {
        self.includes = includes;
        self
    }

    /// Get the variable store
    pub fn vars(&self) -> &VariableStore {
        self.vars
    }
}

/// Render output together with the diagnostics it produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Template engine with its condition and function tables
#[derive(Debug, Default)]
pub struct TemplateEngine {
    conditions: ConditionRegistry,
    functions: FunctionRegistry,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in conditions and functions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over custom tables
    pub fn with_registries(conditions: ConditionRegistry, functions: FunctionRegistry) -> Self {
        Self {
            conditions,
            functions,
        }
    }

    pub fn conditions(&self) -> &ConditionRegistry {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut ConditionRegistry {
        &mut self.conditions
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Render a template with the given context
    pub fn render(&self, template: &str, context: &TemplateContext<'_>) -> Rendered {
        let mut diagnostics = Vec::new();

        let text = strip_conditionals(template, &self.conditions, context.vars);
        let text = expand_includes(&text, context.includes, &mut diagnostics);
        scan_loops(&text, &mut diagnostics);
        let text = apply_functions(&text, &self.functions, &mut diagnostics);
        let output = substitute_variables(&text, context.vars);

        for diagnostic in &diagnostics {
            debug!(%diagnostic, "template diagnostic");
        }

        Rendered {
            output,
            diagnostics,
        }
    }

    /// Read and render a template file
    ///
    /// Includes resolve relative to the file's directory and may not leave it.
    ///
    /// # Errors
    ///
    /// `NotFound` if the file cannot be read, `NotText` if it is not UTF-8.
    pub fn render_file(
        &self,
        path: impl AsRef<Path>,
        vars: &VariableStore,
    ) -> Result<Rendered, TemplateError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            debug!(path = %path.display(), error = %e, "template not readable");
            TemplateError::NotFound {
                path: path.to_path_buf(),
            }
        })?;
        let template = String::from_utf8(bytes).map_err(|_| TemplateError::NotText {
            path: path.to_path_buf(),
        })?;

        let base_dir = path.parent().unwrap_or(Path::new(""));
        let resolver = FsIncludeResolver::new(base_dir);
        let context = TemplateContext::new(vars).with_includes(&resolver);

        Ok(self.render(&template, &context))
    }
}

/// Substitute variables in a path template (variable pass only)
///
/// # Examples
///
/// ```
/// use warp_core::template::substitute_path;
/// use warp_core::vars::VariableStore;
///
/// let vars = VariableStore::load("PROJECT_NAME=demo");
/// assert_eq!(substitute_path("src/{{PROJECT_NAME}}.php.template", &vars), "src/demo.php.template");
/// ```
pub fn substitute_path(path: &str, vars: &VariableStore) -> String {
    substitute_variables(path, vars)
}

/// Convenience function to render a template with the default engine
pub fn render(template: &str, context: &TemplateContext<'_>) -> Rendered {
    TemplateEngine::new().render(template, context)
}

#[cfg(test)]
mod tests;

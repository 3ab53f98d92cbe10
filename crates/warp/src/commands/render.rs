//! Render command - render one template file to stdout

use crate::cli::VarArgs;
use crate::context::apply_overrides;
use crate::output::{print_raw, print_warning};
use anyhow::Result;
use std::path::Path;
use tracing::debug;
use warp_core::WarpError;
use warp_core::template::TemplateEngine;
use warp_core::vars::VariableStore;

/// Render `file` with the given variables
///
/// Includes resolve relative to the file's directory. Diagnostics go to
/// stderr; the rendered text goes to stdout unchanged.
pub fn run(file: &Path, vars: &VarArgs) -> Result<()> {
    let store = apply_overrides(VariableStore::new(), vars)?;
    debug!(file = %file.display(), variables = store.len(), "rendering template");

    let rendered = TemplateEngine::new()
        .render_file(file, &store)
        .map_err(WarpError::from)?;

    for diagnostic in &rendered.diagnostics {
        print_warning(diagnostic);
    }
    print_raw(&rendered.output)?;

    Ok(())
}

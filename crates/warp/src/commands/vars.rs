//! Vars command - print generated project variables

use crate::cli::ProjectArgs;
use crate::context::{Context, apply_overrides};
use crate::output::print_raw;
use anyhow::Result;
use warp_core::project::ProjectVariables;

/// Print the `KEY=VALUE` blob `warp new` would render with
pub fn run(ctx: &Context, project: &ProjectArgs) -> Result<()> {
    let generated = ProjectVariables::generate(&ctx.project_spec(project));

    if project.vars.is_empty() {
        print_raw(generated.as_str())?;
    } else {
        let store = apply_overrides(generated.to_store(), &project.vars)?;
        print_raw(&store.to_env_text())?;
    }

    Ok(())
}

//! New command - create a project from a template directory

use crate::cli::ProjectArgs;
use crate::context::{Context, apply_overrides};
use crate::output::{print_json, print_warning};
use anyhow::{Context as _, Result};
use colored::Colorize;
use std::env;
use std::path::PathBuf;
use warp_core::project::{
    FileAction, MaterializeReport, Materializer, ProjectVariables, prepare_project_dir,
};

/// Create a new project
///
/// # Arguments
///
/// * `project` - Name, type and variable flags
/// * `template` - Template directory override
/// * `output` - Parent directory of the project (default: current directory)
/// * `force` - Write into an existing project directory
/// * `json` - Print the materialization report as JSON
pub fn run(
    ctx: &Context,
    project: ProjectArgs,
    template: Option<PathBuf>,
    output: Option<PathBuf>,
    force: bool,
    json: bool,
) -> Result<()> {
    let target_dir = match output {
        Some(dir) => dir,
        None => env::current_dir()?,
    };
    let template_dir = ctx.template_dir(template, project.project_type)?;

    // Fails early on a bad name or an existing directory
    prepare_project_dir(&target_dir, &project.name, force)?;

    let spec = ctx.project_spec(&project);
    let vars = apply_overrides(ProjectVariables::generate(&spec).to_store(), &project.vars)?;

    if ctx.verbose && !json {
        println!(
            "{} Creating {} project '{}' from {}",
            "→".cyan(),
            spec.project_type,
            spec.name,
            template_dir.display()
        );
    }

    let report = Materializer::new()
        .with_options(ctx.config.materialize_options())
        .materialize(&template_dir, &project.name, &vars, &target_dir)
        .with_context(|| format!("Failed to create project '{}'", project.name))?;

    if json {
        print_json(&serde_json::to_string_pretty(&report)?)?;
    } else {
        render_human(&project.name, &report, ctx.verbose);
    }

    Ok(())
}

fn render_human(name: &str, report: &MaterializeReport, verbose: bool) {
    if verbose {
        for file in &report.files {
            let marker = match file.action {
                FileAction::Rendered => "rendered",
                FileAction::Copied => "copied",
            };
            println!("  {} {} ({})", "+".green(), file.output.display(), marker);
        }
    }

    for warning in &report.warnings {
        print_warning(warning);
    }

    println!(
        "{} Created project '{}' at {} ({} rendered, {} copied)",
        "✓".green().bold(),
        name,
        report.root.display(),
        report.rendered_count(),
        report.copied_count()
    );

    if report.has_warnings() {
        println!(
            "{} {} warning(s), see above",
            "⚠".yellow().bold(),
            report.warnings.len()
        );
    }

    println!("\n{} Next steps:", "→".cyan());
    println!("  cd {}", name);
}

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::Context;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::New {
            project,
            template,
            output,
            force,
            json,
        } => Context::new(cli.config.as_deref(), cli.verbose).and_then(|ctx| {
            commands::new::run(&ctx, project, template, output, force, json)
        }),
        Commands::Render { file, vars } => commands::render::run(&file, &vars),
        Commands::Vars { project } => Context::new(cli.config.as_deref(), cli.verbose)
            .and_then(|ctx| commands::vars::run(&ctx, &project)),
        Commands::Functions { json } => commands::functions::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use warp_core::project::ProjectType;

#[derive(Parser)]
#[command(name = "warp")]
#[command(version, about = "Scaffold projects from template directories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: $WARP_CONFIG, then <config dir>/warp/warp.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project from a template directory
    New {
        #[command(flatten)]
        project: ProjectArgs,

        /// Template directory (default: <templates.root>/<type>)
        #[arg(long, value_name = "DIR")]
        template: Option<PathBuf>,

        /// Directory the project is created in (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Write into an existing project directory
        #[arg(short, long)]
        force: bool,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a single template file to stdout
    Render {
        /// Template file
        file: PathBuf,

        #[command(flatten)]
        vars: VarArgs,
    },

    /// Print the variables generated for a project
    Vars {
        #[command(flatten)]
        project: ProjectArgs,
    },

    /// List template functions and conditions
    Functions {
        #[arg(long)]
        json: bool,
    },
}

/// Description of the project to generate variables for
#[derive(Args)]
pub struct ProjectArgs {
    /// Project name (becomes the directory name)
    pub name: String,

    /// Project type: python, javascript, wordpress or php
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub project_type: ProjectType,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Author name (default: [defaults] author)
    #[arg(long)]
    pub author: Option<String>,

    /// Author email (default: [defaults] email)
    #[arg(long)]
    pub email: Option<String>,

    /// Set USE_DOCKER=true
    #[arg(long)]
    pub docker: bool,

    /// Set INCLUDE_TESTING=true
    #[arg(long)]
    pub testing: bool,

    /// Set INCLUDE_CI=true
    #[arg(long)]
    pub ci: bool,

    #[command(flatten)]
    pub vars: VarArgs,
}

/// Extra variables layered over the generated ones
#[derive(Args, Default)]
pub struct VarArgs {
    /// KEY=VALUE file whose entries override generated variables
    #[arg(long, value_name = "FILE")]
    pub vars_file: Option<PathBuf>,

    /// Set a single variable; may be repeated, wins over --vars-file
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub var: Vec<String>,
}

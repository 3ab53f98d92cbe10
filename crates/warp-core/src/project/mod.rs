//! Project scaffolding: name checks, variable generation and materialization

pub mod create;
pub mod materialize;
pub mod variables;

pub use create::{prepare_project_dir, validate_name};
pub use materialize::{
    materialize, FileAction, FileProblem, FileWarning, MaterializeOptions, MaterializeReport,
    MaterializedFile, Materializer,
};
pub use variables::{ProjectSpec, ProjectType, ProjectVariables, ToolchainVersions};

//! Global context for CLI commands

use crate::cli::{ProjectArgs, VarArgs};
use anyhow::{Context as _, Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::debug;
use warp_core::config::WarpConfig;
use warp_core::project::{ProjectSpec, ProjectType};
use warp_core::vars::VariableStore;

/// Loaded configuration plus global flags
pub struct Context {
    pub config: WarpConfig,
    pub verbose: bool,
}

impl Context {
    /// Create a new context by loading the config
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit or `$WARP_CONFIG` config file is
    /// missing, or any config file cannot be parsed.
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let config = WarpConfig::load(config_path)?;
        Ok(Self { config, verbose })
    }

    /// Project description from arguments, falling back to `[defaults]`
    pub fn project_spec(&self, args: &ProjectArgs) -> ProjectSpec {
        let defaults = &self.config.defaults;
        let mut spec = ProjectSpec::new(args.name.clone(), args.project_type);

        spec.description = args.description.clone().unwrap_or_default();
        spec.author = args
            .author
            .clone()
            .or_else(|| defaults.author.clone())
            .unwrap_or_default();
        spec.email = args
            .email
            .clone()
            .or_else(|| defaults.email.clone())
            .unwrap_or_default();
        spec.use_docker = args.docker;
        spec.include_testing = args.testing;
        spec.include_ci = args.ci;
        spec.versions = self.config.toolchain_versions();

        spec
    }

    /// Template directory: `--template`, else the configured location
    pub fn template_dir(
        &self,
        explicit: Option<PathBuf>,
        project_type: ProjectType,
    ) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir);
        }
        let dir = self
            .config
            .template_dir(project_type)
            .ok_or_else(|| anyhow!("Could not determine data directory; pass --template"))?;
        debug!(path = %dir.display(), "using configured template directory");
        Ok(dir)
    }
}

/// Layer `--vars-file` and then `--var` over `base`
pub fn apply_overrides(mut base: VariableStore, args: &VarArgs) -> Result<VariableStore> {
    if let Some(path) = &args.vars_file {
        base.merge(&VariableStore::from_file(path)?);
    }
    for assignment in &args.var {
        let (key, value) = VariableStore::parse_assignment(assignment)
            .with_context(|| format!("invalid --var '{}'", assignment))?;
        base.insert(key, value);
    }
    Ok(base)
}

impl VarArgs {
    pub fn is_empty(&self) -> bool {
        self.vars_file.is_none() && self.var.is_empty()
    }
}

use crate::error::{Result, WarpError};
use crate::project::{MaterializeOptions, ProjectType, ToolchainVersions};
use crate::project::materialize::{DEFAULT_EXECUTABLE_SUFFIXES, DEFAULT_TEMPLATE_SUFFIX};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name
pub const CONFIG_FILE: &str = "warp.toml";

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "WARP_CONFIG";

/// warp.toml schema
///
/// Every section and field is optional; a missing file means defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpConfig {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding one template directory per project type
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default = "default_executable_suffixes")]
    pub executable_suffixes: Vec<String>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: None,
            suffix: default_suffix(),
            executable_suffixes: default_executable_suffixes(),
        }
    }
}

fn default_suffix() -> String {
    DEFAULT_TEMPLATE_SUFFIX.to_string()
}

fn default_executable_suffixes() -> Vec<String> {
    DEFAULT_EXECUTABLE_SUFFIXES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Values used when the command line leaves them out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub python_version: Option<String>,
    #[serde(default)]
    pub node_version: Option<String>,
    #[serde(default)]
    pub php_version: Option<String>,
}

impl WarpConfig {
    /// Read warp.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WarpError::ConfigParseError(format!("failed to read '{}': {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            WarpError::ConfigParseError(format!("invalid '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.templates.suffix.contains(['/', '\\']) {
            return Err(WarpError::ConfigInvalidValue {
                field: "templates.suffix".to_string(),
                reason: format!("'{}' must not contain path separators", self.templates.suffix),
            });
        }
        if let Some(suffix) = self.templates.executable_suffixes.iter().find(|s| s.is_empty()) {
            return Err(WarpError::ConfigInvalidValue {
                field: "templates.executable_suffixes".to_string(),
                reason: format!("'{}' is empty", suffix),
            });
        }
        Ok(())
    }

    /// Load the config from the first location that applies
    ///
    /// 1. `explicit` (`--config`), which must exist
    /// 2. `$WARP_CONFIG`, which must exist
    /// 3. `<config_dir>/warp/warp.toml`, used only if present
    ///
    /// With none of these, defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::load_from(explicit, env_path.as_deref(), Self::default_path().as_deref())
    }

    /// [`WarpConfig::load`] with the environment and platform lookups supplied
    pub fn load_from(
        explicit: Option<&Path>,
        env_path: Option<&Path>,
        default_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = explicit.or(env_path) {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        match default_path {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/warp/warp.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("warp").join(CONFIG_FILE))
    }

    /// Template directory for a project type
    ///
    /// `<templates.root>/<type>` if a root is configured, else
    /// `<data_dir>/warp/templates/<type>`.
    pub fn template_dir(&self, project_type: ProjectType) -> Option<PathBuf> {
        let root = match &self.templates.root {
            Some(root) => root.clone(),
            None => dirs::data_dir()?.join("warp").join("templates"),
        };
        Some(root.join(project_type.as_str()))
    }

    pub fn materialize_options(&self) -> MaterializeOptions {
        MaterializeOptions {
            template_suffix: self.templates.suffix.clone(),
            executable_suffixes: self.templates.executable_suffixes.clone(),
        }
    }

    /// Toolchain versions with configured overrides applied
    pub fn toolchain_versions(&self) -> ToolchainVersions {
        let mut versions = ToolchainVersions::default();
        if let Some(v) = &self.defaults.python_version {
            versions.python = v.clone();
        }
        if let Some(v) = &self.defaults.node_version {
            versions.node = v.clone();
        }
        if let Some(v) = &self.defaults.php_version {
            versions.php = v.clone();
        }
        versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_testkit::{temp_dir_in_workspace, with_isolated_warp_env};

    #[test]
    fn test_parse_empty_config() {
        let config: WarpConfig = toml::from_str("").unwrap();
        assert_eq!(config, WarpConfig::default());
        assert_eq!(config.templates.suffix, ".template");
        assert_eq!(config.templates.executable_suffixes, vec![".sh".to_string()]);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[templates]
root = "/opt/warp/templates"
suffix = ".tmpl"
executable_suffixes = [".sh", ".bash"]

[defaults]
author = "Alice"
email = "alice@example.com"
python_version = "3.11"
node_version = "22"
php_version = "8.3"
"#;
        let config: WarpConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.templates.root.as_deref(),
            Some(Path::new("/opt/warp/templates"))
        );
        assert_eq!(config.templates.suffix, ".tmpl");
        assert_eq!(config.defaults.author.as_deref(), Some("Alice"));

        let versions = config.toolchain_versions();
        assert_eq!(versions.python, "3.11");
        assert_eq!(versions.node, "22");
        assert_eq!(versions.php, "8.3");
    }

    #[test]
    fn test_partial_defaults_keep_builtin_versions() {
        let config: WarpConfig = toml::from_str("[defaults]\nnode_version = \"18\"").unwrap();
        let versions = config.toolchain_versions();
        assert_eq!(versions.node, "18");
        assert_eq!(versions.python, ToolchainVersions::default().python);
    }

    #[test]
    fn test_template_dir_from_root() {
        let config: WarpConfig = toml::from_str("[templates]\nroot = \"tpl\"").unwrap();
        assert_eq!(
            config.template_dir(ProjectType::Wordpress),
            Some(PathBuf::from("tpl/wordpress"))
        );
    }

    #[test]
    fn test_from_file_roundtrip() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join(CONFIG_FILE);

        let mut config = WarpConfig::default();
        config.defaults.author = Some("Bob".to_string());
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(WarpConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[templates\n").unwrap();

        let err = WarpConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("CONFIG_PARSE_ERROR"));
    }

    #[test]
    fn test_invalid_suffix_rejected() {
        let temp = temp_dir_in_workspace();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[templates]\nsuffix = \"a/b\"\n").unwrap();

        let err = WarpConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, WarpError::ConfigInvalidValue { ref field, .. } if field == "templates.suffix"));
    }

    #[test]
    fn test_load_from_precedence() {
        let temp = temp_dir_in_workspace();
        let explicit = temp.path().join("explicit.toml");
        let env = temp.path().join("env.toml");
        std::fs::write(&explicit, "[defaults]\nauthor = \"explicit\"\n").unwrap();
        std::fs::write(&env, "[defaults]\nauthor = \"env\"\n").unwrap();

        let config = WarpConfig::load_from(Some(&explicit), Some(&env), None).unwrap();
        assert_eq!(config.defaults.author.as_deref(), Some("explicit"));

        let config = WarpConfig::load_from(None, Some(&env), None).unwrap();
        assert_eq!(config.defaults.author.as_deref(), Some("env"));
    }

    #[test]
    fn test_load_from_missing_default_is_ok() {
        let temp = temp_dir_in_workspace();
        let config =
            WarpConfig::load_from(None, None, Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config, WarpConfig::default());
    }

    #[test]
    fn test_load_from_missing_explicit_is_error() {
        let temp = temp_dir_in_workspace();
        let result = WarpConfig::load_from(Some(&temp.path().join("absent.toml")), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reads_platform_config_file() {
        with_isolated_warp_env(|_home| {
            assert_eq!(WarpConfig::load(None).unwrap(), WarpConfig::default());

            let path = WarpConfig::default_path().unwrap();
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "[defaults]\nemail = \"me@example.com\"\n").unwrap();

            let config = WarpConfig::load(None).unwrap();
            assert_eq!(config.defaults.email.as_deref(), Some("me@example.com"));
        });
    }
}

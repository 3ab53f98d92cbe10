//! Project variable generation
//!
//! Turns what the user asked for (name, type, feature flags) into the
//! `KEY=VALUE` blob every template of a new project is rendered with.

use crate::error::{Result, WarpError};
use crate::vars::VariableStore;
use chrono::{Datelike, Local, NaiveDate};
use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToShoutySnakeCase, ToSnakeCase};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of project to scaffold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Python,
    Javascript,
    Wordpress,
    Php,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::Python,
        ProjectType::Javascript,
        ProjectType::Wordpress,
        ProjectType::Php,
    ];

    /// Canonical name, also the `PROJECT_TYPE` value and template directory name
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Python => "python",
            ProjectType::Javascript => "javascript",
            ProjectType::Wordpress => "wordpress",
            ProjectType::Php => "php",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = WarpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(ProjectType::Python),
            "javascript" | "js" | "node" => Ok(ProjectType::Javascript),
            "wordpress" | "wp" | "wordpress-plugin" => Ok(ProjectType::Wordpress),
            "php" => Ok(ProjectType::Php),
            _ => Err(WarpError::ProjectTypeUnknown(s.to_string())),
        }
    }
}

/// Toolchain versions written into generated projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainVersions {
    pub python: String,
    pub node: String,
    pub php: String,
}

impl Default for ToolchainVersions {
    fn default() -> Self {
        Self {
            python: "3.12".to_string(),
            node: "20".to_string(),
            php: "8.2".to_string(),
        }
    }
}

/// User input describing a new project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
    pub project_type: ProjectType,
    pub description: String,
    pub author: String,
    pub email: String,
    pub use_docker: bool,
    pub include_testing: bool,
    pub include_ci: bool,
    pub versions: ToolchainVersions,
}

impl ProjectSpec {
    /// Spec with every optional field at its default
    pub fn new(name: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            name: name.into(),
            project_type,
            description: String::new(),
            author: String::new(),
            email: String::new(),
            use_docker: false,
            include_testing: false,
            include_ci: false,
            versions: ToolchainVersions::default(),
        }
    }
}

/// Generated `KEY=VALUE` blob for a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVariables {
    text: String,
}

impl ProjectVariables {
    /// Generate variables dated today
    pub fn generate(spec: &ProjectSpec) -> Self {
        Self::generate_on(spec, Local::now().date_naive())
    }

    /// Generate variables dated `date`
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use warp_core::project::{ProjectSpec, ProjectType, ProjectVariables};
    ///
    /// let spec = ProjectSpec::new("my-app", ProjectType::Python);
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    /// let store = ProjectVariables::generate_on(&spec, date).to_store();
    ///
    /// assert_eq!(store.get("PROJECT_NAME_PASCAL"), Some("MyApp"));
    /// assert_eq!(store.get("CURRENT_DATE"), Some("2026-01-15"));
    /// ```
    pub fn generate_on(spec: &ProjectSpec, date: NaiveDate) -> Self {
        let name = single_line(&spec.name);
        let description = if spec.description.trim().is_empty() {
            format!("A new {} project", spec.project_type)
        } else {
            single_line(&spec.description)
        };

        let mut entries: Vec<(&str, String)> = vec![
            ("PROJECT_NAME", name.clone()),
            ("PROJECT_NAME_SNAKE", name.to_snake_case()),
            ("PROJECT_NAME_KEBAB", name.to_kebab_case()),
            ("PROJECT_NAME_PASCAL", name.to_pascal_case()),
            ("PROJECT_NAME_CAMEL", name.to_lower_camel_case()),
            ("PROJECT_NAME_UPPER", name.to_shouty_snake_case()),
            ("PROJECT_TYPE", spec.project_type.to_string()),
            ("PROJECT_DESCRIPTION", description),
            ("AUTHOR_NAME", single_line(&spec.author)),
            ("AUTHOR_EMAIL", single_line(&spec.email)),
            ("CURRENT_YEAR", date.year().to_string()),
            ("CURRENT_DATE", date.format("%Y-%m-%d").to_string()),
            ("USE_DOCKER", spec.use_docker.to_string()),
            ("INCLUDE_TESTING", spec.include_testing.to_string()),
            ("INCLUDE_CI", spec.include_ci.to_string()),
            ("PYTHON_VERSION", single_line(&spec.versions.python)),
            ("NODE_VERSION", single_line(&spec.versions.node)),
            ("PHP_VERSION", single_line(&spec.versions.php)),
        ];

        if spec.project_type == ProjectType::Wordpress {
            entries.push(("PLUGIN_SLUG", name.to_kebab_case()));
            entries.push(("PLUGIN_PREFIX", format!("{}_", name.to_snake_case())));
            entries.push(("TEXT_DOMAIN", name.to_kebab_case()));
        }

        let mut text = format!("# Generated by warp on {}\n", date.format("%Y-%m-%d"));
        for (key, value) in entries {
            text.push_str(key);
            text.push('=');
            text.push_str(&value);
            text.push('\n');
        }

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Load the blob into a variable store
    pub fn to_store(&self) -> VariableStore {
        VariableStore::load(&self.text)
    }
}

impl fmt::Display for ProjectVariables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Keep user input on one line so the blob stays line-oriented
fn single_line(value: &str) -> String {
    value.replace(|c: char| c == '\n' || c == '\r', " ")
}

//! Condition evaluation for `{{#if_COND}}` blocks
//!
//! Conditions are looked up in a registration table. Names that are not
//! registered fall back to the variable of the same name, which must be the
//! literal string `"true"`.

use crate::vars::VariableStore;
use std::collections::BTreeMap;
use std::fmt;

/// Predicate over the variable store
pub type ConditionFn = Box<dyn Fn(&VariableStore) -> bool + Send + Sync>;

/// Registration table of named conditions
pub struct ConditionRegistry {
    conditions: BTreeMap<String, ConditionFn>,
}

impl ConditionRegistry {
    /// Registry with no conditions (every name falls back to its variable)
    pub fn empty() -> Self {
        Self {
            conditions: BTreeMap::new(),
        }
    }

    /// Registry with the built-in project conditions
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register("python", |vars| project_type(vars) == "python");
        for alias in ["javascript", "js", "node"] {
            registry.register(alias, |vars| {
                matches!(project_type(vars), "javascript" | "js" | "node")
            });
        }
        registry.register("wordpress", |vars| project_type(vars).contains("wordpress"));
        registry.register("php", |vars| {
            let ty = project_type(vars);
            ty == "php" || ty.contains("wordpress")
        });
        registry.register("docker", |vars| vars.is_true("USE_DOCKER"));
        registry.register("testing", |vars| vars.is_true("INCLUDE_TESTING"));
        registry.register("ci", |vars| vars.is_true("INCLUDE_CI"));

        registry
    }

    /// Add or replace a condition
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&VariableStore) -> bool + Send + Sync + 'static,
    {
        self.conditions.insert(name.into(), Box::new(predicate));
    }

    /// Evaluate a condition by name
    pub fn evaluate(&self, name: &str, vars: &VariableStore) -> bool {
        match self.conditions.get(name) {
            Some(predicate) => predicate(vars),
            None => vars.is_true(name),
        }
    }

    /// Check whether a name is registered (as opposed to a variable fallback)
    pub fn is_registered(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Registered condition names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionRegistry")
            .field("conditions", &self.conditions.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn project_type(vars: &VariableStore) -> &str {
    vars.get("PROJECT_TYPE").unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(name: &str, vars: &str) -> bool {
        ConditionRegistry::new().evaluate(name, &VariableStore::load(vars))
    }

    #[test]
    fn test_python() {
        assert!(eval("python", "PROJECT_TYPE=python"));
        assert!(!eval("python", "PROJECT_TYPE=Python"));
        assert!(!eval("python", "PROJECT_TYPE=javascript"));
    }

    #[test]
    fn test_javascript_aliases() {
        for name in ["javascript", "js", "node"] {
            for ty in ["javascript", "js", "node"] {
                assert!(eval(name, &format!("PROJECT_TYPE={}", ty)), "{name} / {ty}");
            }
            assert!(!eval(name, "PROJECT_TYPE=python"));
        }
    }

    #[test]
    fn test_wordpress_is_substring_match() {
        assert!(eval("wordpress", "PROJECT_TYPE=wordpress"));
        assert!(eval("wordpress", "PROJECT_TYPE=wordpress-plugin"));
        assert!(!eval("wordpress", "PROJECT_TYPE=php"));
    }

    #[test]
    fn test_php_includes_wordpress() {
        assert!(eval("php", "PROJECT_TYPE=php"));
        assert!(eval("php", "PROJECT_TYPE=wordpress-plugin"));
        assert!(!eval("php", "PROJECT_TYPE=python"));
    }

    #[test]
    fn test_feature_flags() {
        assert!(eval("docker", "USE_DOCKER=true"));
        assert!(!eval("docker", "USE_DOCKER=false"));
        assert!(!eval("docker", ""));
        assert!(eval("testing", "INCLUDE_TESTING=true"));
        assert!(eval("ci", "INCLUDE_CI=true"));
        assert!(!eval("ci", "INCLUDE_CI=yes"));
    }

    #[test]
    fn test_unregistered_name_falls_back_to_variable() {
        assert!(eval("USE_REDIS", "USE_REDIS=true"));
        assert!(!eval("USE_REDIS", "USE_REDIS=TRUE"));
        assert!(!eval("USE_REDIS", ""));
    }

    #[test]
    fn test_missing_project_type_is_false() {
        assert!(!eval("python", ""));
        assert!(!eval("php", ""));
    }

    #[test]
    fn test_register_custom_condition() {
        let mut registry = ConditionRegistry::new();
        registry.register("rust", |vars| vars.get("PROJECT_TYPE") == Some("rust"));
        assert!(registry.is_registered("rust"));
        assert!(registry.evaluate("rust", &VariableStore::load("PROJECT_TYPE=rust")));
    }

    #[test]
    fn test_names_lists_builtins() {
        let registry = ConditionRegistry::new();
        let names: Vec<_> = registry.names().collect();
        for expected in ["ci", "docker", "javascript", "js", "node", "php", "python", "testing", "wordpress"] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }
}

//! Text functions for `{{function:NAME:ARGS}}`

use chrono::Local;
use std::collections::BTreeMap;
use std::fmt;

/// Text transform: argument text in, replacement text out
pub type TemplateFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Registration table of template functions
pub struct FunctionRegistry {
    functions: BTreeMap<String, TemplateFn>,
}

impl FunctionRegistry {
    /// Registry with no functions
    pub fn empty() -> Self {
        Self {
            functions: BTreeMap::new(),
        }
    }

    /// Registry with the built-in functions
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register("uppercase", |s| s.to_uppercase());
        registry.register("lowercase", |s| s.to_lowercase());
        registry.register("snake_case", snake_case);
        registry.register("kebab_case", kebab_case);
        registry.register("camel_case", camel_case);
        registry.register("pascal_case", pascal_case);
        registry.register("current_year", |_| Local::now().format("%Y").to_string());
        registry.register("current_date", |_| {
            Local::now().format("%Y-%m-%d").to_string()
        });
        registry.register("uuid", |_| uuid::Uuid::new_v4().to_string());

        registry
    }

    /// Add or replace a function
    pub fn register<F>(&mut self, name: impl Into<String>, function: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Box::new(function));
    }

    /// Call a function; `None` if it is not registered
    pub fn call(&self, name: &str, args: &str) -> Option<String> {
        self.functions.get(name).map(|function| function(args))
    }

    /// Registered function names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// `my-name` → `my_name`
pub fn snake_case(s: &str) -> String {
    s.replace('-', "_").to_lowercase()
}

/// `My_Name` → `my-name`
pub fn kebab_case(s: &str) -> String {
    s.replace('_', "-").to_lowercase()
}

/// `my-name` → `myName`
pub fn camel_case(s: &str) -> String {
    join_capitalized(s, false)
}

/// `my-name` → `MyName`
pub fn pascal_case(s: &str) -> String {
    join_capitalized(s, true)
}

/// Drop `-`/`_` separators, upper-casing the letter after each one
///
/// Letters not following a separator keep their case, except the first,
/// which is forced by `capitalize_first`.
fn join_capitalized(s: &str, capitalize_first: bool) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_separator = false;

    for c in s.chars() {
        if c == '-' || c == '_' {
            after_separator = !out.is_empty();
            continue;
        }

        if out.is_empty() {
            if capitalize_first {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
        } else if after_separator {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        after_separator = false;
    }

    out
}

//! Variable store - ordered `KEY=VALUE` mapping driving substitution
//!
//! The store is built once per materialization from a line-oriented text blob
//! and is only read while templates are processed.
//!
//! ## Format
//!
//! ```text
//! # comment
//! PROJECT_NAME=demo
//! GREETING=hello = world
//! ```
//!
//! - Lines starting with `#` (after leading whitespace) and blank lines are skipped
//! - Lines without `=` are skipped
//! - The first `=` splits key from value; the value is kept verbatim
//! - A repeated key overwrites the earlier value

use crate::error::{Result, WarpError};
use std::collections::HashMap;
use std::path::Path;

/// Ordered mapping of variable name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl VariableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `KEY=VALUE` text blob
    ///
    /// Malformed lines are skipped; parsing never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use warp_core::vars::VariableStore;
    ///
    /// let store = VariableStore::load("# generated\n\nA=1\nA=2\nB= spaced ");
    /// assert_eq!(store.get("A"), Some("2"));
    /// assert_eq!(store.get("B"), Some(" spaced "));
    /// assert_eq!(store.len(), 2);
    /// ```
    pub fn load(text: &str) -> Self {
        let mut store = Self::new();

        for line in text.lines() {
            let line = line.trim_start();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if key.is_empty() {
                continue;
            }

            store.insert(key, value);
        }

        store
    }

    /// Read and parse a variables file
    ///
    /// # Errors
    ///
    /// Returns `VarsReadError` if the file cannot be read at all.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| WarpError::VarsReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::load(&text))
    }

    /// Parse a single `KEY=VALUE` assignment (command-line `--var`)
    pub fn parse_assignment(assignment: &str) -> Result<(String, String)> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(WarpError::VarsInvalidAssignment(assignment.to_string())),
        }
    }

    /// Insert or overwrite a variable; an existing key keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Overlay another store; its values win
    pub fn merge(&mut self, other: &VariableStore) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Look up a variable
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    /// Check whether a variable is defined
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Check whether a variable is literally `"true"`
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }

    /// Iterate variables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the store back to `KEY=VALUE` lines
    pub fn to_env_text(&self) -> String {
        let mut out = String::new();
        for (key, value) in self.iter() {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

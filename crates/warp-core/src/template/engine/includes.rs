//! Include expansion for `{{include:PATH}}`

use crate::path::{has_absolute_or_rooted_component, is_contained_relative, normalize_lexically};
use crate::template::error::Diagnostic;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::tokenize::{TokenKind, TokenStream};

/// Maximum include nesting before expansion stops
pub const MAX_INCLUDE_DEPTH: usize = 32;

/// Outcome of looking up an include path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeLookup {
    /// The include exists
    Found {
        /// Identity of the included text, used to detect cycles
        key: String,
        /// Raw text to splice in
        content: String,
    },
    /// Nothing by that name
    Missing,
    /// The path is not allowed (absolute, or outside the include root)
    Rejected,
}

/// Source of included text
pub trait IncludeResolver {
    fn resolve(&self, path: &str) -> IncludeLookup;
}

/// Resolver that knows no includes; every lookup is `Missing`
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIncludes;

impl IncludeResolver for NoIncludes {
    fn resolve(&self, _path: &str) -> IncludeLookup {
        IncludeLookup::Missing
    }
}

/// In-memory includes keyed by the exact path written in the token
impl IncludeResolver for HashMap<String, String> {
    fn resolve(&self, path: &str) -> IncludeLookup {
        match self.get(path) {
            Some(content) => IncludeLookup::Found {
                key: path.to_string(),
                content: content.clone(),
            },
            None => IncludeLookup::Missing,
        }
    }
}

/// Filesystem includes relative to a template's directory
///
/// Paths are joined onto `base_dir` and must stay inside `root` after `.` and
/// `..` are resolved lexically. Nested includes use the same base.
#[derive(Debug, Clone)]
pub struct FsIncludeResolver {
    base_dir: PathBuf,
    root: PathBuf,
}

impl FsIncludeResolver {
    /// Resolver whose base directory is also its root
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            root: base_dir.clone(),
            base_dir,
        }
    }

    /// Resolver for a template in `base_dir` that may reach anywhere under `root`
    ///
    /// If `base_dir` is not below `root`, paths resolve against `root` itself.
    pub fn with_root(base_dir: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            root: root.into(),
        }
    }
}

impl IncludeResolver for FsIncludeResolver {
    fn resolve(&self, path: &str) -> IncludeLookup {
        let requested = Path::new(path);
        if has_absolute_or_rooted_component(requested) {
            return IncludeLookup::Rejected;
        }

        let relative_base = self.base_dir.strip_prefix(&self.root).unwrap_or(Path::new(""));
        let joined = relative_base.join(requested);
        if !is_contained_relative(&joined) {
            return IncludeLookup::Rejected;
        }

        let relative = normalize_lexically(&joined);
        let full = self.root.join(&relative);
        match std::fs::read_to_string(&full) {
            Ok(content) => IncludeLookup::Found {
                key: relative.to_string_lossy().replace('\\', "/"),
                content,
            },
            Err(e) => {
                debug!(path = %full.display(), error = %e, "include not readable");
                IncludeLookup::Missing
            }
        }
    }
}

/// Replace every include token with the text it names
///
/// Spliced text is scanned for further include tokens only. Failed lookups
/// leave empty text and record a diagnostic.
pub(crate) fn expand_includes(
    text: &str,
    resolver: &dyn IncludeResolver,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let mut stack = Vec::new();
    expand(text, resolver, &mut stack, diagnostics)
}

fn expand(
    text: &str,
    resolver: &dyn IncludeResolver,
    stack: &mut Vec<String>,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for token in TokenStream::new(text) {
        let TokenKind::Include { path } = &token.kind else {
            continue;
        };

        output.push_str(&text[last..token.start]);
        last = token.end();

        match resolver.resolve(path) {
            IncludeLookup::Found { key, content } => {
                if stack.contains(&key) || stack.len() >= MAX_INCLUDE_DEPTH {
                    debug!(include = %path, depth = stack.len(), "include cycle");
                    diagnostics.push(Diagnostic::IncludeCycle { path: path.clone() });
                    continue;
                }

                stack.push(key);
                let expanded = expand(&content, resolver, stack, diagnostics);
                stack.pop();
                output.push_str(&expanded);
            }
            IncludeLookup::Missing => {
                debug!(include = %path, line = token.line, "include not found");
                diagnostics.push(Diagnostic::IncludeNotFound { path: path.clone() });
            }
            IncludeLookup::Rejected => {
                debug!(include = %path, line = token.line, "include rejected");
                diagnostics.push(Diagnostic::IncludeRejected { path: path.clone() });
            }
        }
    }

    output.push_str(&text[last..]);
    output
}

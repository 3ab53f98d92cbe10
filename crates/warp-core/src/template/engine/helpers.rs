//! Function and variable passes

use crate::template::error::Diagnostic;
use crate::vars::VariableStore;
use tracing::debug;

use super::functions::FunctionRegistry;
use super::tokenize::{TokenKind, TokenStream};

/// Replace `{{function:NAME[:ARGS]}}` tokens with the function result
///
/// Results are not scanned again by this pass. Unknown functions leave empty
/// text and record a diagnostic.
pub(crate) fn apply_functions(
    text: &str,
    functions: &FunctionRegistry,
    diagnostics: &mut Vec<Diagnostic>,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for token in TokenStream::new(text) {
        let TokenKind::Function { name, args } = &token.kind else {
            continue;
        };

        output.push_str(&text[last..token.start]);
        last = token.end();

        match functions.call(name, args) {
            Some(result) => output.push_str(&result),
            None => {
                debug!(function = %name, line = token.line, "unknown function");
                diagnostics.push(Diagnostic::UnknownFunction { name: name.clone() });
            }
        }
    }

    output.push_str(&text[last..]);
    output
}

/// Replace `{{KEY}}` tokens whose key is in the store
///
/// One left-to-right scan: substituted values are never looked at again, and
/// tokens naming unknown keys stay verbatim.
pub(crate) fn substitute_variables(text: &str, vars: &VariableStore) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for token in TokenStream::new(text) {
        let TokenKind::Placeholder { key } = &token.kind else {
            continue;
        };
        let Some(value) = vars.get(key) else {
            continue;
        };

        output.push_str(&text[last..token.start]);
        output.push_str(value);
        last = token.end();
    }

    output.push_str(&text[last..]);
    output
}

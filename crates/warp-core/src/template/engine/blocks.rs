//! Block handling: conditional removal and loop recognition

use crate::condition::ConditionRegistry;
use crate::template::error::Diagnostic;
use crate::vars::VariableStore;
use std::collections::HashMap;
use tracing::debug;

use super::tokenize::{BlockKeyword, Token, TokenKind, TokenStream};

/// Resolve `{{#if_COND}}...{{/if_COND}}` blocks
///
/// A block is replaced by its body when the condition holds and by nothing
/// otherwise. Kept bodies are resolved again. Opening tags without a close,
/// and stray closing tags, stay in the output verbatim.
///
/// Blocks are flat: an opening tag pairs with the first following closing
/// tag of the same name, even if another opening of that name comes first.
pub(crate) fn strip_conditionals(
    text: &str,
    conditions: &ConditionRegistry,
    vars: &VariableStore,
) -> String {
    let tokens: Vec<Token> = TokenStream::new(text).collect();
    let closes = index_closing_tags(&tokens);

    let mut output = String::with_capacity(text.len());
    let mut pos = 0;
    let mut index = 0;

    while index < tokens.len() {
        let token = &tokens[index];
        let TokenKind::BlockStart {
            keyword: BlockKeyword::If,
            name,
        } = &token.kind
        else {
            index += 1;
            continue;
        };

        let Some(close_index) = next_closing_tag(&closes, name, index) else {
            debug!(condition = %name, line = token.line, "unclosed conditional left as-is");
            index += 1;
            continue;
        };
        let close = &tokens[close_index];

        output.push_str(&text[pos..token.start]);

        let body = &text[token.end()..close.start];
        if conditions.evaluate(name, vars) {
            output.push_str(&strip_conditionals(body, conditions, vars));
        }

        pos = close.end();
        index = close_index + 1;
    }

    output.push_str(&text[pos..]);
    output
}

/// Token indices of every `{{/if_NAME}}`, grouped by name in ascending order
fn index_closing_tags(tokens: &[Token]) -> HashMap<&str, Vec<usize>> {
    let mut closes: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, token) in tokens.iter().enumerate() {
        if let TokenKind::BlockEnd {
            keyword: BlockKeyword::If,
            name,
        } = &token.kind
        {
            closes.entry(name.as_str()).or_default().push(index);
        }
    }
    closes
}

/// First closing tag for `name` after the token at `after`
fn next_closing_tag(
    closes: &HashMap<&str, Vec<usize>>,
    name: &str,
    after: usize,
) -> Option<usize> {
    let indices = closes.get(name)?;
    indices.get(indices.partition_point(|&i| i <= after)).copied()
}

/// Record every `{{#each_X}}` opening tag; the text is not changed
pub(crate) fn scan_loops(text: &str, diagnostics: &mut Vec<Diagnostic>) {
    for token in TokenStream::new(text) {
        if let TokenKind::BlockStart {
            keyword: BlockKeyword::Each,
            name,
        } = token.kind
        {
            debug!(loop_name = %name, line = token.line, "loop block left unexpanded");
            diagnostics.push(Diagnostic::UnexpandedLoop { name });
        }
    }
}

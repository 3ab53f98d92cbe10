//! Unit tests for TokenStream

use super::tokenize::{BlockKeyword, ScanState, TokenKind, TokenStream};

fn kinds(text: &str) -> Vec<TokenKind> {
    TokenStream::new(text).map(|token| token.kind).collect()
}

fn placeholder(key: &str) -> TokenKind {
    TokenKind::Placeholder {
        key: key.to_string(),
    }
}

// Unit tests for ScanState state machine
#[test]
fn test_scan_state_transitions() {
    let seen_lbrace = ScanState::SeenLBrace { pos: 10 };
    assert_eq!(seen_lbrace, ScanState::SeenLBrace { pos: 10 });

    let in_token = ScanState::InToken {
        start: 10,
        content_start: 12,
    };
    assert_eq!(
        in_token,
        ScanState::InToken {
            start: 10,
            content_start: 12
        }
    );

    let seen_rbrace = ScanState::SeenRBrace {
        start: 10,
        content_start: 12,
        rbrace_pos: 20,
    };
    assert_eq!(seen_rbrace.clone(), seen_rbrace);
    assert_ne!(ScanState::Normal, seen_lbrace);
}

// Unit tests for TokenStream
#[test]
fn test_tokenstream_single_placeholder() {
    let text = "Hello {{name}} world";
    let mut stream = TokenStream::new(text);

    let token = stream.next().unwrap();
    assert_eq!(token.start, 6);
    assert_eq!(token.length, 8); // {{name}}
    assert_eq!(token.end(), 14);
    assert_eq!(token.kind, placeholder("name"));

    assert!(stream.next().is_none());
}

#[test]
fn test_tokenstream_multiple_tokens() {
    let tokens: Vec<_> = TokenStream::new("{{a}} {{b}} {{c}}").collect();
    let starts: Vec<_> = tokens.iter().map(|t| t.start).collect();
    assert_eq!(starts, vec![0, 6, 12]);
    assert_eq!(tokens[1].kind, placeholder("b"));
}

#[test]
fn test_tokenstream_block_tokens() {
    assert_eq!(
        kinds("{{#if_docker}} {{NAME}} {{/if_docker}}{{#each_items}}{{/each_items}}"),
        vec![
            TokenKind::BlockStart {
                keyword: BlockKeyword::If,
                name: "docker".to_string()
            },
            placeholder("NAME"),
            TokenKind::BlockEnd {
                keyword: BlockKeyword::If,
                name: "docker".to_string()
            },
            TokenKind::BlockStart {
                keyword: BlockKeyword::Each,
                name: "items".to_string()
            },
            TokenKind::BlockEnd {
                keyword: BlockKeyword::Each,
                name: "items".to_string()
            },
        ]
    );
}

#[test]
fn test_tokenstream_unknown_block_keyword_is_placeholder() {
    assert_eq!(kinds("{{#unless_x}}"), vec![placeholder("#unless_x")]);
    assert_eq!(kinds("{{#if_}}"), vec![placeholder("#if_")]);
}

#[test]
fn test_tokenstream_include_path_trimmed() {
    assert_eq!(
        kinds("{{include: partials/a.txt }}"),
        vec![TokenKind::Include {
            path: "partials/a.txt".to_string()
        }]
    );
}

#[test]
fn test_tokenstream_function_tokens() {
    assert_eq!(
        kinds("{{function:uuid}}{{function:uppercase:a:b}}"),
        vec![
            TokenKind::Function {
                name: "uuid".to_string(),
                args: String::new()
            },
            TokenKind::Function {
                name: "uppercase".to_string(),
                args: "a:b".to_string()
            },
        ]
    );
}

#[test]
fn test_tokenstream_empty_input() {
    assert!(TokenStream::new("").next().is_none());
}

#[test]
fn test_tokenstream_no_tokens() {
    assert!(TokenStream::new("Just plain text { with } braces").next().is_none());
}

#[test]
fn test_tokenstream_unclosed_token() {
    assert!(TokenStream::new("{{never closed").next().is_none());
}

#[test]
fn test_tokenstream_brace_run_binds_last_two() {
    let text = "{{{triple}}}";
    let mut stream = TokenStream::new(text);

    let token = stream.next().unwrap();
    assert_eq!(token.start, 1);
    assert_eq!(token.length, 10);
    assert_eq!(token.kind, placeholder("triple"));

    assert!(stream.next().is_none());
}

#[test]
fn test_tokenstream_single_rbrace_in_content() {
    assert_eq!(kinds("{{a}b}}"), vec![placeholder("a}b")]);
}

#[test]
fn test_tokenstream_innermost_opening_wins_for_placeholders() {
    let text = "{{oops {{NAME}}";
    let token = TokenStream::new(text).next().unwrap();
    assert_eq!(token.start, 7);
    assert_eq!(token.kind, placeholder("NAME"));
}

#[test]
fn test_tokenstream_earliest_directive_wins() {
    let text = "{{function:uppercase:{{NAME}}}}";
    let mut stream = TokenStream::new(text);

    let token = stream.next().unwrap();
    assert_eq!(token.start, 0);
    assert_eq!(
        token.kind,
        TokenKind::Function {
            name: "uppercase".to_string(),
            args: "{{NAME".to_string()
        }
    );
    assert_eq!(&text[token.end()..], "}}");
    assert!(stream.next().is_none());
}

#[test]
fn test_tokenstream_multibyte_content() {
    assert_eq!(kinds("é{{名前}}ü"), vec![placeholder("名前")]);
}

#[test]
fn test_tokenstream_line_numbers() {
    let text = "Line 1\n{{token1}}\nLine 3\n{{token2}}";
    let mut stream = TokenStream::new(text);

    let token1 = stream.next().unwrap();
    assert_eq!(token1.line, 2); // Token on line 2

    let token2 = stream.next().unwrap();
    assert_eq!(token2.line, 4); // Token on line 4

    assert!(stream.next().is_none());
}

//! Tokenization for template engine
//!
//! Provides O(n) tokenization using a state machine.

/// Block keywords recognized in `{{#KEYWORD_NAME}}` / `{{/KEYWORD_NAME}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKeyword {
    /// `{{#if_COND}}`
    If,
    /// `{{#each_X}}`
    Each,
}

impl BlockKeyword {
    fn prefix(self) -> &'static str {
        match self {
            BlockKeyword::If => "if_",
            BlockKeyword::Each => "each_",
        }
    }

    const ALL: [BlockKeyword; 2] = [BlockKeyword::If, BlockKeyword::Each];
}

/// Token classification
///
/// Classification happens on the raw text between `{{` and `}}`; nothing is
/// trimmed, so `{{ NAME }}` is a placeholder for the key `" NAME "`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// {{KEY}}
    Placeholder { key: String },

    /// {{#if_COND}} or {{#each_X}}
    BlockStart { keyword: BlockKeyword, name: String },

    /// {{/if_COND}} or {{/each_X}}
    BlockEnd { keyword: BlockKeyword, name: String },

    /// {{include:PATH}}
    Include { path: String },

    /// {{function:NAME}} or {{function:NAME:ARGS}}
    Function { name: String, args: String },
}

/// A single {{...}} token with position and classification
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    /// Token classification
    pub kind: TokenKind,
    /// Absolute byte position of `{{` in template
    pub start: usize,
    /// Total length in bytes including {{ and }}
    pub length: usize,
    /// Line number where token ends (for log messages)
    pub line: usize,
}

impl Token {
    /// Byte position just past the closing `}}`
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Tokenization state machine (explicit for testability)
///
/// # State Transitions
///
/// ```text
/// Normal ──{───> SeenLBrace ──{───> InToken ──}───> SeenRBrace ──}───> [Yield Token] → Normal
///   │               │                  │                  │
///   │ (not {)       │ (not {)          │ (not })          │ (not })
///   └──────────────>└─────────────────>└─────────────────>└──────────> Normal / InToken
///
/// Unclosed {{ → no token, text stays literal
/// ```
///
/// A run of three or more `{` binds the token to its last two braces, so
/// `{{{NAME}}` yields a literal `{` followed by the token `{{NAME}}`.
///
/// Every `{{` seen inside a token is remembered. When the token closes, the
/// earliest opening whose content classifies as a directive (block, include,
/// function) wins; if none does, the innermost opening is yielded as a
/// placeholder. Text before the chosen opening is literal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanState {
    /// Normal text scanning
    Normal,

    /// Seen first `{`, checking for second `{`
    SeenLBrace {
        /// Position of the first `{` character
        pos: usize,
    },

    /// Inside `{{...}}`, scanning until `}}`
    InToken {
        /// Byte position of the opening `{{`
        start: usize,
        /// Byte position where token content starts (after `{{`)
        content_start: usize,
    },

    /// Seen first `}` inside token, checking for second `}`
    SeenRBrace {
        /// Byte position of the opening `{{`
        start: usize,
        /// Byte position where token content starts (after `{{`)
        content_start: usize,
        /// Position of the first `}` character
        rbrace_pos: usize,
    },
}

/// Iterator over tokens in a template string
///
/// Processes each byte at most twice (a byte that breaks a `{`/`}` pair is
/// reprocessed once in the fallback state), in a forward-only manner.
pub(crate) struct TokenStream<'a> {
    /// Zero-copy byte slice of template text
    bytes: &'a [u8],
    /// Current byte position
    pos: usize,
    /// State machine state
    state: ScanState,
    /// Current line number
    line: usize,
    /// Step count bounding the scan
    step_count: usize,
    /// Positions of `{{` seen inside the current token
    inner_starts: Vec<usize>,
}

impl<'a> TokenStream<'a> {
    /// Create a new TokenStream from template text
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Normal,
            line: 1,
            step_count: 0,
            inner_starts: Vec::new(),
        }
    }

    /// Classify token content into TokenKind
    ///
    /// - `#if_COND` / `#each_X` → BlockStart
    /// - `/if_COND` / `/each_X` → BlockEnd
    /// - `include:PATH` → Include
    /// - `function:NAME[:ARGS]` → Function
    /// - anything else → Placeholder
    pub(crate) fn classify_content(content: &str) -> TokenKind {
        if let Some(rest) = content.strip_prefix('#') {
            if let Some((keyword, name)) = split_block(rest) {
                return TokenKind::BlockStart { keyword, name };
            }
        } else if let Some(rest) = content.strip_prefix('/') {
            if let Some((keyword, name)) = split_block(rest) {
                return TokenKind::BlockEnd { keyword, name };
            }
        } else if let Some(path) = content.strip_prefix("include:") {
            return TokenKind::Include {
                path: path.trim().to_string(),
            };
        } else if let Some(call) = content.strip_prefix("function:") {
            let (name, args) = call.split_once(':').unwrap_or((call, ""));
            return TokenKind::Function {
                name: name.to_string(),
                args: args.to_string(),
            };
        }

        TokenKind::Placeholder {
            key: content.to_string(),
        }
    }

    /// Check if we should continue iteration (guards for step bound and EOF)
    #[inline]
    fn should_continue(&mut self, max_steps: usize) -> bool {
        self.step_count += 1;
        self.step_count <= max_steps && self.pos < self.bytes.len()
    }

    #[cfg(test)]
    #[inline]
    fn record_test_step() {
        test_counter::inc();
    }

    fn process_normal_state(&mut self, byte: u8) {
        if byte == b'{' {
            self.state = ScanState::SeenLBrace { pos: self.pos };
        } else if byte == b'\n' {
            self.line += 1;
        }
        self.pos += 1;
    }

    /// Returns true if position was advanced, false if byte should be reprocessed
    fn process_seen_lbrace(&mut self, byte: u8, lbrace_pos: usize) -> bool {
        if byte == b'{' {
            self.state = ScanState::InToken {
                start: lbrace_pos,
                content_start: self.pos + 1,
            };
            self.inner_starts.clear();
            self.pos += 1;
            true
        } else {
            self.state = ScanState::Normal;
            false
        }
    }

    fn process_in_token(&mut self, byte: u8, start: usize, content_start: usize) {
        match byte {
            b'{' if self.pos == content_start => {
                // Brace run: slide the token start forward by one
                self.state = ScanState::InToken {
                    start: start + 1,
                    content_start: content_start + 1,
                };
            }
            b'{' if self.bytes[self.pos - 1] == b'{' => {
                self.inner_starts.push(self.pos - 1);
            }
            b'}' => {
                self.state = ScanState::SeenRBrace {
                    start,
                    content_start,
                    rbrace_pos: self.pos,
                };
            }
            b'\n' => self.line += 1,
            _ => {}
        }
        self.pos += 1;
    }

    /// Returns (Option<Token>, advanced)
    fn process_seen_rbrace(
        &mut self,
        byte: u8,
        start: usize,
        content_start: usize,
        rbrace_pos: usize,
    ) -> (Option<Token>, bool) {
        if byte == b'}' {
            let (kind, start) = self.select_opening(start, content_start, rbrace_pos);

            let token = Token {
                kind,
                start,
                length: self.pos + 1 - start,
                line: self.line,
            };

            self.state = ScanState::Normal;
            self.pos += 1;

            (Some(token), true)
        } else {
            // Single } inside content
            self.state = ScanState::InToken {
                start,
                content_start,
            };
            (None, false)
        }
    }
}

impl TokenStream<'_> {
    /// Pick the opening `{{` a closing `}}` belongs to
    fn select_opening(
        &mut self,
        start: usize,
        content_start: usize,
        rbrace_pos: usize,
    ) -> (TokenKind, usize) {
        let inner = std::mem::take(&mut self.inner_starts);
        let mut chosen = (start, content_start);

        for (open, body) in std::iter::once((start, content_start))
            .chain(inner.into_iter().map(|open| (open, open + 2)))
        {
            chosen = (open, body);
            if is_directive(&self.bytes[body..rbrace_pos]) {
                break;
            }
        }

        let (open, body) = chosen;
        let content = std::str::from_utf8(&self.bytes[body..rbrace_pos]).unwrap_or("");
        (Self::classify_content(content), open)
    }
}

/// Cheap prefix check matching the non-placeholder arms of `classify_content`
fn is_directive(content: &[u8]) -> bool {
    let block = |rest: &[u8]| {
        BlockKeyword::ALL.into_iter().any(|keyword| {
            rest.strip_prefix(keyword.prefix().as_bytes())
                .is_some_and(|name| !name.is_empty())
        })
    };

    match content.first() {
        Some(b'#') | Some(b'/') => block(&content[1..]),
        _ => content.starts_with(b"include:") || content.starts_with(b"function:"),
    }
}

/// Split `if_COND` / `each_X` into keyword and a non-empty name
fn split_block(rest: &str) -> Option<(BlockKeyword, String)> {
    BlockKeyword::ALL.into_iter().find_map(|keyword| {
        rest.strip_prefix(keyword.prefix())
            .filter(|name| !name.is_empty())
            .map(|name| (keyword, name.to_string()))
    })
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        const MAX_STEPS_MULTIPLIER: usize = 3;
        let max_steps = self.bytes.len().saturating_mul(MAX_STEPS_MULTIPLIER);

        loop {
            if !self.should_continue(max_steps) {
                return None;
            }

            let byte = self.bytes[self.pos];
            #[cfg(test)]
            Self::record_test_step();

            match self.state.clone() {
                ScanState::Normal => self.process_normal_state(byte),
                ScanState::SeenLBrace { pos } => {
                    if !self.process_seen_lbrace(byte, pos) {
                        continue;
                    }
                }
                ScanState::InToken {
                    start,
                    content_start,
                } => self.process_in_token(byte, start, content_start),
                ScanState::SeenRBrace {
                    start,
                    content_start,
                    rbrace_pos,
                } => {
                    let (token, advanced) =
                        self.process_seen_rbrace(byte, start, content_start, rbrace_pos);
                    if let Some(token) = token {
                        return Some(token);
                    }
                    if !advanced {
                        continue;
                    }
                }
            }
        }
    }
}

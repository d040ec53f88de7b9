//! Tokenizer and sentence grouping.
//!
//! Contract:
//! - Input: the full buffer text.
//! - Output: a `Document` whose tokens partition the text exactly (concatenating
//!   every sentence's token texts reproduces the input) with char offsets.
//! - Pure and total: no shared scanning state, never fails. The document is
//!   rebuilt wholesale after every edit; nothing is patched incrementally.
//!
//! Sentence end rule: a separator token containing a terminal char (`.?!`) ends
//! the current sentence when it reaches the end of the text, when the char after
//! its last terminal is whitespace, or when the token is longer than one char.
//! The sentence's `end` sits just after that terminal char; whatever follows it
//! inside the token (spaces, newlines, closing parens) still belongs to the
//! sentence's token list but not to its `[start,end)` span.

use serde::Serialize;

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Word,
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: usize, // char offset (inclusive)
    pub end: usize,   // char offset (exclusive)
}

impl Token {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Sentence {
    pub index: usize,
    pub tokens: Vec<Token>,
    pub start: usize,
    pub end: usize,
}

impl Sentence {
    /// Offset just past the last token (includes trailing separators).
    pub fn tokens_end(&self) -> usize {
        self.tokens.last().map(|t| t.end).unwrap_or(self.start)
    }

    /// True if `pos` lies inside `[start,end)`.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Parsed view of a buffer. Never mutated; replaced after every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Document {
    pub text: String,
    pub sentences: Vec<Sentence>,
    pub words: Vec<Token>,
    /// Text length in chars.
    pub len: usize,
}

impl Document {
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Every token in document order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }

    /// The `[start,end)` text of sentence `idx` (empty when out of range).
    pub fn sentence_text(&self, idx: usize) -> String {
        match self.sentences.get(idx) {
            Some(s) => self
                .text
                .chars()
                .skip(s.start)
                .take(s.end - s.start)
                .collect(),
            None => String::new(),
        }
    }
}

/// Separator class: whitespace plus `, ; . ? ! — ( )`.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '.' | '?' | '!' | '—' | '(' | ')')
}

/// Sentence-terminal punctuation.
pub fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

/// Split `text` into maximal word / separator runs with char offsets.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_kind = TokenKind::Word;
    let mut start = 0usize;
    let mut idx = 0usize;
    for c in text.chars() {
        let kind = if is_separator(c) {
            TokenKind::Separator
        } else {
            TokenKind::Word
        };
        if !current.is_empty() && kind != current_kind {
            tokens.push(Token {
                kind: current_kind,
                text: std::mem::take(&mut current),
                start,
                end: idx,
            });
            start = idx;
        }
        current_kind = kind;
        current.push(c);
        idx += 1;
    }
    if !current.is_empty() {
        tokens.push(Token {
            kind: current_kind,
            text: current,
            start,
            end: idx,
        });
    }
    tokens
}

/// If `token` closes a sentence, return the offset just past its last terminal char.
fn sentence_end_in(token: &Token, next_char: Option<char>, text_len: usize) -> Option<usize> {
    if token.is_word() {
        return None;
    }
    let chars: Vec<char> = token.text.chars().collect();
    let last_terminal = chars.iter().rposition(|c| is_terminal(*c))?;
    let reaches_end = token.end == text_len;
    let after = chars.get(last_terminal + 1).copied().or(next_char);
    let followed_by_ws = after.is_some_and(char::is_whitespace);
    if reaches_end || followed_by_ws || chars.len() > 1 {
        Some(token.start + last_terminal + 1)
    } else {
        None
    }
}

/// Parse `text` into a `Document`.
pub fn parse(text: &str) -> Document {
    let tokens = tokenize(text);
    let len = tokens.last().map(|t| t.end).unwrap_or(0);
    let words: Vec<Token> = tokens.iter().filter(|t| t.is_word()).cloned().collect();

    let mut sentences = Vec::new();
    let mut pending: Vec<Token> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        // First char of the following token (None at end of text).
        let next_char = tokens.get(i + 1).and_then(|t| t.text.chars().next());
        let end = sentence_end_in(token, next_char, len);
        pending.push(token.clone());
        if let Some(end) = end {
            let start = pending[0].start;
            sentences.push(Sentence {
                index: sentences.len(),
                tokens: std::mem::take(&mut pending),
                start,
                end,
            });
        }
    }
    if let Some(first) = pending.first() {
        let start = first.start;
        let end = pending.last().map(|t| t.end).unwrap_or(start);
        sentences.push(Sentence {
            index: sentences.len(),
            tokens: pending,
            start,
            end,
        });
    }

    tracing::trace!(
        target: "text.parse",
        len,
        tokens = tokens.len(),
        words = words.len(),
        sentences = sentences.len(),
        "parse"
    );

    Document {
        text: text.to_string(),
        sentences,
        words,
        len,
    }
}

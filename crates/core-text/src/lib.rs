//! Rope-backed text buffer plus the pure structural views derived from it.
//!
//! All offsets in this crate are `char` indices into the buffer. Grapheme
//! clusters are not considered: one `char` is one cursor step.
//!
//! Modules:
//! * `parse`   - tokenizer and sentence grouping (`Document`)
//! * `resolve` - offset <-> word/sentence index lookups over a `Document`
//! * `motion`  - boundary searches used by cursor motions and deletes

use ropey::Rope;
use std::fmt;

pub mod motion;
pub mod parse;
pub mod resolve;

pub use parse::{Document, Sentence, Token, TokenKind, parse};
pub use resolve::CharRange;

/// A text buffer backed by a `ropey::Rope`, addressed by char index.
#[derive(Clone, Default)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn new(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Borrow the underlying rope.
    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Char at `idx`, or `None` past the end.
    pub fn char_at(&self, idx: usize) -> Option<char> {
        if idx < self.rope.len_chars() {
            Some(self.rope.char(idx))
        } else {
            None
        }
    }

    /// Owned copy of the chars in `[start,end)` (clamped to the buffer).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let total = self.rope.len_chars();
        let s = start.min(total);
        let e = end.min(total);
        if s >= e {
            return String::new();
        }
        self.rope.slice(s..e).to_string()
    }

    /// Insert `text` before char `at` (clamped to the end). Returns the number of chars inserted.
    pub fn insert(&mut self, at: usize, text: &str) -> usize {
        let at = at.min(self.rope.len_chars());
        self.rope.insert(at, text);
        text.chars().count()
    }

    /// Remove chars in `[start,end)` (clamped). Returns the removed text.
    pub fn remove(&mut self, start: usize, end: usize) -> String {
        let removed = self.slice(start, end);
        if !removed.is_empty() {
            let total = self.rope.len_chars();
            self.rope.remove(start.min(total)..end.min(total));
        }
        removed
    }

    /// Replace the whole content.
    pub fn replace_all(&mut self, content: &str) {
        self.rope = Rope::from_str(content);
    }

    /// Offset of the first char of the `\n`-delimited line containing `pos`.
    pub fn line_start(&self, pos: usize) -> usize {
        let mut idx = pos.min(self.rope.len_chars());
        while idx > 0 && self.rope.char(idx - 1) != '\n' {
            idx -= 1;
        }
        idx
    }

    /// Offset just before the `\n` terminating the line containing `pos` (or buffer end).
    pub fn line_end(&self, pos: usize) -> usize {
        let total = self.rope.len_chars();
        let mut idx = pos.min(total);
        while idx < total && self.rope.char(idx) != '\n' {
            idx += 1;
        }
        idx
    }

    /// Whole content as an owned `String` (input to `parse`).
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Content is never logged; only its size.
        f.debug_struct("Buffer")
            .field("len_chars", &self.len_chars())
            .finish()
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.rope == other.rope
    }
}

impl Eq for Buffer {}

//! Cursor boundary searches.
//!
//! These operate purely on a `Buffer` + char offset and are free of editor
//! state. Word boundaries are the edges of separator runs (see
//! `parse::is_separator`); sentence boundaries sit just past a terminal char
//! that is followed by whitespace or by the end of the text.

use crate::Buffer;
use crate::parse::{is_separator, is_terminal};

fn is_sep_at(buf: &Buffer, idx: usize) -> bool {
    buf.char_at(idx).is_some_and(is_separator)
}

/// One char left (clamped at 0).
pub fn left(_buf: &Buffer, pos: usize) -> usize {
    pos.saturating_sub(1)
}

/// One char right (clamped at the end).
pub fn right(buf: &Buffer, pos: usize) -> usize {
    (pos + 1).min(buf.len_chars())
}

/// Start of the next word, or the end of the text when no word follows.
///
/// Skips the rest of the current word, then the separator run after it.
pub fn word_right(buf: &Buffer, pos: usize) -> usize {
    let len = buf.len_chars();
    let mut idx = pos.min(len);
    while idx < len && !is_sep_at(buf, idx) {
        idx += 1;
    }
    while idx < len && is_sep_at(buf, idx) {
        idx += 1;
    }
    idx
}

/// Start of the word left of `pos` (skipping any separators first).
pub fn word_left(buf: &Buffer, pos: usize) -> usize {
    let mut idx = pos.min(buf.len_chars());
    while idx > 0 && is_sep_at(buf, idx - 1) {
        idx -= 1;
    }
    while idx > 0 && !is_sep_at(buf, idx - 1) {
        idx -= 1;
    }
    idx
}

/// True if `idx` sits just past a terminal char followed by whitespace or end of text.
pub fn is_sentence_boundary(buf: &Buffer, idx: usize) -> bool {
    if idx == 0 {
        return false;
    }
    let prev_terminal = buf.char_at(idx - 1).is_some_and(is_terminal);
    let next_ok = match buf.char_at(idx) {
        None => true,
        Some(c) => c.is_whitespace(),
    };
    prev_terminal && next_ok
}

/// Next sentence boundary strictly right of `pos`, or the end of the text.
pub fn sentence_right(buf: &Buffer, pos: usize) -> usize {
    let len = buf.len_chars();
    let mut idx = pos.min(len) + 1;
    while idx < len {
        if is_sentence_boundary(buf, idx) {
            return idx;
        }
        idx += 1;
    }
    len
}

/// Start of the current sentence, or of the previous one when already there.
///
/// A sentence start is a boundary plus the whitespace run that follows it.
pub fn sentence_left(buf: &Buffer, pos: usize) -> usize {
    let pos = pos.min(buf.len_chars());
    let mut idx = pos;
    while idx > 0 {
        idx -= 1;
        if is_sentence_boundary(buf, idx) {
            let mut start = idx;
            while buf.char_at(start).is_some_and(char::is_whitespace) {
                start += 1;
            }
            if start < pos {
                return start;
            }
        }
    }
    0
}

/// Start of the `\n`-delimited line containing `pos`.
pub fn line_start(buf: &Buffer, pos: usize) -> usize {
    buf.line_start(pos)
}

/// End of the `\n`-delimited line containing `pos` (before its newline).
pub fn line_end(buf: &Buffer, pos: usize) -> usize {
    buf.line_end(pos)
}

/// Same column on the previous line (clamped to that line's length). No-op on the first line.
pub fn up(buf: &Buffer, pos: usize) -> usize {
    let start = buf.line_start(pos);
    if start == 0 {
        return pos;
    }
    let column = pos - start;
    let prev_start = buf.line_start(start - 1);
    let prev_len = (start - 1) - prev_start;
    prev_start + column.min(prev_len)
}

/// Same column on the next line (clamped to that line's length). No-op on the last line.
pub fn down(buf: &Buffer, pos: usize) -> usize {
    let start = buf.line_start(pos);
    let end = buf.line_end(pos);
    if end >= buf.len_chars() {
        return pos;
    }
    let column = pos - start;
    let next_start = end + 1;
    let next_end = buf.line_end(next_start);
    next_start + column.min(next_end - next_start)
}

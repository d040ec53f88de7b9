//! Text edit action handling (insert / newline / backspace).
//!
//! Insert:
//! * no selection: splice at the caret; plain chars take an unforced
//!   snapshot so bursts batch, newline forces one;
//! * with a selection: always opens a new history group, which the chars
//!   typed right after it join;
//! * selection over uncommitted text: the selection is replaced;
//! * selection over committed text: the old text stays and becomes a ghost.
//!   A separator (a space when the typed char is alphanumeric) plus the char
//!   are inserted right after the selection; the ghost covers the selection
//!   and the separator, never the typed char.
//!
//! Backspace: a sentence selection removes `[first.start, last.end)` and
//! drops/shifts committed indices exactly; a word selection removes its char
//! range; otherwise one char, or back to the previous word / sentence
//! boundary. Every backspace that removes text forces a snapshot.

use std::time::Instant;

use super::DispatchResult;
use crate::DeleteKind;
use core_state::EditorState;
use core_text::{CharRange, motion};

/// Char range of the active selection (word first, then sentence).
fn selection_range(state: &EditorState) -> Option<CharRange> {
    let doc = state.document();
    if let Some(sel) = state.word_selection {
        let (lo, hi) = sel.bounds();
        return Some(doc.word_range_for(lo, hi));
    }
    state.sentence_selection.map(|sel| {
        let (lo, hi) = sel.bounds();
        doc.sentence_range_for(lo, hi)
    })
}

fn range_is_committed(state: &EditorState, range: CharRange) -> bool {
    state
        .document()
        .sentences_overlapping(range)
        .any(|i| state.committed.contains(i))
}

pub(crate) fn insert_char(c: char, state: &mut EditorState, now: Instant) -> DispatchResult {
    let Some(range) = selection_range(state) else {
        let at = state.cursor;
        state.snapshot_before_edit(c == '\n', now);
        let mut tmp = [0u8; 4];
        let n = state.splice(at, at, c.encode_utf8(&mut tmp)).inserted;
        state.set_cursor(at + n);
        tracing::trace!(target: "actions.dispatch", op = "insert", at, newline = (c == '\n'), "edit");
        return DispatchResult::text_changed();
    };

    // A new group that the rest of the typing burst joins.
    state.start_history_group(now);
    if range_is_committed(state, range) {
        let sep = if c.is_alphanumeric() { " " } else { "" };
        let inserted = format!("{sep}{c}");
        let at = range.end;
        let n = state.splice(at, at, &inserted).inserted;
        let ghost = CharRange::new(range.start, at + sep.chars().count());
        state.ghosts.add(ghost);
        state.set_cursor(at + n);
        tracing::trace!(
            target: "state.ghost",
            start = ghost.start,
            end = ghost.end,
            ghosts = state.ghosts.len(),
            "ghost_added"
        );
    } else {
        let mut tmp = [0u8; 4];
        let n = state
            .splice(range.start, range.end, c.encode_utf8(&mut tmp))
            .inserted;
        state.set_cursor(range.start + n);
        tracing::trace!(target: "actions.dispatch", op = "replace_selection", start = range.start, end = range.end, "edit");
    }
    state.clear_selections();
    DispatchResult::text_changed()
}

pub(crate) fn backspace(kind: DeleteKind, state: &mut EditorState, now: Instant) -> DispatchResult {
    if let Some(sel) = state.sentence_selection {
        let (lo, hi) = sel.bounds();
        let range = state.document().sentence_range_for(lo, hi);
        state.snapshot_before_edit(true, now);
        let mut committed = state.committed.clone();
        committed.remap_after_sentence_delete(lo, hi);
        state.splice(range.start, range.end, "");
        committed.retain_below(state.document().sentence_count());
        state.committed = committed;
        state.set_cursor(range.start);
        state.clear_selections();
        tracing::trace!(target: "actions.dispatch", op = "delete_sentences", lo, hi, start = range.start, end = range.end, "edit");
        return DispatchResult::text_changed();
    }
    if let Some(sel) = state.word_selection {
        let (lo, hi) = sel.bounds();
        let range = state.document().word_range_for(lo, hi);
        state.snapshot_before_edit(true, now);
        state.splice(range.start, range.end, "");
        state.set_cursor(range.start);
        state.clear_selections();
        tracing::trace!(target: "actions.dispatch", op = "delete_words", lo, hi, start = range.start, end = range.end, "edit");
        return DispatchResult::text_changed();
    }

    let end = state.cursor;
    let start = match kind {
        DeleteKind::Char => motion::left(state.buffer(), end),
        DeleteKind::Word => motion::word_left(state.buffer(), end),
        DeleteKind::Sentence => motion::sentence_left(state.buffer(), end),
    };
    if start >= end {
        return DispatchResult::clean();
    }
    state.snapshot_before_edit(true, now);
    state.splice(start, end, "");
    state.set_cursor(start);
    tracing::trace!(target: "actions.dispatch", op = "backspace", kind = ?kind, start, end, "edit");
    DispatchResult::text_changed()
}

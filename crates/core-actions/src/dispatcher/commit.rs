//! Commit toggling and ghost confirmation.

use std::time::Instant;

use super::DispatchResult;
use core_state::{EditorState, TextEdit};

/// Toggle the selected sentences (all-or-nothing) or the sentence at the caret.
pub(crate) fn toggle_commit(state: &mut EditorState, now: Instant) -> DispatchResult {
    let count = state.document().sentence_count();
    if count == 0 {
        return DispatchResult::clean();
    }
    state.snapshot_before_edit(true, now);
    if let Some(sel) = state.sentence_selection.take() {
        let (lo, hi) = sel.bounds();
        let hi = hi.min(count - 1);
        let committed = state.committed.toggle_range(lo, hi);
        tracing::debug!(target: "actions.dispatch", op = "toggle_commit", lo, hi, committed, "commit");
    } else {
        let idx = state.document().sentence_index_at(state.cursor);
        let committed = state.committed.toggle(idx);
        tracing::debug!(target: "actions.dispatch", op = "toggle_commit", idx, committed, "commit");
    }
    DispatchResult::dirty()
}

/// Remove every ghost range from the buffer, last to first.
pub(crate) fn confirm_ghosts(state: &mut EditorState, now: Instant) -> DispatchResult {
    if state.ghosts.is_empty() {
        return DispatchResult::clean();
    }
    state.snapshot_before_edit(true, now);
    let ranges = state.ghosts.take();
    let mut cursor = state.cursor;
    for r in ranges.iter().rev() {
        cursor = TextEdit::delete(r.start, r.end).map_offset(cursor);
        state.splice(r.start, r.end, "");
    }
    state.set_cursor(cursor);
    state.clear_selections();
    tracing::debug!(target: "state.ghost", removed = ranges.len(), cursor, "ghosts_confirmed");
    DispatchResult::text_changed()
}

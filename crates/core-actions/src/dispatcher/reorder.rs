//! Sentence reordering.
//!
//! Moving block `lo..=hi` down swaps it with sentence `hi+1`:
//! `before + neighbor + sep + block + after`, where `sep` is the original text
//! between the block and the neighbor. Moving up mirrors this with `lo-1`.
//! Committed indices follow their content, ghosts are cleared, the selection
//! follows the block and the caret lands on the block's new start. A move
//! that would change the sentence count on reparse is refused.

use std::time::Instant;

use super::DispatchResult;
use crate::ReorderDirection;
use core_state::EditorState;
use core_text::parse;

pub(crate) fn handle_reorder(
    direction: ReorderDirection,
    state: &mut EditorState,
    now: Instant,
) -> DispatchResult {
    let Some(sel) = state.sentence_selection else {
        return DispatchResult::clean();
    };
    let (lo, hi) = sel.bounds();
    let doc = state.document();
    let count = doc.sentence_count();
    let down = matches!(direction, ReorderDirection::Down);
    if hi >= count || (down && hi + 1 >= count) || (!down && lo == 0) {
        return DispatchResult::clean();
    }

    let buf = state.buffer();
    let total = buf.len_chars();
    let s = &doc.sentences;
    let new_text = if down {
        let n = &s[hi + 1];
        [
            buf.slice(0, s[lo].start),
            buf.slice(n.start, n.end),
            buf.slice(s[hi].end, n.start),
            buf.slice(s[lo].start, s[hi].end),
            buf.slice(n.end, total),
        ]
        .concat()
    } else {
        let n = &s[lo - 1];
        [
            buf.slice(0, n.start),
            buf.slice(s[lo].start, s[hi].end),
            buf.slice(n.end, s[lo].start),
            buf.slice(n.start, n.end),
            buf.slice(s[hi].end, total),
        ]
        .concat()
    };

    let reparsed = parse(&new_text);
    if reparsed.sentence_count() != count {
        tracing::debug!(target: "actions.dispatch", op = "reorder", lo, hi, down, "reorder_refused_count_change");
        return DispatchResult::clean();
    }
    let new_lo = if down { lo + 1 } else { lo - 1 };
    let cursor = reparsed.sentences[new_lo].start;

    state.snapshot_before_edit(true, now);
    state.replace_text(&new_text);
    state.committed.remap_after_reorder(lo, hi, down);
    state.ghosts.clear();
    state.sentence_selection = Some(sel.shifted(if down { 1 } else { -1 }));
    state.word_selection = None;
    state.set_cursor(cursor);
    tracing::debug!(target: "actions.dispatch", op = "reorder", lo, hi, down, cursor, "reorder");
    DispatchResult::text_changed()
}

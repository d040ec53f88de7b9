//! Selection steps.
//!
//! Starting a selection anchors on the unit at the caret (`word_index_at` /
//! `sentence_index_at`). Nothing is selected when starting leftward at
//! offset 0, or rightward from the end of the text. Each step moves the caret
//! to the extending edge.
//! Word and sentence selections are exclusive: stepping one clears the other.

use super::DispatchResult;
use core_state::selection::step;
use core_state::{Direction, EditorState, SelectionUnit};

pub(crate) fn handle_select(
    unit: SelectionUnit,
    direction: Direction,
    state: &mut EditorState,
) -> DispatchResult {
    let doc = state.document();
    let cursor = state.cursor;
    let (prev, count, at) = match unit {
        SelectionUnit::Word => (state.word_selection, doc.word_count(), doc.word_index_at(cursor)),
        SelectionUnit::Sentence => (
            state.sentence_selection,
            doc.sentence_count(),
            doc.sentence_index_at(cursor),
        ),
    };
    let anchor = match direction {
        Direction::Left if cursor == 0 => None,
        Direction::Right if cursor >= doc.len && at + 1 >= count => None,
        _ => Some(at),
    };
    let next = step(prev, direction, anchor, count);
    // Caret follows the extending edge.
    let edge = next.map(|sel| {
        let range = match unit {
            SelectionUnit::Word => doc.word_range_for(sel.end, sel.end),
            SelectionUnit::Sentence => doc.sentence_range_for(sel.end, sel.end),
        };
        match sel.direction {
            Direction::Right => range.end,
            Direction::Left => range.start,
        }
    });

    let other_cleared = match unit {
        SelectionUnit::Word => state.sentence_selection.take().is_some(),
        SelectionUnit::Sentence => state.word_selection.take().is_some(),
    };
    match unit {
        SelectionUnit::Word => state.word_selection = next,
        SelectionUnit::Sentence => state.sentence_selection = next,
    }
    if let Some(edge) = edge {
        state.set_cursor(edge);
    }
    tracing::trace!(
        target: "actions.dispatch",
        op = "select",
        unit = ?unit,
        direction = ?direction,
        bounds = ?next.map(|s| s.bounds()),
        cursor = state.cursor,
        "select"
    );
    DispatchResult::from_dirty(other_cleared || next != prev || state.cursor != cursor)
}

//! Motion sub-dispatch (cursor movement).
//!
//! Horizontal and line motions clear both selections; vertical motions keep
//! the column within `\n`-delimited lines and leave selections alone.

use super::DispatchResult;
use crate::MotionKind;
use core_state::EditorState;
use core_text::motion;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor;
    let buf = state.buffer();
    let (to, clears_selection) = match kind {
        MotionKind::Left => (motion::left(buf, before), true),
        MotionKind::Right => (motion::right(buf, before), true),
        MotionKind::WordLeft => (motion::word_left(buf, before), true),
        MotionKind::WordRight => (motion::word_right(buf, before), true),
        MotionKind::SentenceLeft => (motion::sentence_left(buf, before), true),
        MotionKind::SentenceRight => (motion::sentence_right(buf, before), true),
        MotionKind::LineStart => (motion::line_start(buf, before), true),
        MotionKind::LineEnd => (motion::line_end(buf, before), true),
        MotionKind::Up => (motion::up(buf, before), false),
        MotionKind::Down => (motion::down(buf, before), false),
    };
    let had_selection = clears_selection && state.has_selection();
    if clears_selection {
        state.clear_selections();
    }
    state.set_cursor(to);
    tracing::trace!(target: "actions.dispatch", op = "motion", kind = ?kind, from = before, to = state.cursor, "motion");
    DispatchResult::from_dirty(had_selection || state.cursor != before)
}

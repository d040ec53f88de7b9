//! Undo / Redo dispatch. Both restore text, caret, ghosts and committed set
//! atomically and clear selections; an empty stack is a clean no-op.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState) -> DispatchResult {
    if state.undo() {
        tracing::trace!(target: "actions.dispatch", op = "undo", undo_depth = state.undo_depth(), redo_depth = state.redo_depth(), "undo");
        DispatchResult::text_changed()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(state: &mut EditorState) -> DispatchResult {
    if state.redo() {
        tracing::trace!(target: "actions.dispatch", op = "redo", undo_depth = state.undo_depth(), redo_depth = state.redo_depth(), "redo");
        DispatchResult::text_changed()
    } else {
        DispatchResult::clean()
    }
}

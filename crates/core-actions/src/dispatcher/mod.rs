//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `select`  - word / sentence selection steps
//! * `edit`    - insert / newline / backspace (with ghost handling)
//! * `commit`  - commit toggle and ghost confirmation
//! * `reorder` - moving a selected sentence block past its neighbor
//! * `undo`    - undo / redo
//!
//! Every handler is atomic: it either applies the whole transition or leaves
//! the state untouched (precondition failures are silent no-ops). Handlers
//! that change text take their history snapshot first, and only once the
//! edit is known to happen.

use std::time::Instant;

use crate::{Action, EditKind};
use core_model::EditorModel;

mod commit;
mod edit;
mod motion;
mod reorder;
mod select;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Something observable changed (cursor, selections, text, committed set, ghosts).
    pub dirty: bool,
    /// The buffer text changed.
    pub text_changed: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            text_changed: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            text_changed: false,
        }
    }
    pub fn text_changed() -> Self {
        Self {
            dirty: true,
            text_changed: true,
        }
    }
    pub(crate) fn from_dirty(dirty: bool) -> Self {
        if dirty { Self::dirty() } else { Self::clean() }
    }
}

/// Apply an action to the model. `now` drives history batching.
pub fn dispatch(action: Action, model: &mut EditorModel, now: Instant) -> DispatchResult {
    let state = model.state_mut();
    let result = match action {
        Action::Motion(kind) => motion::handle_motion(kind, state),
        Action::Select { unit, direction } => select::handle_select(unit, direction, state),
        Action::Edit(EditKind::InsertChar(c)) => edit::insert_char(c, state, now),
        Action::Edit(EditKind::InsertNewline) => edit::insert_char('\n', state, now),
        Action::Edit(EditKind::Backspace(kind)) => edit::backspace(kind, state, now),
        Action::ToggleCommit => commit::toggle_commit(state, now),
        Action::ConfirmGhosts => commit::confirm_ghosts(state, now),
        Action::Reorder(direction) => reorder::handle_reorder(direction, state, now),
        Action::ClearSelections => {
            let had = state.has_selection();
            state.clear_selections();
            DispatchResult::from_dirty(had)
        }
        Action::Undo => undo::handle_undo(state),
        Action::Redo => undo::handle_redo(state),
    };
    tracing::trace!(
        target: "actions.dispatch",
        action = ?action,
        dirty = result.dirty,
        text_changed = result.text_changed,
        cursor = state.cursor,
        "dispatch"
    );
    state.debug_check_invariants();
    result
}

//! Action vocabulary, key translation and dispatch for the editing engine.
//!
//! Flow per key event: `KeyTranslator` maps a `KeyEvent` to an `Action` (or
//! nothing), `dispatch` applies the action to the `EditorModel` as one atomic
//! transition, and `Session` glues both to a `KeyEventBus` subscription.

use std::time::Instant;

use core_events::{KeyEvent, KeySubscriber, Propagation};
use core_model::{EditorModel, EditorView, SentenceUnit};
use core_state::{Direction, EditorState, HistoryLimits, SelectionUnit};

pub mod dispatcher;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::KeyTranslator;

/// Cursor motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Left,
    Right,
    WordLeft,
    WordRight,
    SentenceLeft,
    SentenceRight,
    LineStart,
    LineEnd,
    /// Same column on the previous `\n`-delimited line.
    Up,
    /// Same column on the next `\n`-delimited line.
    Down,
}

/// How far a selection-less backspace reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteKind {
    Char,
    Word,
    Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    InsertChar(char),
    InsertNewline,
    Backspace(DeleteKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReorderDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Motion(MotionKind),
    Select {
        unit: SelectionUnit,
        direction: Direction,
    },
    Edit(EditKind),
    ToggleCommit,
    Reorder(ReorderDirection),
    /// Remove every ghost range from the buffer.
    ConfirmGhosts,
    ClearSelections,
    Undo,
    Redo,
}

/// One editing session: the model plus the translator feeding it.
#[derive(Debug, Default)]
pub struct Session {
    model: EditorModel,
    translator: KeyTranslator,
}

impl Session {
    pub fn new(text: &str) -> Self {
        Self::with_limits(text, HistoryLimits::default())
    }

    pub fn with_limits(text: &str, limits: HistoryLimits) -> Self {
        Self {
            model: EditorModel::new(EditorState::with_limits(text, limits)),
            translator: KeyTranslator::new(),
        }
    }

    /// Session whose history limits come from configuration.
    pub fn from_config(text: &str, config: &core_config::Config) -> Self {
        Self::with_limits(text, config.history_limits())
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut EditorModel {
        &mut self.model
    }

    pub fn translator(&self) -> &KeyTranslator {
        &self.translator
    }

    pub fn view(&self) -> EditorView {
        self.model.view()
    }

    pub fn settle(&self) -> Vec<SentenceUnit> {
        self.model.settle()
    }

    /// Apply an action directly (bypassing translation).
    pub fn apply(&mut self, action: Action, now: Instant) -> DispatchResult {
        dispatch(action, &mut self.model, now)
    }

    /// Translate and apply `key` at the current instant.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Option<DispatchResult> {
        self.handle_key_at(key, Instant::now())
    }

    /// Translate and apply `key` as if it arrived at `now`. Returns `None` when
    /// the key has no binding.
    pub fn handle_key_at(&mut self, key: &KeyEvent, now: Instant) -> Option<DispatchResult> {
        let has_sentence_selection = self.model.state().sentence_selection.is_some();
        let action = self.translator.translate(has_sentence_selection, key)?;
        Some(dispatch(action, &mut self.model, now))
    }
}

impl KeySubscriber for Session {
    fn on_key(&mut self, event: &KeyEvent) -> Propagation {
        match self.handle_key(event) {
            Some(_) => Propagation::Handled,
            None => Propagation::Ignored,
        }
    }
}

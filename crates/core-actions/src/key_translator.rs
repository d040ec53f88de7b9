//! KeyTranslator: key -> Action translation.
//!
//! Bindings:
//! * Arrows: char move; `Alt` word, `Ctrl` sentence, `Meta` line start/end.
//! * `Shift`+Left/Right: word selection step; with `Alt` or `Ctrl` a sentence
//!   selection step.
//! * Up/Down: reorder while a sentence selection is active, otherwise a
//!   vertical move.
//! * `Backspace`: one char; `Alt` to the previous word boundary; `Ctrl`/`Meta`
//!   to the previous sentence boundary. Selection deletes take precedence in
//!   the dispatcher regardless of modifier.
//! * `Enter`: newline; `Ctrl`/`Meta` toggle commit; with `Shift` as well,
//!   confirm ghosts.
//! * `Ctrl`/`Meta` + `z` undo, + `Shift+z` or `y` redo. Other `Ctrl`/`Meta`
//!   chords are unbound so they never insert text.
//!
//! The only context consulted is whether a sentence selection exists; the
//! translator holds no pending state of its own beyond counters.

use crate::{Action, DeleteKind, EditKind, MotionKind, ReorderDirection};
use core_events::{KeyCode, KeyEvent};
use core_state::{Direction, SelectionUnit};

#[derive(Debug, Default)]
pub struct KeyTranslator {
    translated: u64,
    unbound: u64,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys that produced an action.
    pub fn translated(&self) -> u64 {
        self.translated
    }

    /// Keys with no binding.
    pub fn unbound(&self) -> u64 {
        self.unbound
    }

    pub fn translate(&mut self, has_sentence_selection: bool, key: &KeyEvent) -> Option<Action> {
        let action = map_key(has_sentence_selection, key);
        match action {
            Some(a) => {
                self.translated += 1;
                tracing::trace!(target: "actions.translate", key = %key, action = ?a, "translate");
            }
            None => {
                self.unbound += 1;
                tracing::trace!(target: "actions.translate", key = %key, "unbound");
            }
        }
        action
    }
}

fn horizontal(key: &KeyEvent, direction: Direction) -> Action {
    let left = matches!(direction, Direction::Left);
    if key.shift() {
        let unit = if key.alt() || key.ctrl() {
            SelectionUnit::Sentence
        } else {
            SelectionUnit::Word
        };
        return Action::Select { unit, direction };
    }
    let motion = if key.meta() {
        if left {
            MotionKind::LineStart
        } else {
            MotionKind::LineEnd
        }
    } else if key.ctrl() {
        if left {
            MotionKind::SentenceLeft
        } else {
            MotionKind::SentenceRight
        }
    } else if key.alt() {
        if left {
            MotionKind::WordLeft
        } else {
            MotionKind::WordRight
        }
    } else if left {
        MotionKind::Left
    } else {
        MotionKind::Right
    };
    Action::Motion(motion)
}

fn map_key(has_sentence_selection: bool, key: &KeyEvent) -> Option<Action> {
    let command = key.ctrl() || key.meta();
    let action = match key.code {
        KeyCode::Left => horizontal(key, Direction::Left),
        KeyCode::Right => horizontal(key, Direction::Right),
        KeyCode::Up if has_sentence_selection => Action::Reorder(ReorderDirection::Up),
        KeyCode::Down if has_sentence_selection => Action::Reorder(ReorderDirection::Down),
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Home => Action::Motion(MotionKind::LineStart),
        KeyCode::End => Action::Motion(MotionKind::LineEnd),
        KeyCode::Backspace => {
            let kind = if command {
                DeleteKind::Sentence
            } else if key.alt() {
                DeleteKind::Word
            } else {
                DeleteKind::Char
            };
            Action::Edit(EditKind::Backspace(kind))
        }
        KeyCode::Enter if command && key.shift() => Action::ConfirmGhosts,
        KeyCode::Enter if command => Action::ToggleCommit,
        KeyCode::Enter => Action::Edit(EditKind::InsertNewline),
        KeyCode::Esc => Action::ClearSelections,
        KeyCode::Tab if command => return None,
        KeyCode::Tab => Action::Edit(EditKind::InsertChar('\t')),
        KeyCode::Char(c) if command => match c {
            'z' | 'Z' if key.shift() => Action::Redo,
            'Z' => Action::Redo,
            'z' => Action::Undo,
            'y' | 'Y' => Action::Redo,
            _ => return None,
        },
        KeyCode::Char(c) => Action::Edit(EditKind::InsertChar(c)),
    };
    Some(action)
}

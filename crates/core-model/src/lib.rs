//! Editor model: owns the single `EditorState` of a session and produces the
//! read-only values handed to collaborators.
//!
//! * `EditorView` is the presentation snapshot (text, cursor, selections,
//!   committed set, ghost ranges and the parsed document). It is a plain value
//!   and never aliases live state.
//! * `SentenceUnit`s are the persistence output produced on settle. Joining
//!   every unit's `text` reproduces the buffer exactly.
//!
//! Invariants (must hold after every public call):
//! * the model owns exactly one state; there is no shared or global state;
//! * `view()` reflects the state at call time and is not updated afterwards.

use core_state::{EditorState, IndexSelection};
use core_text::{CharRange, Document};
use serde::Serialize;

/// Read-only presentation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    pub text: String,
    pub cursor: usize,
    pub word_selection: Option<IndexSelection>,
    pub sentence_selection: Option<IndexSelection>,
    pub committed_sentences: Vec<usize>,
    pub ghost_ranges: Vec<CharRange>,
    pub ast: Document,
}

impl EditorView {
    pub fn is_committed(&self, sentence: usize) -> bool {
        self.committed_sentences.binary_search(&sentence).is_ok()
    }

    pub fn is_ghost(&self, pos: usize) -> bool {
        self.ghost_ranges
            .iter()
            .any(|r| r.start <= pos && pos < r.end)
    }

    /// Char range of the word selection, if any.
    pub fn word_selection_range(&self) -> Option<CharRange> {
        self.word_selection.map(|s| {
            let (lo, hi) = s.bounds();
            self.ast.word_range_for(lo, hi)
        })
    }

    /// Char range of the sentence selection, if any.
    pub fn sentence_selection_range(&self) -> Option<CharRange> {
        self.sentence_selection.map(|s| {
            let (lo, hi) = s.bounds();
            self.ast.sentence_range_for(lo, hi)
        })
    }

    /// Text of every ghost range, in order.
    pub fn ghost_texts(&self) -> Vec<String> {
        self.ghost_ranges
            .iter()
            .map(|r| self.text.chars().skip(r.start).take(r.len()).collect())
            .collect()
    }
}

/// One sentence of persisted output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceUnit {
    /// Every token of the sentence, trailing separators included.
    pub text: String,
    pub committed: bool,
}

#[derive(Debug, Default)]
pub struct EditorModel {
    state: EditorState,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    /// Capture the presentation snapshot.
    pub fn view(&self) -> EditorView {
        let st = &self.state;
        EditorView {
            text: st.text(),
            cursor: st.cursor,
            word_selection: st.word_selection,
            sentence_selection: st.sentence_selection,
            committed_sentences: st.committed.iter().collect(),
            ghost_ranges: st.ghosts.as_slice().to_vec(),
            ast: st.document().clone(),
        }
    }

    /// Persistence units, one per sentence.
    pub fn settle(&self) -> Vec<SentenceUnit> {
        let doc = self.state.document();
        let units: Vec<SentenceUnit> = doc
            .sentences
            .iter()
            .map(|s| SentenceUnit {
                text: s.tokens.iter().map(|t| t.text.as_str()).collect(),
                committed: self.state.committed.contains(s.index),
            })
            .collect();
        tracing::debug!(
            target: "model",
            sentences = units.len(),
            committed = units.iter().filter(|u| u.committed).count(),
            "settle"
        );
        units
    }
}

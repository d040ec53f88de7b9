//! Editor state: buffer, derived document, cursor, selections, committed
//! sentences, ghost ranges and history.
//!
//! `EditorState` is the single authoritative value every edit operation is
//! applied to. The buffer is private so that each text change goes through
//! `splice` (or `replace_text`), which reparses the document and keeps ghost
//! ranges and committed indices aligned in the same transition.
//!
//! History:
//! - `snapshot_before_edit(force, now)` must be called *before* mutating.
//!   Unforced calls inside the batch window of the current group are absorbed
//!   (see `undo::HistoryManager`).
//! - `undo` / `redo` restore text, cursor, ghosts and committed set atomically
//!   and always clear both selections.

use std::time::Instant;

use core_text::{Buffer, Document, parse};

pub mod committed;
pub mod ghost;
pub mod selection;
pub mod undo;

pub use committed::{CommittedSentences, TextEdit};
pub use ghost::GhostRanges;
pub use selection::{Direction, IndexSelection, SelectionUnit};
pub use undo::{
    BATCH_WINDOW_DEFAULT, HistoryLimits, HistoryManager, InsertRun, Snapshot, UNDO_HISTORY_MAX,
};

/// Top-level editing state for one session.
#[derive(Debug)]
pub struct EditorState {
    buffer: Buffer,
    doc: Document,
    pub cursor: usize,
    pub word_selection: Option<IndexSelection>,
    pub sentence_selection: Option<IndexSelection>,
    pub committed: CommittedSentences,
    pub ghosts: GhostRanges,
    history: HistoryManager,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new("")
    }
}

impl EditorState {
    /// State over `text` with the cursor at 0 and default history limits.
    pub fn new(text: &str) -> Self {
        Self::with_limits(text, HistoryLimits::default())
    }

    pub fn with_limits(text: &str, limits: HistoryLimits) -> Self {
        Self {
            buffer: Buffer::new(text),
            doc: parse(text),
            cursor: 0,
            word_selection: None,
            sentence_selection: None,
            committed: CommittedSentences::default(),
            ghosts: GhostRanges::default(),
            history: HistoryManager::new(limits),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Current parsed view of the buffer.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Move the cursor, clamped to the buffer.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.buffer.len_chars());
    }

    pub fn clear_selections(&mut self) {
        self.word_selection = None;
        self.sentence_selection = None;
    }

    pub fn has_selection(&self) -> bool {
        self.word_selection.is_some() || self.sentence_selection.is_some()
    }

    /// Replace `[start,end)` with `text`, reparse, translate ghosts and remap
    /// committed sentences by their start offsets. Does not move the cursor.
    pub fn splice(&mut self, start: usize, end: usize, text: &str) -> TextEdit {
        let len = self.buffer.len_chars();
        let start = start.min(len);
        let end = end.clamp(start, len);
        self.buffer.remove(start, end);
        let inserted = self.buffer.insert(start, text);
        let edit = TextEdit::replace(start, end, inserted);

        let new_doc = parse(&self.buffer.text());
        self.ghosts.translate_delete(start, end);
        self.ghosts.translate_insert(start, inserted);
        self.committed
            .remap_through_edit(&self.doc, &new_doc, |s| edit.map_sentence(s));
        self.committed.retain_below(new_doc.sentence_count());
        self.doc = new_doc;
        self.cursor = self.cursor.min(self.buffer.len_chars());
        edit
    }

    /// Replace the whole text and reparse. Ghosts and committed indices are
    /// left to the caller (reorder remaps them itself); stale indices past the
    /// new sentence count are dropped.
    pub fn replace_text(&mut self, text: &str) {
        self.buffer.replace_all(text);
        self.doc = parse(text);
        self.committed.retain_below(self.doc.sentence_count());
        self.ghosts.clamp_to(self.buffer.len_chars());
        self.cursor = self.cursor.min(self.buffer.len_chars());
    }

    /// Capture the restorable part of the state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.buffer, self.cursor, &self.ghosts, &self.committed)
    }

    /// Give history the chance to record the pre-edit state.
    pub fn snapshot_before_edit(&mut self, force: bool, now: Instant) -> bool {
        let live = self.snapshot();
        self.history.snapshot_before_edit(live, force, now)
    }

    /// Record the pre-edit state as the start of a new, open typing group.
    pub fn start_history_group(&mut self, now: Instant) -> bool {
        let live = self.snapshot();
        self.history.start_group(live, now)
    }

    pub fn end_history_group(&mut self) {
        self.history.end_group();
    }

    /// Restore the newest undo entry. Returns false when history is empty.
    pub fn undo(&mut self) -> bool {
        let live = self.snapshot();
        match self.history.undo(live) {
            Some(prev) => {
                self.restore(prev);
                true
            }
            None => false,
        }
    }

    /// Re-apply the newest undone entry. Returns false when nothing to redo.
    pub fn redo(&mut self) -> bool {
        let live = self.snapshot();
        match self.history.redo(live) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snap: Snapshot) {
        self.doc = parse(&snap.buffer.text());
        self.buffer = snap.buffer;
        self.cursor = snap.cursor.min(self.buffer.len_chars());
        self.ghosts = snap.ghosts;
        self.committed = snap.committed;
        self.clear_selections();
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }
    /// Number of snapshots skipped because they matched the undo top.
    pub fn undo_snapshots_skipped(&self) -> u64 {
        self.history.snapshots_skipped()
    }
    pub fn history_limits(&self) -> HistoryLimits {
        self.history.limits()
    }
    pub fn insert_run(&self) -> &InsertRun {
        self.history.insert_run()
    }

    /// Assert cross-field invariants (debug builds only).
    pub fn debug_check_invariants(&self) {
        let len = self.buffer.len_chars();
        let count = self.doc.sentence_count();
        debug_assert!(self.cursor <= len, "cursor {} past len {}", self.cursor, len);
        debug_assert_eq!(self.doc.len, len, "document out of sync with buffer");
        debug_assert!(
            self.committed.iter().all(|i| i < count),
            "committed index past sentence count {count}"
        );
        debug_assert!(self.ghosts.is_normalized(), "ghost ranges not normalized");
        debug_assert!(
            self.ghosts.as_slice().iter().all(|r| r.end <= len),
            "ghost range past len {len}"
        );
        if let Some(sel) = self.word_selection {
            debug_assert!(sel.bounds().1 < self.doc.word_count(), "word selection out of range");
        }
        if let Some(sel) = self.sentence_selection {
            debug_assert!(sel.bounds().1 < count, "sentence selection out of range");
        }
    }
}

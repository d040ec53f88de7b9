use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use core_text::Buffer;
use tracing::trace;

use crate::committed::CommittedSentences;
use crate::ghost::GhostRanges;

/// Default per-stack cap on retained snapshots.
pub const UNDO_HISTORY_MAX: usize = 100;

/// Default typing-burst merge window.
pub const BATCH_WINDOW_DEFAULT: Duration = Duration::from_millis(500);

/// History tuning (batch window and stack depth).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub batch_window: Duration,
    pub max_depth: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            batch_window: BATCH_WINDOW_DEFAULT,
            max_depth: UNDO_HISTORY_MAX,
        }
    }
}

/// Immutable capture of everything undo restores. Selections are deliberately
/// absent: restoring always clears them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub buffer: Buffer,
    pub cursor: usize,
    pub ghosts: GhostRanges,
    pub committed: CommittedSentences,
    /// Content hash at capture, used for dedupe against the undo top.
    pub hash: u64,
}

impl Snapshot {
    pub fn capture(
        buffer: &Buffer,
        cursor: usize,
        ghosts: &GhostRanges,
        committed: &CommittedSentences,
    ) -> Self {
        let mut h = DefaultHasher::new();
        for chunk in buffer.rope().chunks() {
            h.write(chunk.as_bytes());
        }
        cursor.hash(&mut h);
        ghosts.hash(&mut h);
        committed.hash(&mut h);
        Self {
            buffer: buffer.clone(),
            cursor,
            ghosts: ghosts.clone(),
            committed: committed.clone(),
            hash: h.finish(),
        }
    }
}

/// Open typing group. `Inactive` after a forced snapshot, undo or redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    Active { started_at: Instant, edits: u32 },
}

/// Pre-edit snapshot stacks with time-window batching.
///
/// Callers snapshot *before* mutating. Unforced snapshots arriving within
/// `batch_window` of the one that opened the current group are absorbed into
/// it, so a typing burst undoes as one unit. Forced snapshots always push and
/// close the group.
#[derive(Debug)]
pub struct HistoryManager {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    insert_run: InsertRun,
    limits: HistoryLimits,
    snapshots_skipped: u64,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(HistoryLimits::default())
    }
}

impl HistoryManager {
    pub fn new(limits: HistoryLimits) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            insert_run: InsertRun::Inactive,
            limits,
            snapshots_skipped: 0,
        }
    }

    pub fn limits(&self) -> HistoryLimits {
        self.limits
    }
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> &InsertRun {
        &self.insert_run
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }

    /// Record the pre-edit state. Returns true if a snapshot was pushed.
    ///
    /// Any call clears the redo stack: the caller is about to diverge from it.
    pub fn snapshot_before_edit(&mut self, live: Snapshot, force: bool, now: Instant) -> bool {
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
        if !force
            && let InsertRun::Active { started_at, edits } = &mut self.insert_run
            && now.saturating_duration_since(*started_at) < self.limits.batch_window
        {
            *edits += 1;
            trace!(target: "state.undo", edits = *edits, "snapshot_absorbed");
            return false;
        }
        let pushed = self.push(live);
        self.insert_run = if force {
            InsertRun::Inactive
        } else {
            InsertRun::Active {
                started_at: now,
                edits: 1,
            }
        };
        pushed
    }

    /// Always record `live` as the start of a new typing group that stays
    /// open, so unforced edits inside the window join it.
    pub fn start_group(&mut self, live: Snapshot, now: Instant) -> bool {
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
        let pushed = self.push(live);
        self.insert_run = InsertRun::Active {
            started_at: now,
            edits: 1,
        };
        pushed
    }

    fn push(&mut self, snap: Snapshot) -> bool {
        if let Some(last) = self.undo_stack.back()
            && last.hash == snap.hash
        {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), hash = snap.hash, "snapshot_dedupe_skip");
            return false;
        }
        let hash = snap.hash;
        self.undo_stack.push_back(snap);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), hash, "push_snapshot");
        if self.undo_stack.len() > self.limits.max_depth {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        true
    }

    /// Close the current typing group.
    pub fn end_group(&mut self) {
        self.insert_run = InsertRun::Inactive;
    }

    /// Swap `live` for the newest undo entry. `None` when there is nothing to undo.
    pub fn undo(&mut self, live: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop_back()?;
        self.insert_run = InsertRun::Inactive;
        self.redo_stack.push_back(live);
        if self.redo_stack.len() > self.limits.max_depth {
            self.redo_stack.pop_front();
        }
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        Some(prev)
    }

    /// Swap `live` for the newest redo entry. `None` when there is nothing to redo.
    pub fn redo(&mut self, live: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop_back()?;
        self.insert_run = InsertRun::Inactive;
        self.undo_stack.push_back(live);
        if self.undo_stack.len() > self.limits.max_depth {
            self.undo_stack.pop_front();
        }
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(text: &str, cursor: usize) -> Snapshot {
        Snapshot::capture(
            &Buffer::new(text),
            cursor,
            &GhostRanges::default(),
            &CommittedSentences::default(),
        )
    }

    #[test]
    fn unforced_within_window_is_absorbed() {
        let mut h = HistoryManager::default();
        let t0 = Instant::now();
        assert!(h.snapshot_before_edit(snap("", 0), false, t0));
        assert!(!h.snapshot_before_edit(snap("a", 1), false, t0 + Duration::from_millis(100)));
        assert!(!h.snapshot_before_edit(snap("ab", 2), false, t0 + Duration::from_millis(499)));
        assert_eq!(h.undo_depth(), 1);
        // Window measured from the group's first snapshot.
        assert!(h.snapshot_before_edit(snap("abc", 3), false, t0 + Duration::from_millis(500)));
        assert_eq!(h.undo_depth(), 2);
    }

    #[test]
    fn forced_snapshot_closes_group() {
        let mut h = HistoryManager::default();
        let t0 = Instant::now();
        h.snapshot_before_edit(snap("", 0), false, t0);
        assert!(h.snapshot_before_edit(snap("a", 1), true, t0 + Duration::from_millis(10)));
        assert_eq!(h.insert_run(), &InsertRun::Inactive);
        assert!(h.snapshot_before_edit(snap("", 0), false, t0 + Duration::from_millis(20)));
        assert_eq!(h.undo_depth(), 3);
    }

    #[test]
    fn started_group_absorbs_following_inserts() {
        let mut h = HistoryManager::default();
        let t0 = Instant::now();
        h.snapshot_before_edit(snap("", 0), false, t0);
        assert!(h.start_group(snap("a", 1), t0 + Duration::from_millis(10)));
        assert!(matches!(h.insert_run(), InsertRun::Active { .. }));
        assert!(!h.snapshot_before_edit(snap("ab", 2), false, t0 + Duration::from_millis(20)));
        assert_eq!(h.undo_depth(), 2);
        // Window restarts at the new group.
        assert!(!h.snapshot_before_edit(snap("abc", 3), false, t0 + Duration::from_millis(505)));
        assert_eq!(h.undo_depth(), 2);
    }

    #[test]
    fn identical_snapshot_is_skipped() {
        let mut h = HistoryManager::default();
        let t0 = Instant::now();
        h.snapshot_before_edit(snap("x", 1), true, t0);
        assert!(!h.snapshot_before_edit(snap("x", 1), true, t0));
        assert_eq!(h.undo_depth(), 1);
        assert_eq!(h.snapshots_skipped(), 1);
    }

    #[test]
    fn undo_redo_swap_live_state() {
        let mut h = HistoryManager::default();
        let t0 = Instant::now();
        h.snapshot_before_edit(snap("", 0), true, t0);
        let restored = h.undo(snap("abc", 3)).unwrap();
        assert_eq!(restored.buffer.text(), "");
        assert_eq!(h.redo_depth(), 1);
        let again = h.redo(snap("", 0)).unwrap();
        assert_eq!(again.buffer.text(), "abc");
        assert_eq!(h.undo_depth(), 1);
        assert!(h.redo(snap("abc", 3)).is_none());
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut h = HistoryManager::default();
        let t0 = Instant::now();
        h.snapshot_before_edit(snap("", 0), true, t0);
        h.undo(snap("a", 1));
        assert_eq!(h.redo_depth(), 1);
        h.snapshot_before_edit(snap("", 0), false, t0);
        assert_eq!(h.redo_depth(), 0);
    }

    #[test]
    fn depth_cap_evicts_oldest() {
        let mut h = HistoryManager::new(HistoryLimits {
            batch_window: Duration::ZERO,
            max_depth: 3,
        });
        let t0 = Instant::now();
        for i in 0..5 {
            h.snapshot_before_edit(snap(&"x".repeat(i), i), true, t0);
        }
        assert_eq!(h.undo_depth(), 3);
        let mut texts = Vec::new();
        let mut live = snap("xxxxx", 5);
        while let Some(prev) = h.undo(live.clone()) {
            texts.push(prev.buffer.text());
            live = prev;
        }
        assert_eq!(texts, vec!["xxxx", "xxx", "xx"]);
    }
}

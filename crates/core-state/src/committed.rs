//! Committed-sentence set and its index remapping rules.
//!
//! Indices refer to `Document::sentences` of the *current* text, so every
//! transition that changes the sentence list must also remap this set. Three
//! families of edits exist:
//!
//! * sentence-selection delete: exact index arithmetic (`remap_after_sentence_delete`);
//! * reorder: block moves by one, neighbor takes the vacated edge (`remap_after_reorder`);
//! * char-level edits: each committed sentence's start offset is carried through
//!   the edit and re-resolved in the new document (`remap_through_edit`).

use std::collections::BTreeSet;

use core_text::{Document, Sentence};
use serde::Serialize;

/// A single splice `[at, at+removed)` replaced by `inserted` chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    pub at: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl TextEdit {
    pub fn insert(at: usize, inserted: usize) -> Self {
        Self {
            at,
            removed: 0,
            inserted,
        }
    }

    pub fn delete(start: usize, end: usize) -> Self {
        Self {
            at: start,
            removed: end.saturating_sub(start),
            inserted: 0,
        }
    }

    pub fn replace(start: usize, end: usize, inserted: usize) -> Self {
        Self {
            at: start,
            removed: end.saturating_sub(start),
            inserted,
        }
    }

    fn removed_end(&self) -> usize {
        self.at + self.removed
    }

    /// Offset `pos` carried through the edit. Offsets inside the removed span
    /// collapse onto `at`; an offset equal to `at` on a pure insertion shifts.
    pub fn map_offset(&self, pos: usize) -> usize {
        if pos < self.at {
            pos
        } else if pos >= self.removed_end() {
            pos - self.removed + self.inserted
        } else {
            self.at
        }
    }

    /// New start offset of `sentence`, or `None` when the edit removed it entirely.
    pub fn map_sentence(&self, sentence: &Sentence) -> Option<usize> {
        let wholly_removed = self.removed > 0
            && sentence.start >= self.at
            && sentence.end <= self.removed_end()
            && sentence.end > sentence.start;
        if wholly_removed {
            None
        } else {
            Some(self.map_offset(sentence.start))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CommittedSentences(BTreeSet<usize>);

impl CommittedSentences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.0.contains(&idx)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn insert(&mut self, idx: usize) -> bool {
        self.0.insert(idx)
    }

    pub fn remove(&mut self, idx: usize) -> bool {
        self.0.remove(&idx)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Flip a single sentence. Returns the new committed state.
    pub fn toggle(&mut self, idx: usize) -> bool {
        if self.0.remove(&idx) {
            false
        } else {
            self.0.insert(idx);
            true
        }
    }

    /// All-or-nothing toggle of `lo..=hi`: uncommit when every index is
    /// committed, otherwise commit them all. Returns the new state.
    pub fn toggle_range(&mut self, lo: usize, hi: usize) -> bool {
        let all = (lo..=hi).all(|i| self.0.contains(&i));
        if all {
            for i in lo..=hi {
                self.0.remove(&i);
            }
        } else {
            self.0.extend(lo..=hi);
        }
        !all
    }

    /// True if any index in `lo..=hi` is committed.
    pub fn any_in(&self, lo: usize, hi: usize) -> bool {
        self.0.range(lo..=hi).next().is_some()
    }

    /// Sentences `lo..=hi` were deleted: drop them and shift later indices down.
    pub fn remap_after_sentence_delete(&mut self, lo: usize, hi: usize) {
        let span = hi - lo + 1;
        self.0 = self
            .0
            .iter()
            .filter_map(|&i| match i {
                i if i < lo => Some(i),
                i if i <= hi => None,
                i => Some(i - span),
            })
            .collect();
    }

    /// Block `lo..=hi` moved one slot down (`down`) or up past its neighbor.
    pub fn remap_after_reorder(&mut self, lo: usize, hi: usize, down: bool) {
        self.0 = self
            .0
            .iter()
            .map(|&i| {
                if down {
                    match i {
                        i if (lo..=hi).contains(&i) => i + 1,
                        i if i == hi + 1 => lo,
                        i => i,
                    }
                } else {
                    match i {
                        i if (lo..=hi).contains(&i) => i - 1,
                        i if i + 1 == lo => hi,
                        i => i,
                    }
                }
            })
            .collect();
    }

    /// Re-resolve every committed sentence after a char-level edit.
    ///
    /// `map` yields the sentence's new start offset (or `None` if the sentence
    /// no longer exists); the offset is looked up in `new`.
    pub fn remap_through_edit<F>(&mut self, old: &Document, new: &Document, map: F)
    where
        F: Fn(&Sentence) -> Option<usize>,
    {
        if new.sentence_count() == 0 {
            self.0.clear();
            return;
        }
        self.0 = self
            .0
            .iter()
            .filter_map(|&i| old.sentences.get(i))
            .filter_map(&map)
            .map(|pos| new.sentence_index_at(pos))
            .collect();
    }

    /// Drop indices that no longer name a sentence.
    pub fn retain_below(&mut self, count: usize) {
        self.0.retain(|&i| i < count);
    }
}

impl FromIterator<usize> for CommittedSentences {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

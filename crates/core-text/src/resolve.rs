//! Position resolver: offset <-> word / sentence index lookups.
//!
//! Every function clamps instead of panicking. An empty document resolves to
//! index 0 and the empty range `0..0`.

use crate::parse::Document;
use serde::Serialize;

/// Half-open char range `[start,end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

impl CharRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Normalize an index pair to `(min, max)` clamped to `count` units.
fn clamp_pair(a: usize, b: usize, count: usize) -> Option<(usize, usize)> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    Some((a.min(b).min(last), a.max(b).min(last)))
}

impl Document {
    /// Sentence containing `pos`; inter-sentence gaps resolve to the preceding sentence.
    pub fn sentence_index_at(&self, pos: usize) -> usize {
        let Some(last) = self.sentences.len().checked_sub(1) else {
            return 0;
        };
        if pos >= self.len {
            return last;
        }
        self.sentences
            .iter()
            .rposition(|s| s.start <= pos)
            .unwrap_or(0)
    }

    /// Word containing or immediately following `pos`; past all words resolves to the last.
    pub fn word_index_at(&self, pos: usize) -> usize {
        match self.words.iter().position(|w| w.end > pos) {
            Some(i) => i,
            None => self.words.len().saturating_sub(1),
        }
    }

    /// Char range covered by words `a..=b` (either order).
    pub fn word_range_for(&self, a: usize, b: usize) -> CharRange {
        match clamp_pair(a, b, self.words.len()) {
            Some((lo, hi)) => CharRange::new(self.words[lo].start, self.words[hi].end),
            None => CharRange::default(),
        }
    }

    /// Char range covered by sentences `a..=b` (either order).
    pub fn sentence_range_for(&self, a: usize, b: usize) -> CharRange {
        match clamp_pair(a, b, self.sentences.len()) {
            Some((lo, hi)) => CharRange::new(self.sentences[lo].start, self.sentences[hi].end),
            None => CharRange::default(),
        }
    }

    /// True if `pos` falls inside any sentence of the inclusive index range `a..=b`.
    pub fn is_char_in_sentence_selection(&self, pos: usize, a: usize, b: usize) -> bool {
        match clamp_pair(a, b, self.sentences.len()) {
            Some((lo, hi)) => self.sentences[lo..=hi].iter().any(|s| s.contains(pos)),
            None => false,
        }
    }

    /// Indices of every sentence whose `[start,end)` span overlaps `range`.
    pub fn sentences_overlapping(&self, range: CharRange) -> impl Iterator<Item = usize> + '_ {
        self.sentences
            .iter()
            .filter(move |s| s.start < range.end.max(range.start + 1) && range.start < s.end)
            .map(|s| s.index)
    }
}

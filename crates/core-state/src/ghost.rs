//! Ghost ranges: text kept visible after being replaced inside committed content.
//!
//! Invariants (checked by `is_normalized`):
//! - ranges are non-empty, sorted by `start` and pairwise disjoint;
//! - adjacent ranges are merged.
//!
//! Every buffer insertion or deletion must be mirrored through
//! `translate_insert` / `translate_delete` so offsets keep pointing at the same
//! characters.

use core_text::CharRange;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GhostRanges {
    ranges: Vec<CharRange>,
}

impl GhostRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[CharRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// True if `pos` lies inside any ghost range.
    pub fn contains(&self, pos: usize) -> bool {
        self.ranges.iter().any(|r| r.start <= pos && pos < r.end)
    }

    /// Add a range, merging it with any range it overlaps or touches.
    pub fn add(&mut self, range: CharRange) {
        if range.is_empty() {
            return;
        }
        self.ranges.push(range);
        self.normalize();
    }

    /// Shift ranges for `len` chars inserted at `at`.
    ///
    /// Ranges starting at or after `at` shift; ranges straddling `at` grow;
    /// ranges ending at or before `at` are untouched.
    pub fn translate_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        for r in &mut self.ranges {
            if r.start >= at {
                r.start += len;
                r.end += len;
            } else if r.end > at {
                r.end += len;
            }
        }
    }

    /// Shift / truncate / drop ranges for the removal of `[start,end)`.
    ///
    /// Surviving pieces of a range that contained the removed span end up
    /// adjacent and are kept as one range.
    pub fn translate_delete(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let removed = end - start;
        for r in &mut self.ranges {
            if r.end <= start {
                continue;
            }
            if r.start >= end {
                r.start -= removed;
                r.end -= removed;
                continue;
            }
            let new_start = r.start.min(start);
            let new_end = if r.end > end {
                r.end - removed
            } else {
                start
            };
            r.start = new_start;
            r.end = new_end;
        }
        self.normalize();
    }

    /// Take all ranges out, leaving the set empty.
    pub fn take(&mut self) -> Vec<CharRange> {
        std::mem::take(&mut self.ranges)
    }

    /// Drop anything reaching past `len` chars (truncating the last range).
    pub fn clamp_to(&mut self, len: usize) {
        for r in &mut self.ranges {
            r.start = r.start.min(len);
            r.end = r.end.min(len);
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        self.ranges.retain(|r| !r.is_empty());
        self.ranges.sort_by_key(|r| (r.start, r.end));
        let mut merged: Vec<CharRange> = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..) {
            match merged.last_mut() {
                Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
                _ => merged.push(r),
            }
        }
        self.ranges = merged;
    }

    /// Sorted, disjoint, non-empty.
    pub fn is_normalized(&self) -> bool {
        self.ranges.iter().all(|r| !r.is_empty())
            && self.ranges.windows(2).all(|w| w[0].end < w[1].start)
    }
}

impl FromIterator<CharRange> for GhostRanges {
    fn from_iter<I: IntoIterator<Item = CharRange>>(iter: I) -> Self {
        let mut g = Self {
            ranges: iter.into_iter().collect(),
        };
        g.normalize();
        g
    }
}

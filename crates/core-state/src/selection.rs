//! Word / sentence selection model.
//!
//! A selection is an index range over words or sentences with a fixed anchor
//! (`start`), a moving edge (`end`) and the direction it was first extended in.
//! Transitions are pure reducers over `Option<IndexSelection>`:
//!
//! * No selection + step: anchor at the unit the caller resolved for the caret
//!   (`None` when there is nothing to select in that direction).
//! * Selection + step: `end` moves by one. Moving back past the anchor against
//!   the recorded direction clears the selection; moving outside `0..count`
//!   holds it unchanged.
//!
//! The effective range is always `min(start,end)..=max(start,end)`.

use serde::Serialize;

/// Horizontal step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

/// Granularity of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionUnit {
    Word,
    Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IndexSelection {
    /// Anchor index (first unit chosen).
    pub start: usize,
    /// Extending edge.
    pub end: usize,
    pub direction: Direction,
}

impl IndexSelection {
    /// Zero-width selection anchored at `anchor`.
    pub fn anchored(anchor: usize, direction: Direction) -> Self {
        Self {
            start: anchor,
            end: anchor,
            direction,
        }
    }

    /// Inclusive `(lo, hi)` index range.
    pub fn bounds(&self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }

    /// Number of units covered.
    pub fn span(&self) -> usize {
        let (lo, hi) = self.bounds();
        hi - lo + 1
    }

    pub fn contains(&self, idx: usize) -> bool {
        let (lo, hi) = self.bounds();
        lo <= idx && idx <= hi
    }

    /// Same selection moved by `delta` units (used when the selected block is reordered).
    pub fn shifted(&self, delta: isize) -> Self {
        Self {
            start: self.start.saturating_add_signed(delta),
            end: self.end.saturating_add_signed(delta),
            direction: self.direction,
        }
    }
}

/// Apply one selection step.
///
/// `anchor` is the unit resolved for the caret; it is only consulted when no
/// selection exists. `count` is the number of selectable units.
pub fn step(
    prev: Option<IndexSelection>,
    direction: Direction,
    anchor: Option<usize>,
    count: usize,
) -> Option<IndexSelection> {
    let Some(sel) = prev else {
        return anchor
            .filter(|a| *a < count)
            .map(|a| IndexSelection::anchored(a, direction));
    };
    let proposed = match direction {
        Direction::Left => sel.end.checked_sub(1),
        Direction::Right => Some(sel.end + 1),
    };
    // Crossing back over the anchor collapses.
    let crosses = match (sel.direction, direction) {
        (Direction::Right, Direction::Left) => proposed.is_none_or(|e| e < sel.start),
        (Direction::Left, Direction::Right) => proposed.is_some_and(|e| e > sel.start),
        _ => false,
    };
    if crosses {
        return None;
    }
    match proposed {
        Some(end) if end < count => Some(IndexSelection { end, ..sel }),
        // Out of range: hold.
        _ => Some(sel),
    }
}

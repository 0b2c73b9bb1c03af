//! Geometry primitives: [`Cell`] coordinates and [`Range`] rectangles.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate: `x` is the column and `y` the row, counted from the
/// top-left corner.
///
/// Coordinates are signed, so positions left of or above a grid can be
/// expressed and then rejected with an error.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This cell moved by `dx` columns and `dy` rows.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours in the order left, right, up, down.
    ///
    /// Searches expand neighbours in exactly this order, so changing it
    /// changes every visitation sequence.
    #[inline]
    pub const fn neighbors_4(self) -> [Cell; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

/// Row-major: rows first, then columns.
impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, d: Cell) -> Cell {
        self.shift(d.x, d.y)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, d: Cell) -> Cell {
        self.shift(-d.x, -d.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// An axis-aligned block of cells: columns `min.x..max.x` and rows
/// `min.y..max.y`, upper bounds excluded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Cell,
    pub max: Cell,
}

impl Range {
    /// The block spanned by two corner coordinates, given in any order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Range {
            min: Cell::new(x0.min(x1), y0.min(y1)),
            max: Cell::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// The square of cells within Chebyshev distance `radius` of `center`,
    /// both edges inclusive. A negative radius counts as zero, and edges
    /// past the `i32` limits are clamped to them.
    pub fn around(center: Cell, radius: i32) -> Self {
        let r = radius.max(0);
        let lo = |v: i32| v.saturating_sub(r);
        let hi = |v: i32| v.saturating_add(r).saturating_add(1);
        Range {
            min: Cell::new(lo(center.x), lo(center.y)),
            max: Cell::new(hi(center.x), hi(center.y)),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.max.x.saturating_sub(self.min.x)
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Number of cells covered.
    pub fn len(self) -> usize {
        self.width().max(0) as usize * self.height().max(0) as usize
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        (self.min.x..self.max.x).contains(&c.x) && (self.min.y..self.max.y).contains(&c.y)
    }

    /// The cells covered by both ranges. Disjoint ranges give
    /// `Range::default()`.
    pub fn intersect(self, other: Range) -> Self {
        let min = Cell::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Cell::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        let r = Range { min, max };
        if r.is_empty() { Range::default() } else { r }
    }

    /// Every covered cell, row by row.
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            next: 0,
            end: self.len(),
        }
    }
}

impl IntoIterator for Range {
    type Item = Cell;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Row-major iterator returned by [`Range::iter`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    next: usize,
    end: usize,
}

impl Iterator for RangeIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.next >= self.end {
            return None;
        }
        let w = self.range.width() as usize;
        let (row, col) = (self.next / w, self.next % w);
        self.next += 1;
        Some(self.range.min.shift(col as i32, row as i32))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RangeIter {}

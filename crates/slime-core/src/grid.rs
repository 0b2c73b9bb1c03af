//! The blocked-cell grid that searches run over.
//!
//! A [`Grid`] is a dense row-major array of blocked flags with fixed
//! dimensions. It is an ordinary owned value: searches borrow it
//! immutably and barrier editors mutate it between searches through
//! [`Grid::set_blocked`] and [`Grid::set_blocked_range`].

use crate::error::GridError;
use crate::geom::{Cell, Range};

/// Character used for a blocked cell in the textual row form.
pub const BLOCKED_CHAR: char = '#';
/// Character used for an open cell in the textual row form.
pub const OPEN_CHAR: char = '.';

/// A rectangular grid of blocked/open cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    blocked: Vec<bool>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a new grid with every cell open.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive. Use
    /// [`try_new`](Self::try_new) to handle that case as an error.
    pub fn new(width: i32, height: i32) -> Self {
        match Self::try_new(width, height) {
            Ok(g) => g,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a new grid with every cell open, rejecting non-positive
    /// dimensions.
    pub fn try_new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        Ok(Self {
            blocked: vec![false; width as usize * height as usize],
            width,
            height,
        })
    }

    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.blocked.len()
    }

    /// Always false: grids have positive dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocked.is_empty()
    }

    /// Whether `cell` lies within `[0, width) × [0, height)`.
    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.y as usize * self.width as usize + cell.x as usize)
    }

    fn out_of_range(&self, cell: Cell) -> GridError {
        GridError::OutOfRange {
            cell,
            width: self.width,
            height: self.height,
        }
    }

    /// Whether `cell` is blocked.
    pub fn is_blocked(&self, cell: Cell) -> Result<bool, GridError> {
        match self.idx(cell) {
            Some(i) => Ok(self.blocked[i]),
            None => Err(self.out_of_range(cell)),
        }
    }

    /// Whether `cell` is in bounds and open.
    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|i| !self.blocked[i])
    }

    /// Set the blocked flag of a single cell.
    ///
    /// Must not be called while a search borrowing this grid is running;
    /// the borrow checker enforces this for single-threaded callers.
    pub fn set_blocked(&mut self, cell: Cell, value: bool) -> Result<(), GridError> {
        match self.idx(cell) {
            Some(i) => {
                self.blocked[i] = value;
                Ok(())
            }
            None => Err(self.out_of_range(cell)),
        }
    }

    /// Set the blocked flag of every cell in `rng` that lies inside the
    /// grid. Returns the number of cells written.
    ///
    /// This is the area-painting surface used by brushes; the part of `rng`
    /// outside the grid is ignored.
    pub fn set_blocked_range(&mut self, rng: Range, value: bool) -> usize {
        let clipped = rng.intersect(self.bounds());
        let w = self.width as usize;
        for c in clipped.iter() {
            self.blocked[c.y as usize * w + c.x as usize] = value;
        }
        clipped.len()
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: bool) {
        self.blocked.fill(value);
    }

    /// Set every cell from a function of its coordinate, in row-major order.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Cell) -> bool) {
        for (c, b) in self.bounds().iter().zip(self.blocked.iter_mut()) {
            *b = f(c);
        }
    }

    /// Number of blocked cells.
    pub fn count_blocked(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// The up-to-4 in-bounds, open neighbours of `cell`, in the order left,
    /// right, up, down.
    ///
    /// Only the neighbours are filtered: `cell` itself may be blocked or
    /// even out of bounds.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors_4()
            .into_iter()
            .filter(move |&n| self.is_open(n))
    }

    /// Iterate over `(Cell, blocked)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.bounds()
            .iter()
            .zip(self.blocked.iter().copied())
    }

    /// Render the grid as one string per row, using [`BLOCKED_CHAR`] and
    /// [`OPEN_CHAR`].
    pub fn to_rows(&self) -> Vec<String> {
        self.blocked
            .chunks(self.width as usize)
            .map(|row| {
                row.iter()
                    .map(|&b| if b { BLOCKED_CHAR } else { OPEN_CHAR })
                    .collect()
            })
            .collect()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de::Error as _;

    #[derive(serde::Serialize, serde::Deserialize)]
    struct GridRepr {
        width: i32,
        height: i32,
        rows: Vec<String>,
    }

    impl serde::Serialize for Grid {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            GridRepr {
                width: self.width,
                height: self.height,
                rows: self.to_rows(),
            }
            .serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for Grid {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = GridRepr::deserialize(deserializer)?;
            if repr.width <= 0 || repr.height <= 0 {
                return Err(D::Error::custom(GridError::InvalidSize {
                    width: repr.width,
                    height: repr.height,
                }));
            }
            // Shape is checked against the rows present before allocating.
            if repr.rows.len() != repr.height as usize {
                return Err(D::Error::custom(format!(
                    "expected {} rows, found {}",
                    repr.height,
                    repr.rows.len()
                )));
            }
            for (y, row) in repr.rows.iter().enumerate() {
                if row.chars().count() != repr.width as usize {
                    return Err(D::Error::custom(format!(
                        "row {y} does not have width {}",
                        repr.width
                    )));
                }
            }
            let mut grid = Grid::try_new(repr.width, repr.height).map_err(D::Error::custom)?;
            for (y, row) in repr.rows.iter().enumerate() {
                for (x, ch) in row.chars().enumerate() {
                    let blocked = match ch {
                        BLOCKED_CHAR => true,
                        OPEN_CHAR => false,
                        other => {
                            return Err(D::Error::custom(format!(
                                "invalid character {other:?} at ({x}, {y})"
                            )));
                        }
                    };
                    grid.blocked[y * repr.width as usize + x] = blocked;
                }
            }
            Ok(grid)
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(4, 2);
        g.set_blocked(Cell::new(3, 0), true).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, r#"{"width":4,"height":2,"rows":["...#","...."]}"#);
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn grid_rejects_ragged_rows() {
        let json = r##"{"width":3,"height":2,"rows":["...","#."]}"##;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn grid_rejects_bad_characters() {
        let json = r#"{"width":2,"height":1,"rows":["x."]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn grid_rejects_size_larger_than_rows() {
        let json = r#"{"width":2147483647,"height":2147483647,"rows":[]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
        let json = r#"{"width":2147483647,"height":1,"rows":["."]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn grid_rejects_zero_size() {
        let json = r#"{"width":0,"height":0,"rows":[]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }
}

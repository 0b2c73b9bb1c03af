//! Freehand barrier painting.

use slime_core::{Cell, Grid, Range};

/// Brush radius for pixel-scale maps.
pub const DEFAULT_RADIUS: i32 = 5;
/// Radius cleared around picked endpoints.
pub const DEFAULT_CLEAR_RADIUS: i32 = 7;

/// A square brush painting every cell within Chebyshev distance `radius`
/// of its centre. Painting is clipped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    pub radius: i32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
        }
    }
}

impl Brush {
    pub fn new(radius: i32) -> Self {
        Self { radius }
    }

    /// Paint one square centred on `center`. Returns the number of cells
    /// written.
    pub fn stamp(&self, grid: &mut Grid, center: Cell, blocked: bool) -> usize {
        grid.set_blocked_range(Range::around(center, self.radius), blocked)
    }

    /// Paint squares along the straight line from `from` to `to`, both ends
    /// included.
    pub fn stroke(&self, grid: &mut Grid, from: Cell, to: Cell, blocked: bool) {
        for c in line(from, to) {
            self.stamp(grid, c, blocked);
        }
    }
}

/// Unblock the square of `radius` around `cell` so that a search endpoint
/// placed there is open and has open neighbours.
///
/// Returns the number of cells cleared.
pub fn clear_around(grid: &mut Grid, cell: Cell, radius: i32) -> usize {
    if !grid.in_bounds(cell) {
        log::warn!("clearing around {cell}, which is outside the grid");
    }
    grid.set_blocked_range(Range::around(cell, radius), false)
}

/// Bresenham line from `from` to `to`, both ends included.
pub fn line(from: Cell, to: Cell) -> Vec<Cell> {
    let dx = (to.x - from.x).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let dy = -(to.y - from.y).abs();
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cur = from;
    let mut cells = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        cells.push(cur);
        if cur == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            cur.x += sx;
        }
        if e2 <= dx {
            err += dx;
            cur.y += sy;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use slime_paths::search;

    fn c(x: i32, y: i32) -> Cell {
        Cell::new(x, y)
    }

    #[test]
    fn line_horizontal_and_diagonal() {
        assert_eq!(line(c(0, 0), c(3, 0)), vec![c(0, 0), c(1, 0), c(2, 0), c(3, 0)]);
        assert_eq!(line(c(2, 2), c(0, 0)), vec![c(2, 2), c(1, 1), c(0, 0)]);
        assert_eq!(line(c(1, 1), c(1, 1)), vec![c(1, 1)]);
    }

    #[test]
    fn line_steps_are_connected() {
        let cells = line(c(0, 0), c(7, 3));
        assert_eq!(cells.first(), Some(&c(0, 0)));
        assert_eq!(cells.last(), Some(&c(7, 3)));
        for w in cells.windows(2) {
            assert!((w[0].x - w[1].x).abs() <= 1 && (w[0].y - w[1].y).abs() <= 1);
        }
    }

    #[test]
    fn stamp_clips_to_grid() {
        let mut g = Grid::new(10, 10);
        let written = Brush::new(1).stamp(&mut g, c(0, 0), true);
        assert_eq!(written, 4);
        assert_eq!(g.count_blocked(), 4);
    }

    #[test]
    fn stroke_builds_a_wall() {
        let mut g = Grid::new(9, 9);
        Brush::new(0).stroke(&mut g, c(4, 0), c(4, 8), true);
        assert_eq!(g.count_blocked(), 9);
        let r = search(&g, c(0, 4), c(8, 4)).unwrap();
        assert!(!r.found());
    }

    #[test]
    fn thick_stroke_width() {
        let mut g = Grid::new(20, 20);
        Brush::new(2).stroke(&mut g, c(2, 10), c(17, 10), true);
        // Rows 8..=12, columns 0..=19.
        assert_eq!(g.count_blocked(), 5 * 20);
    }

    #[test]
    fn clear_around_opens_an_endpoint() {
        let mut g = Grid::new(10, 10);
        g.fill(true);
        let cleared = clear_around(&mut g, c(5, 5), 1);
        assert_eq!(cleared, 9);
        assert_eq!(g.is_blocked(c(5, 5)), Ok(false));
        assert_eq!(g.neighbors(c(5, 5)).count(), 4);
    }

    #[test]
    fn cleared_endpoints_connect_through_open_corridor() {
        let mut g = Grid::new(12, 3);
        g.fill(true);
        Brush::new(0).stroke(&mut g, c(0, 1), c(11, 1), false);
        clear_around(&mut g, c(0, 0), 1);
        clear_around(&mut g, c(11, 2), 1);
        let r = search(&g, c(0, 0), c(11, 2)).unwrap();
        assert!(r.found());
    }
}

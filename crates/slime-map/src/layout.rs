//! Plain-text barrier layouts.
//!
//! A layout is one line per row, `#` for a blocked cell and `.` for an open
//! one. Every line must have the same width:
//!
//! ```text
//! ....
//! .##.
//! ....
//! ```

use std::fmt;

use slime_core::grid::{BLOCKED_CHAR, OPEN_CHAR};
use slime_core::{Cell, Grid};

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout has no cells.
    Empty,
    /// Line `line` is not as wide as the first one.
    InconsistentSize { line: usize, expected: usize, found: usize },
    /// A character other than `#` or `.` was found.
    InvalidRune { ch: char, pos: Cell },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: no cells"),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "layout: line {line} has width {found}, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Parse a layout into a grid.
///
/// Leading and trailing whitespace around the whole text is ignored, as are
/// trailing `\r` characters, but not whitespace inside lines.
pub fn parse_layout(s: &str) -> Result<Grid, LayoutError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(LayoutError::Empty);
    }

    let rows: Vec<Vec<char>> = s
        .lines()
        .map(|l| l.trim_end_matches('\r').chars().collect())
        .collect();
    let width = rows[0].len();
    for (y, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(LayoutError::InconsistentSize {
                line: y,
                expected: width,
                found: row.len(),
            });
        }
    }

    let mut grid = Grid::try_new(width as i32, rows.len() as i32).map_err(|_| LayoutError::Empty)?;
    let mut bad = None;
    grid.fill_fn(|p| match rows[p.y as usize][p.x as usize] {
        BLOCKED_CHAR => true,
        OPEN_CHAR => false,
        other => {
            bad.get_or_insert(LayoutError::InvalidRune { ch: other, pos: p });
            false
        }
    });
    match bad {
        Some(e) => Err(e),
        None => Ok(grid),
    }
}

/// Render a grid as a layout, rows separated by `\n`, no trailing newline.
pub fn format_layout(grid: &Grid) -> String {
    grid.to_rows().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use slime_paths::{reconstruct_path, search};

    const GATE: &str = "\
...
#.#
...";

    #[test]
    fn parse_and_size() {
        let g = parse_layout(GATE).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.count_blocked(), 2);
        assert_eq!(g.is_blocked(Cell::new(0, 1)), Ok(true));
        assert_eq!(g.is_blocked(Cell::new(1, 1)), Ok(false));
    }

    #[test]
    fn format_round_trips_text() {
        let g = parse_layout(GATE).unwrap();
        assert_eq!(format_layout(&g), GATE);
    }

    #[test]
    fn gate_layout_routes_through_opening() {
        let g = parse_layout(GATE).unwrap();
        let s = Cell::new(0, 0);
        let t = Cell::new(2, 2);
        let r = search(&g, s, t).unwrap();
        let path = reconstruct_path(&r, s, t).unwrap();
        assert!(path.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn crlf_lines_are_accepted() {
        let g = parse_layout("#.\r\n.#\r\n").unwrap();
        assert_eq!(g.count_blocked(), 2);
    }

    #[test]
    fn inconsistent_size_error() {
        assert_eq!(
            parse_layout("..\n...").unwrap_err(),
            LayoutError::InconsistentSize {
                line: 1,
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn invalid_rune_reports_first_position() {
        assert_eq!(
            parse_layout("..\n.x\nyy").unwrap_err(),
            LayoutError::InvalidRune {
                ch: 'x',
                pos: Cell::new(1, 1)
            }
        );
    }

    #[test]
    fn empty_layout() {
        assert_eq!(parse_layout("  \n "), Err(LayoutError::Empty));
    }
}

use std::fmt;

use crate::geom::Cell;

/// Errors raised by [`Grid`](crate::Grid) construction and access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate lies outside `[0, width) × [0, height)`.
    OutOfRange { cell: Cell, width: i32, height: i32 },
    /// Grid dimensions must both be positive.
    InvalidSize { width: i32, height: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                cell,
                width,
                height,
            } => write!(f, "cell {cell} is outside the {width}x{height} grid"),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid grid size {width}x{height}: dimensions must be positive")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_range() {
        let e = GridError::OutOfRange {
            cell: Cell::new(-1, 3),
            width: 4,
            height: 4,
        };
        assert_eq!(e.to_string(), "cell (-1, 3) is outside the 4x4 grid");
    }
}

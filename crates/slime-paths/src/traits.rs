use slime_core::{Cell, Grid, Range};

/// Neighbour enumeration over a bounded rectangle of cells.
pub trait Pather {
    /// The rectangle searches may address. Endpoints outside it are rejected.
    fn bounds(&self) -> Range;

    /// Append the traversable neighbours of `c` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);
}

impl Pather for Grid {
    fn bounds(&self) -> Range {
        Grid::bounds(self)
    }

    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        buf.extend(Grid::neighbors(self, c));
    }
}

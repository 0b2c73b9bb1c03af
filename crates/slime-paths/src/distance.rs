use slime_core::Cell;

/// Manhattan (L1) distance between two cells: the length of a shortest
/// 4-connected path on an open grid.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

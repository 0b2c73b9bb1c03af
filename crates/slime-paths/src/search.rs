use std::collections::BinaryHeap;

use slime_core::{Cell, Range};

use crate::error::{Endpoint, SearchError};
use crate::frontier::NodeRef;
use crate::traits::Pather;

/// Sentinel distance for cells the search never reached.
pub const UNREACHABLE: u32 = u32::MAX;

/// Everything a single search produced.
///
/// Built fresh by every [`search`] call; it borrows nothing from the grid,
/// so the grid can be edited and searched again while an older result is
/// still being replayed.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) source: Cell,
    pub(crate) target: Cell,
    pub(crate) visit_order: Vec<Cell>,
    pub(crate) distance: Vec<u32>,
    pub(crate) predecessor: Vec<Option<Cell>>,
    pub(crate) visited: Vec<bool>,
    pub(crate) reached_count: usize,
    pub(crate) found: bool,
}

impl SearchResult {
    fn empty(rng: Range, source: Cell, target: Cell) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            source,
            target,
            visit_order: Vec::new(),
            distance: vec![UNREACHABLE; len],
            predecessor: vec![None; len],
            visited: vec![false; len],
            reached_count: 0,
            found: false,
        }
    }

    /// The source the search started from.
    #[inline]
    pub fn source(&self) -> Cell {
        self.source
    }

    /// The target the search looked for.
    #[inline]
    pub fn target(&self) -> Cell {
        self.target
    }

    /// Whether the target was finalized.
    #[inline]
    pub fn found(&self) -> bool {
        self.found
    }

    /// Cells in the exact order they were finalized.
    #[inline]
    pub fn visit_order(&self) -> &[Cell] {
        &self.visit_order
    }

    /// The cell `c` was reached from. `None` for the source and for cells
    /// that were never reached.
    pub fn predecessor(&self, c: Cell) -> Option<Cell> {
        self.idx(c).and_then(|i| self.predecessor[i])
    }

    /// Shortest known distance from the source, or `None` if `c` was never
    /// reached.
    pub fn distance(&self, c: Cell) -> Option<u32> {
        self.idx(c)
            .map(|i| self.distance[i])
            .filter(|&d| d != UNREACHABLE)
    }

    /// Whether `c` was ever assigned a finite distance.
    pub fn is_reached(&self, c: Cell) -> bool {
        self.distance(c).is_some()
    }

    /// Whether `c` was finalized (appears in the visit order).
    pub fn is_visited(&self, c: Cell) -> bool {
        self.idx(c).is_some_and(|i| self.visited[i])
    }

    /// Number of reached cells.
    #[inline]
    pub fn reached_count(&self) -> usize {
        self.reached_count
    }

    /// Row-major iterator over every reached cell.
    pub fn reached(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rng
            .iter()
            .zip(self.distance.iter())
            .filter(|&(_, &d)| d != UNREACHABLE)
            .map(|(c, _)| c)
    }

    #[inline]
    pub(crate) fn idx(&self, c: Cell) -> Option<usize> {
        if !self.rng.contains(c) {
            return None;
        }
        let x = (c.x - self.rng.min.x) as usize;
        let y = (c.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    #[inline]
    fn point(&self, idx: usize) -> Cell {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Cell::new(x, y)
    }
}

/// Run a uniform-cost search from `source` to `target`.
///
/// Every step costs 1. The search stops as soon as the target is
/// finalized, or when the frontier is exhausted, in which case the result
/// covers the whole component reachable from the source and
/// [`found`](SearchResult::found) is false.
///
/// Blocked cells are only a neighbour filter: a blocked source still
/// expands, and a blocked target can only be found when it is the source.
pub fn search<P: Pather + ?Sized>(
    pather: &P,
    source: Cell,
    target: Cell,
) -> Result<SearchResult, SearchError> {
    let rng = pather.bounds();
    if !rng.contains(source) {
        return Err(SearchError::InvalidEndpoint {
            endpoint: Endpoint::Source,
            cell: source,
        });
    }
    if !rng.contains(target) {
        return Err(SearchError::InvalidEndpoint {
            endpoint: Endpoint::Target,
            cell: target,
        });
    }

    log::debug!("search {source} -> {target} over {rng}");

    let mut res = SearchResult::empty(rng, source, target);
    let (Some(si), Some(ti)) = (res.idx(source), res.idx(target)) else {
        return Err(SearchError::InternalInvariant(format!(
            "endpoints {source} and {target} have no index in {rng}"
        )));
    };

    res.distance[si] = 0;
    res.reached_count = 1;

    if si == ti {
        res.visited[si] = true;
        res.visit_order.push(source);
        res.found = true;
        return Ok(res);
    }

    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq: u64 = 0;
    open.push(NodeRef {
        idx: si,
        dist: 0,
        seq,
    });

    let mut nbuf: Vec<Cell> = Vec::with_capacity(4);

    while let Some(current) = open.pop() {
        let ci = current.idx;
        // Stale entry for an already finalized cell.
        if res.visited[ci] {
            continue;
        }
        res.visited[ci] = true;
        let cp = res.point(ci);
        res.visit_order.push(cp);

        if ci == ti {
            res.found = true;
            break;
        }

        let candidate = current.dist + 1;
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = res.idx(np) else {
                continue;
            };
            if candidate >= res.distance[ni] {
                continue;
            }
            if res.distance[ni] == UNREACHABLE {
                res.reached_count += 1;
            }
            res.distance[ni] = candidate;
            res.predecessor[ni] = Some(cp);
            seq += 1;
            open.push(NodeRef {
                idx: ni,
                dist: candidate,
                seq,
            });
        }
    }

    log::debug!(
        "search {source} -> {target}: found={}, visited={}, reached={}",
        res.found,
        res.visit_order.len(),
        res.reached_count
    );
    Ok(res)
}

use slime_core::Cell;

use crate::error::{Endpoint, SearchError};
use crate::search::SearchResult;

impl SearchResult {
    /// Walk the predecessor links from `c` back to the source and return the
    /// chain in source-to-`c` order.
    ///
    /// Fails with [`SearchError::NotFound`] if `c` was never reached. The
    /// walk is bounded by the number of reached cells, so corrupt links fail
    /// with [`SearchError::InternalInvariant`] instead of looping.
    pub fn trace(&self, c: Cell) -> Result<Vec<Cell>, SearchError> {
        if !self.is_reached(c) {
            return Err(SearchError::NotFound);
        }

        let mut path = vec![c];
        let mut cur = c;
        while cur != self.source {
            if path.len() > self.reached_count {
                return Err(SearchError::InternalInvariant(format!(
                    "predecessor chain from {c} is longer than the {} reached cells",
                    self.reached_count
                )));
            }
            let Some(i) = self.idx(cur) else {
                return Err(SearchError::InternalInvariant(format!(
                    "predecessor {cur} is outside {}",
                    self.rng
                )));
            };
            match self.predecessor[i] {
                Some(prev) => {
                    path.push(prev);
                    cur = prev;
                }
                None => {
                    return Err(SearchError::InternalInvariant(format!(
                        "predecessor chain from {c} stops at {cur} before the source {}",
                        self.source
                    )));
                }
            }
        }

        path.reverse();
        Ok(path)
    }

    /// The shortest path from source to target, both included.
    pub fn path(&self) -> Result<Vec<Cell>, SearchError> {
        reconstruct_path(self, self.source, self.target)
    }
}

/// Rebuild the shortest path of a completed search, source first.
///
/// `source` and `target` must be the endpoints `result` was computed for.
/// Fails with [`SearchError::NotFound`] when the target was not found.
pub fn reconstruct_path(
    result: &SearchResult,
    source: Cell,
    target: Cell,
) -> Result<Vec<Cell>, SearchError> {
    if source != result.source {
        return Err(SearchError::InvalidEndpoint {
            endpoint: Endpoint::Source,
            cell: source,
        });
    }
    if target != result.target {
        return Err(SearchError::InvalidEndpoint {
            endpoint: Endpoint::Target,
            cell: target,
        });
    }
    if !result.found {
        return Err(SearchError::NotFound);
    }
    result.trace(target)
}

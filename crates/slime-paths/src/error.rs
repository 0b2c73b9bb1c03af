use std::fmt;

use slime_core::Cell;

/// Which end of a search an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Errors raised by [`search`](crate::search) and path reconstruction.
///
/// An unreachable target is not an error: it is reported through
/// [`SearchResult::found`](crate::SearchResult::found).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The endpoint is outside the grid, or does not belong to the result
    /// it was checked against.
    InvalidEndpoint { endpoint: Endpoint, cell: Cell },
    /// A path was requested but the search never reached the cell.
    NotFound,
    /// The predecessor links are corrupt (a cycle or a broken chain).
    InternalInvariant(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { endpoint, cell } => {
                write!(f, "invalid {endpoint} cell {cell}")
            }
            Self::NotFound => f.write_str("no path exists"),
            Self::InternalInvariant(msg) => write!(f, "search invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

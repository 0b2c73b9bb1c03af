//! Uniform-cost (Dijkstra) search over 4-connected blocked-cell grids.
//!
//! A search runs to completion in one call and returns a [`SearchResult`]
//! holding:
//!
//! - the **visit order**: every cell in the order it was finalized, which is
//!   reproducible for identical input and is what animations replay;
//! - the **predecessor** links needed to rebuild the shortest path with
//!   [`reconstruct_path`];
//! - the **reached** set and tentative distances.
//!
//! Ties between equal distances are broken first-in first-out, and
//! neighbours are expanded left, right, up, down, so the whole run is
//! deterministic.
//!
//! [`Playback`] turns a finished result into animation frames without
//! touching the search itself.

mod distance;
mod error;
mod frontier;
mod path;
mod playback;
mod search;
mod traits;

pub use distance::manhattan;
pub use error::{Endpoint, SearchError};
pub use path::reconstruct_path;
pub use playback::{Frame, Playback, PlaybackConfig};
pub use search::{SearchResult, UNREACHABLE, search};
pub use traits::Pather;

//! **slime-core**: the grid model shared by the slime pathfinding crates.
//!
//! This crate provides the foundational types: integer [`Cell`]
//! coordinates, half-open [`Range`] rectangles and the [`Grid`] of
//! blocked/open cells that searches run over.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Cell, Range};
pub use grid::Grid;

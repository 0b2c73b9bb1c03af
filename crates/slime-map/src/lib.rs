//! Barrier-map utilities for slime pathfinding: random generation, brush
//! strokes, endpoint clearing, text layouts and file persistence.

pub mod brush;
pub mod layout;
pub mod mapgen;
pub mod store;

pub use brush::{Brush, clear_around};
pub use layout::{LayoutError, format_layout, parse_layout};
pub use mapgen::{BarrierGen, MapGenError};
pub use store::StoreError;

//! Matchup table view.
//!
//! Pure functions over an already-loaded slate: sort state transitions,
//! ordering, cell shading and rendering.

mod render;
mod shade;
mod sort;

pub use render::*;
pub use shade::*;
pub use sort::*;

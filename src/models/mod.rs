//! Core data models for the slate board.

mod matchup;
mod record;

pub use matchup::*;
pub use record::*;

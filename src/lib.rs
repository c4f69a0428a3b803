//! # Slate Board
//!
//! NBA daily player matchup board.
//!
//! ## Architecture
//!
//! - **models**: Matchup rows and schema-less stored records
//! - **slate**: Static CSV slate loading with lenient numeric coercion
//! - **table**: Sort state, ordering, cell shading and rendering
//! - **store**: Document store abstraction with scoped sessions (MongoDB)
//! - **api**: REST and HTML endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod models;
pub mod slate;
pub mod store;
pub mod table;

pub use models::*;

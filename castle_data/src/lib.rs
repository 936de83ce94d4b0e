//! Shared data model for Castle Escape content.

pub mod castle;
pub mod defs;
pub mod validate;

pub use castle::castle_world;
pub use defs::*;
pub use validate::{ValidationError, validate_world};

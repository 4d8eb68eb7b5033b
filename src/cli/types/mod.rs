//! Type-safe wrappers for stats API identifiers.

pub mod ids;

pub use ids::{GameId, PlayerId};

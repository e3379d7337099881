//! Domain layer for gridscope
//!
//! Contains the vocabulary of the simulation-results dashboard: agent and
//! episode names, the cache key derived from them, analytics artifacts,
//! per-scenario metadata and the cross-agent leaderboard.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

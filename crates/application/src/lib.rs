//! Application layer - Use cases and orchestration
//!
//! Defines the ports for the two cache tiers, the analytics computation and
//! the results tree, and the services that coordinate them: the episode
//! orchestrator, the startup results scan and the dashboard facade.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, FailureStage};
pub use ports::*;
pub use services::*;

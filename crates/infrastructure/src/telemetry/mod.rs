//! Telemetry infrastructure
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` and a console
//! formatter, plain or JSON.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};

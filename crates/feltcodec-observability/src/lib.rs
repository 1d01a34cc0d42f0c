//! # feltcodec-observability
//!
//! Logging setup shared by the `feltcodec` CLI and by test harnesses.
//!
//! Library crates only emit `tracing` events; whoever owns the process
//! installs a subscriber once with [`init_tracing`]. Levels are configurable
//! per crate, e.g. `feltcodec_marshal: debug` to see skipped events.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, LogConfig, TracingInitError};

//! Simulation harness: trace loading and the top-level `Simulator`.
//!
//! Provides the reader that turns trace files into access events, and the
//! `Simulator` struct that owns the cache model and its statistics.

pub mod loader;
pub mod simulator;

pub use simulator::{EventOutcome, Simulator};

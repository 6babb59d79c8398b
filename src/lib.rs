//! Trace-Driven Set-Associative Cache Simulator Library.
//!
//! This crate counts the hits, misses, and evictions a memory access trace
//! would produce on a set-associative cache with Least Recently Used
//! replacement. It models only tags and recency, never data or timing.
//!
//! # Architecture
//!
//! * **Cache Model**: `2^s` sets of `E` lines, address decomposition, and
//!   LRU victim selection by recency stamp.
//! * **Access Simulator**: translates trace events into cache accesses and
//!   accumulates statistics.
//! * **Trace Loader**: lazy reader for `<op> <hex-address>,<size>` traces.
//!
//! # Modules
//!
//! * `cache`: Cache model and replacement.
//! * `common`: Shared types, address decomposition, and error handling.
//! * `config`: Geometry and output configuration.
//! * `sim`: Trace loading and the simulator.
//! * `stats`: Statistics collection and reporting.

/// Set-associative cache model with LRU replacement.
///
/// Owns the set and line storage and resolves each address to a hit, a
/// miss, or a miss with eviction.
pub mod cache;

/// Shared types, address decomposition, and error handling.
pub mod common;

/// Configuration system for cache geometry and output settings.
///
/// Loads TOML configuration files; every field has a default so partial
/// files are accepted.
pub mod config;

/// Trace loading and the access simulator.
pub mod sim;

/// Statistics collection and reporting.
pub mod stats;

pub use cache::{Cache, Outcome};
pub use config::{CacheGeometry, Config};
pub use sim::Simulator;
pub use stats::SimStats;

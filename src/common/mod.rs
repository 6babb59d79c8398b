//! Common utilities and types used throughout the cache simulator.
//!
//! This module provides the address decomposition helpers, access event
//! types, and error definitions that are shared between the cache model,
//! the access simulator, and the trace reader.

/// Address decomposition into tag, set index, and block offset.
pub mod addr;

/// Memory access event definitions.
pub mod data;

/// Error types for configuration and trace handling.
pub mod error;

pub use addr::{AddressLayout, ADDRESS_BITS};
pub use data::{AccessEvent, AccessKind, ParseEventError};
pub use error::{ConfigError, Error, TraceError};

//! Error definitions.
//!
//! The cache model itself has no runtime error surface: `access` is total over
//! every 64-bit address. Errors only arise at the edges, when a geometry is
//! validated before construction or when a trace source cannot be read.

use std::path::PathBuf;

/// Invalid cache geometry, reported before any set is allocated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("associativity must be at least 1 line per set (got E = {0})")]
    ZeroAssociativity(usize),

    #[error("set bits ({set_bits}) + block bits ({block_bits}) exceed the {address_bits}-bit address width")]
    AddressBitsExceeded {
        set_bits: u32,
        block_bits: u32,
        address_bits: u32,
    },

    #[error("{set_bits} set bits requested, at most {max} are supported")]
    TooManySets { set_bits: u32, max: u32 },

    #[error("{sets} sets x {lines_per_set} lines exceeds the limit of {max} lines")]
    TooManyLines {
        sets: usize,
        lines_per_set: usize,
        max: usize,
    },
}

/// Failure to open or read a trace source.
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
    #[error("could not open trace file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read trace line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-level error for everything outside the cache core.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("could not read config file {path:?}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("could not serialize statistics: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

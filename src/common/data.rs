//! Memory Access Events.
//!
//! This module defines the access events consumed by the simulator. Each
//! event mirrors one line of a Valgrind-style memory trace:
//!
//! ```text
//! I 0400d7d4,8
//!  L 7ff0005c8,8
//!  S 7ff0005d0,4
//!  M 0421c7f0,4
//! ```

use std::fmt;
use std::str::FromStr;

/// Kind of memory access recorded in a trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessKind {
    /// Instruction fetch (`I`). Not modelled by the data cache and ignored.
    Instruction,

    /// Data load (`L`). One cache access.
    Load,

    /// Data store (`S`). One cache access.
    Store,

    /// Data modify (`M`). A load immediately followed by a store to the
    /// same address, so two cache accesses.
    Modify,

    /// Any other operation letter. Ignored by the simulator.
    Unknown(char),
}

impl AccessKind {
    /// Maps a trace operation letter to an access kind.
    pub fn from_op(op: char) -> Self {
        match op {
            'I' => AccessKind::Instruction,
            'L' => AccessKind::Load,
            'S' => AccessKind::Store,
            'M' => AccessKind::Modify,
            other => AccessKind::Unknown(other),
        }
    }

    /// Returns the trace operation letter.
    pub fn op(&self) -> char {
        match self {
            AccessKind::Instruction => 'I',
            AccessKind::Load => 'L',
            AccessKind::Store => 'S',
            AccessKind::Modify => 'M',
            AccessKind::Unknown(c) => *c,
        }
    }

    /// Number of cache accesses this kind translates into.
    ///
    /// Returns 0 for kinds the simulator ignores.
    pub fn cache_accesses(&self) -> usize {
        match self {
            AccessKind::Load | AccessKind::Store => 1,
            AccessKind::Modify => 2,
            AccessKind::Instruction | AccessKind::Unknown(_) => 0,
        }
    }
}

/// One parsed trace line: operation, address, and access size in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessEvent {
    pub kind: AccessKind,
    pub address: u64,
    /// Access size in bytes. Carried for reporting only; the cache is
    /// byte-blind.
    pub size: u32,
}

impl AccessEvent {
    pub fn new(kind: AccessKind, address: u64, size: u32) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }

    pub fn load(address: u64, size: u32) -> Self {
        Self::new(AccessKind::Load, address, size)
    }

    pub fn store(address: u64, size: u32) -> Self {
        Self::new(AccessKind::Store, address, size)
    }

    pub fn modify(address: u64, size: u32) -> Self {
        Self::new(AccessKind::Modify, address, size)
    }
}

impl fmt::Display for AccessEvent {
    /// Formats the event the way it appears in verbose output, e.g. `L 10,1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind.op(), self.address, self.size)
    }
}

/// Reason a trace line could not be turned into an [`AccessEvent`].
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("empty line")]
    Empty,

    #[error("missing address")]
    MissingAddress,

    #[error("missing access size")]
    MissingSize,

    #[error("invalid hex address '{0}'")]
    BadAddress(String),

    #[error("invalid access size '{0}'")]
    BadSize(String),
}

impl FromStr for AccessEvent {
    type Err = ParseEventError;

    /// Parses `<op> <hex-address>,<size>` with optional surrounding whitespace.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut chars = line.chars();
        let op = chars.next().ok_or(ParseEventError::Empty)?;
        let rest = chars.as_str().trim_start();
        if rest.is_empty() {
            return Err(ParseEventError::MissingAddress);
        }

        let (addr_str, size_str) = rest
            .split_once(',')
            .ok_or(ParseEventError::MissingSize)?;
        let addr_str = addr_str.trim();
        let size_str = size_str.trim();

        let hex = addr_str
            .strip_prefix("0x")
            .or_else(|| addr_str.strip_prefix("0X"))
            .unwrap_or(addr_str);
        let address = u64::from_str_radix(hex, 16)
            .map_err(|_| ParseEventError::BadAddress(addr_str.to_string()))?;

        if size_str.is_empty() {
            return Err(ParseEventError::MissingSize);
        }
        let size = size_str
            .parse::<u32>()
            .map_err(|_| ParseEventError::BadSize(size_str.to_string()))?;

        Ok(AccessEvent::new(AccessKind::from_op(op), address, size))
    }
}

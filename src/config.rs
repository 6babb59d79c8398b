use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::{AddressLayout, ConfigError, Error, ADDRESS_BITS};

const DEFAULT_SET_BITS: u32 = 4;
const DEFAULT_LINES_PER_SET: usize = 1;
const DEFAULT_BLOCK_BITS: u32 = 4;

/// Largest supported set-index width.
pub const MAX_SET_BITS: u32 = 24;

/// Largest supported total line count, `S * E`. Keeps line storage around
/// 1.5 GiB at most.
pub const MAX_LINES: usize = 1 << 26;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheGeometry,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Parses a TOML configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}

/// Cache geometry: `S = 2^s` sets of `E` lines holding `B = 2^b` byte blocks.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    #[serde(default = "default_set_bits")]
    pub set_bits: u32,

    #[serde(default = "default_lines_per_set")]
    pub lines_per_set: usize,

    #[serde(default = "default_block_bits")]
    pub block_bits: u32,
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self {
            set_bits: DEFAULT_SET_BITS,
            lines_per_set: DEFAULT_LINES_PER_SET,
            block_bits: DEFAULT_BLOCK_BITS,
        }
    }
}

impl CacheGeometry {
    pub fn new(set_bits: u32, lines_per_set: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            lines_per_set,
            block_bits,
        }
    }

    /// Checks the construction preconditions of the cache model.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::ZeroAssociativity`] if `E == 0`.
    /// * [`ConfigError::AddressBitsExceeded`] if `s + b > 64`.
    /// * [`ConfigError::TooManySets`] if `s > MAX_SET_BITS`.
    /// * [`ConfigError::TooManyLines`] if `S * E > MAX_LINES`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_set == 0 {
            return Err(ConfigError::ZeroAssociativity(self.lines_per_set));
        }
        let used = self.set_bits.checked_add(self.block_bits);
        if used.map_or(true, |bits| bits > ADDRESS_BITS) {
            return Err(ConfigError::AddressBitsExceeded {
                set_bits: self.set_bits,
                block_bits: self.block_bits,
                address_bits: ADDRESS_BITS,
            });
        }
        if self.set_bits > MAX_SET_BITS {
            return Err(ConfigError::TooManySets {
                set_bits: self.set_bits,
                max: MAX_SET_BITS,
            });
        }
        let lines = self.num_sets().checked_mul(self.lines_per_set);
        if lines.map_or(true, |n| n > MAX_LINES) {
            return Err(ConfigError::TooManyLines {
                sets: self.num_sets(),
                lines_per_set: self.lines_per_set,
                max: MAX_LINES,
            });
        }
        Ok(())
    }

    /// Number of sets, `S = 2^s`.
    pub fn num_sets(&self) -> usize {
        1usize << self.set_bits
    }

    /// Block size in bytes, `B = 2^b`. Saturates for `b >= 64`.
    pub fn block_size(&self) -> u64 {
        1u64.checked_shl(self.block_bits).unwrap_or(u64::MAX)
    }

    /// Number of tag bits, `t = 64 - (s + b)`.
    pub fn tag_bits(&self) -> u32 {
        self.layout().tag_bits()
    }

    /// Total data capacity in bytes, `S * E * B`. Saturates on overflow.
    pub fn capacity_bytes(&self) -> u64 {
        (self.num_sets() as u64)
            .saturating_mul(self.lines_per_set as u64)
            .saturating_mul(self.block_size())
    }

    /// Address layout derived from this geometry.
    pub fn layout(&self) -> AddressLayout {
        AddressLayout::new(self.set_bits, self.block_bits)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct OutputConfig {
    /// Print each data access with its outcome.
    #[serde(default)]
    pub verbose: bool,

    /// Emit the final statistics as JSON instead of the summary line.
    #[serde(default)]
    pub json: bool,

    /// Print the detailed statistics block after the summary.
    #[serde(default)]
    pub report: bool,

    /// Optional path for the `hits misses evictions` results file.
    #[serde(default)]
    pub results_file: Option<String>,
}

fn default_set_bits() -> u32 {
    DEFAULT_SET_BITS
}

fn default_lines_per_set() -> usize {
    DEFAULT_LINES_PER_SET
}

fn default_block_bits() -> u32 {
    DEFAULT_BLOCK_BITS
}

//! Set-Associative Cache Model.
//!
//! The cache is an owned array of `2^s` sets with `E` lines each. It holds no
//! data, only the valid bit, tag, and recency stamp of every line, which is
//! all that is needed to classify an access as a hit, a miss, or a miss that
//! evicts a resident block.
//!
//! Recency stamps come from a single counter owned by the cache and advanced
//! exactly once per [`Cache::access`], so stamps are unique across the whole
//! cache and their order is the order of accesses.

/// LRU victim selection by minimum recency scan.
pub mod lru;

/// Set and line storage.
pub mod set;

use std::fmt;

use crate::common::{AddressLayout, ConfigError};
use crate::config::CacheGeometry;

pub use set::{CacheLine, CacheSet};

/// Result of resolving one address against the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A valid line already held the tag.
    Hit,
    /// The block was installed into a free line.
    Miss,
    /// The set was full and its least recently used line was replaced.
    MissWithEviction,
}

impl Outcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit)
    }

    pub fn is_miss(&self) -> bool {
        !self.is_hit()
    }

    pub fn is_eviction(&self) -> bool {
        matches!(self, Outcome::MissWithEviction)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Hit => write!(f, "hit"),
            Outcome::Miss => write!(f, "miss"),
            Outcome::MissWithEviction => write!(f, "miss eviction"),
        }
    }
}

/// Set-associative cache with LRU replacement.
#[derive(Clone, Debug)]
pub struct Cache {
    geometry: CacheGeometry,
    layout: AddressLayout,
    sets: Vec<CacheSet>,
    clock: u64,
}

impl Cache {
    /// Builds an empty cache.
    ///
    /// Assumes `geometry` has already passed [`CacheGeometry::validate`]; use
    /// [`Cache::try_new`] to validate and build in one step.
    pub fn new(geometry: &CacheGeometry) -> Self {
        let sets = (0..geometry.num_sets())
            .map(|_| CacheSet::new(geometry.lines_per_set))
            .collect();
        log::debug!(
            "built cache: {} sets x {} lines, {}-byte blocks",
            geometry.num_sets(),
            geometry.lines_per_set,
            geometry.block_size()
        );
        Self {
            geometry: *geometry,
            layout: geometry.layout(),
            sets,
            clock: 0,
        }
    }

    /// Validates `geometry` and builds an empty cache.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`CacheGeometry::validate`].
    pub fn try_new(geometry: &CacheGeometry) -> Result<Self, ConfigError> {
        geometry.validate()?;
        Ok(Self::new(geometry))
    }

    /// Resolves an access to `address`, updating the target set.
    pub fn access(&mut self, address: u64) -> Outcome {
        let (tag, index) = self.layout.decompose(address);
        self.clock += 1;
        let outcome = self.sets[index].access(tag, self.clock);
        log::trace!(
            "access {:#x}: set {} tag {:#x} -> {}",
            address,
            index,
            tag,
            outcome
        );
        outcome
    }

    /// Returns true if the block holding `address` is resident.
    ///
    /// Does not touch recency state.
    pub fn contains(&self, address: u64) -> bool {
        let (tag, index) = self.layout.decompose(address);
        self.sets[index].contains(tag)
    }

    pub fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    pub fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    pub fn set(&self, index: usize) -> Option<&CacheSet> {
        self.sets.get(index)
    }

    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    /// Current value of the recency counter, equal to the number of accesses
    /// resolved so far.
    pub fn clock(&self) -> u64 {
        self.clock
    }
}

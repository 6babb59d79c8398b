//! Access Simulator.
//!
//! Drives the cache model across a sequence of access events and tallies the
//! outcome of every cache access.
//!
//! # Event Translation
//!
//! * `Load`, `Store`: one cache access.
//! * `Modify`: a load followed by a store to the same address, so two cache
//!   accesses. The second one is expected to hit because the first just
//!   installed or refreshed the block.
//! * Anything else (instruction fetches, unknown operations): ignored.

use std::fmt;

use crate::cache::{Cache, Outcome};
use crate::common::{AccessEvent, AccessKind, ConfigError};
use crate::config::CacheGeometry;
use crate::stats::SimStats;

/// Outcomes of the one or two cache accesses made for a single event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventOutcome {
    pub first: Outcome,
    pub second: Option<Outcome>,
}

impl EventOutcome {
    pub fn outcomes(&self) -> impl Iterator<Item = Outcome> {
        std::iter::once(self.first).chain(self.second)
    }
}

impl fmt::Display for EventOutcome {
    /// Formats as the space-separated outcome list, e.g. `miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first)?;
        if let Some(second) = self.second {
            write!(f, " {}", second)?;
        }
        Ok(())
    }
}

/// Owns a cache and the counters accumulated over its lifetime.
pub struct Simulator {
    cache: Cache,
    stats: SimStats,
}

impl Simulator {
    /// Validates `geometry` and builds a simulator over an empty cache.
    pub fn new(geometry: &CacheGeometry) -> Result<Self, ConfigError> {
        Ok(Self::with_cache(Cache::try_new(geometry)?))
    }

    /// Wraps an existing cache.
    pub fn with_cache(cache: Cache) -> Self {
        Self {
            cache,
            stats: SimStats::default(),
        }
    }

    /// Applies one event to the cache.
    ///
    /// Returns `None` for ignored event kinds, which leave every counter
    /// untouched.
    pub fn process(&mut self, event: &AccessEvent) -> Option<EventOutcome> {
        let result = match event.kind {
            AccessKind::Load | AccessKind::Store => EventOutcome {
                first: self.access(event.address),
                second: None,
            },
            AccessKind::Modify => {
                let first = self.access(event.address);
                let second = self.access(event.address);
                if !second.is_hit() {
                    log::warn!("store half of modify {} did not hit: {}", event, second);
                }
                EventOutcome {
                    first,
                    second: Some(second),
                }
            }
            AccessKind::Instruction | AccessKind::Unknown(_) => {
                self.stats.ignored += 1;
                return None;
            }
        };
        self.stats.events += 1;
        log::debug!("{} {}", event, result);
        Some(result)
    }

    /// Processes every event in order.
    pub fn run<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a AccessEvent>,
    {
        for event in events {
            self.process(event);
        }
    }

    fn access(&mut self, address: u64) -> Outcome {
        let outcome = self.cache.access(address);
        self.stats.record(outcome);
        outcome
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn into_stats(self) -> SimStats {
        self.stats
    }
}

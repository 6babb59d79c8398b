//! Simulation statistics collection and reporting.
//!
//! Tracks the cumulative hit, miss, and eviction counts produced by the
//! access simulator, and renders them as a summary line, a formatted report,
//! JSON, or a results file.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::cache::Outcome;
use crate::common::Error;

/// Cumulative simulation counters.
///
/// `misses` counts every access that did not hit, including those that
/// evicted a line; `evictions` is the subset of misses that replaced a valid
/// line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,

    /// Data access events processed (Load, Store, Modify).
    pub events: u64,
    /// Events skipped because the simulator does not model their kind.
    pub ignored: u64,
}

impl SimStats {
    /// Tallies one cache access outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.hits += 1,
            Outcome::Miss => self.misses += 1,
            Outcome::MissWithEviction => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total cache accesses, `hits + misses`.
    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0.0 before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Fraction of accesses that missed, or 0.0 before any access.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// One-line summary, `hits:H misses:M evictions:E`.
    pub fn summary_line(&self) -> String {
        format!(
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }

    /// Serializes the counters as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes `H M E` followed by a newline to `path`.
    pub fn write_results<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(
            path,
            format!("{} {} {}\n", self.hits, self.misses, self.evictions),
        )?;
        log::info!("wrote results to {}", path.display());
        Ok(())
    }

    /// Prints a formatted block with counters and rates.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("events                   {}", self.events);
        println!("events.ignored           {}", self.ignored);
        println!("accesses                 {}", self.accesses());
        println!("----------------------------------------------------------");
        println!(
            "  hits                   {} ({:.2}%)",
            self.hits,
            self.hit_rate() * 100.0
        );
        println!(
            "  misses                 {} ({:.2}%)",
            self.misses,
            self.miss_rate() * 100.0
        );
        println!("  evictions              {}", self.evictions);
        println!("==========================================================");
    }
}

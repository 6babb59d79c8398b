//! Cache Sets and Lines.

use super::lru::VictimScan;
use super::Outcome;

/// One line slot of a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the slot holds a block.
    pub valid: bool,
    /// Upper address bits of the resident block.
    pub tag: u64,
    /// Recency stamp of the last hit or fill.
    pub recency: u64,
}

impl CacheLine {
    fn fill(&mut self, tag: u64, recency: u64) {
        self.valid = true;
        self.tag = tag;
        self.recency = recency;
    }
}

/// A fixed group of `E` lines forming one independent LRU domain.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Vec<CacheLine>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways],
        }
    }

    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Number of lines currently holding a block.
    pub fn valid_count(&self) -> usize {
        self.lines.iter().filter(|l| l.valid).count()
    }

    /// Returns true if a valid line holds `tag`.
    pub fn contains(&self, tag: u64) -> bool {
        self.lines.iter().any(|l| l.valid && l.tag == tag)
    }

    /// Resolves one access against this set, stamping the touched line with
    /// `recency`.
    ///
    /// Exactly one line is modified per call.
    pub fn access(&mut self, tag: u64, recency: u64) -> Outcome {
        let mut scan = VictimScan::new();

        for (index, line) in self.lines.iter_mut().enumerate() {
            if line.valid && line.tag == tag {
                line.recency = recency;
                return Outcome::Hit;
            }
            scan.observe(index, line);
        }

        if let Some(index) = scan.free() {
            self.lines[index].fill(tag, recency);
            return Outcome::Miss;
        }

        // A set with no free line and no valid line has zero ways, which
        // geometry validation rules out. Fall back to way 0 regardless.
        let victim = scan.lru().unwrap_or(0);
        if let Some(line) = self.lines.get_mut(victim) {
            line.fill(tag, recency);
        }
        Outcome::MissWithEviction
    }
}

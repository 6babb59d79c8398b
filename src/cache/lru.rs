//! Least Recently Used (LRU) Victim Selection.
//!
//! LRU order within a set is not kept as a separate stack. Every line carries
//! the recency stamp of its last use, and the victim is found by a linear scan
//! for the smallest stamp among valid lines. The scan runs alongside the tag
//! comparison in [`CacheSet::access`](super::CacheSet::access), so a set is
//! walked exactly once per access.
//!
//! # Tie-breaking
//!
//! The candidate is only replaced on a strictly smaller stamp, so equal stamps
//! keep the lowest line index seen first.

use super::CacheLine;

/// Running state of one set scan: first free slot and oldest valid line.
#[derive(Debug, Default)]
pub struct VictimScan {
    free: Option<usize>,
    oldest: Option<(usize, u64)>,
}

impl VictimScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the line at `index` into the scan.
    #[inline]
    pub fn observe(&mut self, index: usize, line: &CacheLine) {
        if !line.valid {
            if self.free.is_none() {
                self.free = Some(index);
            }
            return;
        }
        match self.oldest {
            Some((_, recency)) if line.recency >= recency => {}
            _ => self.oldest = Some((index, line.recency)),
        }
    }

    /// First invalid line seen, if any.
    pub fn free(&self) -> Option<usize> {
        self.free
    }

    /// Valid line with the smallest recency stamp, if any.
    pub fn lru(&self) -> Option<usize> {
        self.oldest.map(|(index, _)| index)
    }
}

//! Half-open rank intervals and exact work partitioning.

use serde::{Deserialize, Serialize};

/// Half-open interval `[start, start + count)` over the rank space of an
/// enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WorkRange {
    /// First rank covered by the range.
    pub start: u64,
    /// Number of ranks covered by the range.
    pub count: u64,
}

impl WorkRange {
    /// Creates a new range.
    pub const fn new(start: u64, count: u64) -> Self {
        Self { start, count }
    }

    /// Returns the exclusive end rank.
    pub fn end(&self) -> u64 {
        self.start + self.count
    }

    /// Returns true when the range covers no ranks.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true when `rank` falls inside the range.
    pub fn contains(&self, rank: u64) -> bool {
        rank >= self.start && rank < self.end()
    }

    /// Splits `[0, total)` into `parts` contiguous ranges.
    ///
    /// Range `i` starts at `total * i / parts`, so sizes differ by at most
    /// one and the ranges tile `[0, total)` with no gap or overlap. Some
    /// ranges are empty when `parts > total`.
    ///
    /// # Panics
    ///
    /// Panics when `parts == 0`.
    pub fn partition(total: u64, parts: usize) -> Vec<WorkRange> {
        assert!(parts > 0, "cannot partition work into zero ranges");
        let boundary = |index: usize| -> u64 {
            // 128-bit intermediate; the quotient is at most `total`.
            ((total as u128 * index as u128) / parts as u128) as u64
        };
        (0..parts)
            .map(|index| {
                let start = boundary(index);
                let end = boundary(index + 1);
                WorkRange::new(start, end - start)
            })
            .collect()
    }
}

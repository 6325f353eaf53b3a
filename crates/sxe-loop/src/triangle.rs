//! Strictly increasing tuples.
//!
//! The generalized form of
//!
//! ```text
//! for i in 0..maximum {
//!     for j in i + 1..maximum {
//!         for k in j + 1..maximum {
//!             ...
//! ```
//!
//! with `dimensions` nested loops.

use crate::count::binomial;
use crate::{check_rank, Family, Visitor};

/// Strictly increasing `dimensions`-tuples from `[0, maximum)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangle;

impl Family for Triangle {
    const NAME: &'static str = "triangle";

    fn arity(dimensions: usize) -> usize {
        dimensions
    }

    fn iterations(dimensions: usize, maximum: u64) -> u64 {
        crate::check_dimensions(dimensions);
        binomial(maximum, dimensions as u64)
    }

    fn permutation_into(dimensions: usize, maximum: u64, rank: u64, out: &mut [u64]) {
        check_rank::<Self>(dimensions, maximum, rank, out);
        let last = dimensions - 1;
        let mut rank = rank;
        let mut value = 0u64;
        for (slot, entry) in out.iter_mut().enumerate().take(last) {
            let rest = (last - slot) as u64;
            loop {
                // Tuples whose entry at `slot` is `value`: choose the
                // remaining `rest` entries from `(value, maximum)`.
                let block = binomial(maximum - value - 1, rest);
                if rank < block {
                    *entry = value;
                    value += 1;
                    break;
                }
                rank -= block;
                value += 1;
            }
        }
        out[last] = value + rank;
    }

    fn first_into(dimensions: usize, maximum: u64, out: &mut [u64]) -> bool {
        if maximum < dimensions as u64 {
            return false;
        }
        for (slot, entry) in out.iter_mut().enumerate() {
            *entry = slot as u64;
        }
        true
    }

    fn advance(dimensions: usize, maximum: u64, indices: &mut [u64], _scratch: &mut [u64]) -> bool {
        let last = dimensions - 1;
        let mut slot = last;
        loop {
            // Slot `slot` must leave room for `last - slot` larger entries.
            let ceiling = maximum - (last - slot) as u64;
            if indices[slot] + 1 < ceiling {
                indices[slot] += 1;
                let mut value = indices[slot];
                for entry in &mut indices[slot + 1..dimensions] {
                    value += 1;
                    *entry = value;
                }
                return true;
            }
            if slot == 0 {
                return false;
            }
            slot -= 1;
        }
    }
}

/// Visits every strictly increasing tuple in lexicographic order.
pub fn iterate<V: Visitor + ?Sized>(dimensions: usize, maximum: u64, visitor: &mut V) {
    crate::iterate::<Triangle, V>(dimensions, maximum, visitor)
}

/// Visits the tuples at ranks `[start, start + count)`.
pub fn iterate_range<V: Visitor + ?Sized>(
    dimensions: usize,
    maximum: u64,
    start: u64,
    count: u64,
    visitor: &mut V,
) {
    crate::iterate_range::<Triangle, V>(dimensions, maximum, start, count, visitor)
}

/// `C(maximum, dimensions)`, or `0` on overflow.
pub fn iterations(dimensions: usize, maximum: u64) -> u64 {
    Triangle::iterations(dimensions, maximum)
}

/// Tuple at `rank` in lexicographic order.
///
/// Walks candidate values per component, so the cost is linear in `maximum`.
pub fn permutation(dimensions: usize, maximum: u64, rank: u64) -> Vec<u64> {
    crate::permutation::<Triangle>(dimensions, maximum, rank)
}

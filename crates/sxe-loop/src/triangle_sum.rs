//! Fixed-sum compositions.
//!
//! `dimensions` is one less than the tuple length: the last entry is
//! determined by the others as `sum - (i1 + … + id)`. Tuples come in
//! reverse-lexicographic order, starting from `(sum, 0, …, 0)` and ending
//! with `(0, …, 0, sum)`.

use crate::count::compositions;
use crate::{check_rank, Family, Visitor};

/// Compositions of `sum` into `dimensions + 1` non-negative parts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleSum;

impl Family for TriangleSum {
    const NAME: &'static str = "triangle_sum";

    fn arity(dimensions: usize) -> usize {
        dimensions + 1
    }

    fn iterations(dimensions: usize, sum: u64) -> u64 {
        crate::check_dimensions(dimensions);
        compositions(dimensions as u64, sum)
    }

    fn permutation_into(dimensions: usize, sum: u64, rank: u64, out: &mut [u64]) {
        check_rank::<Self>(dimensions, sum, rank, out);
        let mut rank = rank;
        let mut remaining = sum;
        for slot in 0..dimensions {
            let free_after = (dimensions - slot - 1) as u64;
            let value = if free_after == 0 {
                // One completion per candidate value, so the rank is the
                // distance below `remaining`.
                remaining - rank
            } else {
                let mut value = remaining;
                loop {
                    let block = compositions(free_after, remaining - value);
                    if rank < block {
                        break value;
                    }
                    rank -= block;
                    value -= 1;
                }
            };
            out[slot] = value;
            remaining -= value;
        }
        out[dimensions] = remaining;
    }

    fn first_into(_dimensions: usize, sum: u64, out: &mut [u64]) -> bool {
        out.fill(0);
        out[0] = sum;
        true
    }

    fn scratch_len(dimensions: usize) -> usize {
        dimensions
    }

    fn sync_scratch(dimensions: usize, _sum: u64, indices: &[u64], scratch: &mut [u64]) {
        let mut running = 0;
        for (prefix, &value) in scratch.iter_mut().zip(&indices[..dimensions]) {
            running += value;
            *prefix = running;
        }
    }

    fn advance(dimensions: usize, sum: u64, indices: &mut [u64], sums: &mut [u64]) -> bool {
        // `sums[i]` is the prefix sum of `indices[..=i]`.
        let mut slot = dimensions;
        loop {
            if slot == 0 {
                return false;
            }
            slot -= 1;
            if indices[slot] != 0 {
                indices[slot] -= 1;
                sums[slot] -= 1;
                indices[dimensions] = 0;
                indices[slot + 1] = sum - sums[slot];
                return true;
            }
            // Every later prefix will include the moved remainder.
            sums[slot] = sum;
        }
    }
}

/// Visits every composition in reverse-lexicographic order.
pub fn iterate<V: Visitor + ?Sized>(dimensions: usize, sum: u64, visitor: &mut V) {
    crate::iterate::<TriangleSum, V>(dimensions, sum, visitor)
}

/// Visits the compositions at ranks `[start, start + count)`.
pub fn iterate_range<V: Visitor + ?Sized>(
    dimensions: usize,
    sum: u64,
    start: u64,
    count: u64,
    visitor: &mut V,
) {
    crate::iterate_range::<TriangleSum, V>(dimensions, sum, start, count, visitor)
}

/// `C(sum + dimensions, dimensions)`, or `0` on overflow.
pub fn iterations(dimensions: usize, sum: u64) -> u64 {
    TriangleSum::iterations(dimensions, sum)
}

/// Composition at `rank`.
///
/// Walks candidate values per component, so the cost is linear in `sum`.
pub fn permutation(dimensions: usize, sum: u64, rank: u64) -> Vec<u64> {
    crate::permutation::<TriangleSum>(dimensions, sum, rank)
}

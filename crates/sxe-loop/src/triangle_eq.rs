//! Non-decreasing tuples.
//!
//! The generalized form of
//!
//! ```text
//! for i in 0..maximum {
//!     for j in i..maximum {
//!         for k in j..maximum {
//!             ...
//! ```
//!
//! This is the family the search driver partitions across workers, so the
//! ranged form and unranking are on its hot setup path.

use crate::count::multiset;
use crate::{check_rank, Family, Visitor};

/// Non-decreasing `dimensions`-tuples from `[0, maximum)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleEq;

impl Family for TriangleEq {
    const NAME: &'static str = "triangle_eq";

    fn arity(dimensions: usize) -> usize {
        dimensions
    }

    fn iterations(dimensions: usize, maximum: u64) -> u64 {
        crate::check_dimensions(dimensions);
        multiset(maximum, dimensions as u64)
    }

    fn permutation_into(dimensions: usize, maximum: u64, rank: u64, out: &mut [u64]) {
        check_rank::<Self>(dimensions, maximum, rank, out);
        let last = dimensions - 1;
        let mut rank = rank;
        let mut value = 0u64;
        for (slot, entry) in out.iter_mut().enumerate().take(last) {
            let rest = (last - slot) as u64;
            loop {
                // Tuples whose entry at `slot` is `value`: the remaining
                // `rest` entries are drawn from `[value, maximum)`.
                let block = multiset(maximum - value, rest);
                if rank < block {
                    *entry = value;
                    break;
                }
                rank -= block;
                value += 1;
            }
        }
        out[last] = value + rank;
    }

    fn first_into(_dimensions: usize, maximum: u64, out: &mut [u64]) -> bool {
        if maximum == 0 {
            return false;
        }
        out.fill(0);
        true
    }

    fn advance(dimensions: usize, maximum: u64, indices: &mut [u64], _scratch: &mut [u64]) -> bool {
        let mut slot = dimensions - 1;
        loop {
            if indices[slot] + 1 < maximum {
                indices[slot] += 1;
                let value = indices[slot];
                indices[slot + 1..dimensions].fill(value);
                return true;
            }
            if slot == 0 {
                return false;
            }
            slot -= 1;
        }
    }
}

/// Visits every non-decreasing tuple in lexicographic order.
pub fn iterate<V: Visitor + ?Sized>(dimensions: usize, maximum: u64, visitor: &mut V) {
    crate::iterate::<TriangleEq, V>(dimensions, maximum, visitor)
}

/// Visits the tuples at ranks `[start, start + count)`.
pub fn iterate_range<V: Visitor + ?Sized>(
    dimensions: usize,
    maximum: u64,
    start: u64,
    count: u64,
    visitor: &mut V,
) {
    crate::iterate_range::<TriangleEq, V>(dimensions, maximum, start, count, visitor)
}

/// `C(maximum + dimensions - 1, dimensions)`, or `0` on overflow.
pub fn iterations(dimensions: usize, maximum: u64) -> u64 {
    TriangleEq::iterations(dimensions, maximum)
}

/// Tuple at `rank` in lexicographic order.
///
/// Walks candidate values per component, so the cost is linear in `maximum`.
pub fn permutation(dimensions: usize, maximum: u64, rank: u64) -> Vec<u64> {
    crate::permutation::<TriangleEq>(dimensions, maximum, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_of_three() {
        let mut seen = Vec::new();
        iterate(2, 3, &mut |_: usize, _: u64, tuple: &[u64]| {
            seen.push(tuple.to_vec())
        });
        assert_eq!(
            seen,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2],
                vec![2, 2]
            ]
        );
        assert_eq!(iterations(2, 3), 6);
        assert_eq!(permutation(2, 3, 3), vec![1, 1]);
    }

    #[test]
    fn range_resumes_mid_stream() {
        let mut seen = Vec::new();
        iterate_range(2, 3, 2, 3, &mut |_: usize, _: u64, tuple: &[u64]| {
            seen.push(tuple.to_vec())
        });
        assert_eq!(seen, vec![vec![0, 2], vec![1, 1], vec![1, 2]]);
    }

    #[test]
    fn zero_maximum_is_empty() {
        let mut visits = 0;
        iterate(4, 0, &mut |_: usize, _: u64, _: &[u64]| visits += 1);
        assert_eq!(visits, 0);
        assert_eq!(iterations(4, 0), 0);
    }

    #[test]
    #[should_panic(expected = "range count 5 exceeds")]
    fn oversized_range_panics() {
        iterate_range(2, 3, 2, 5, &mut |_: usize, _: u64, _: &[u64]| {});
    }

    #[test]
    #[should_panic(expected = "dimensions must be at least 1")]
    fn zero_dimensions_panics() {
        let _ = iterations(0, 3);
    }
}

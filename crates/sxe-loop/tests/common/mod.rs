#![allow(dead_code)]

use sxe_loop::{Cursor, Family};

/// Collects every tuple of `F` by stepping a cursor.
pub fn collect_all<F: Family>(dimensions: usize, bound: u64) -> Vec<Vec<u64>> {
    let mut seen = Vec::new();
    sxe_loop::iterate::<F, _>(dimensions, bound, &mut |_: usize, _: u64, tuple: &[u64]| {
        seen.push(tuple.to_vec())
    });
    seen
}

/// Collects tuples `[start, start + count)` with the ranged form.
pub fn collect_range<F: Family>(
    dimensions: usize,
    bound: u64,
    start: u64,
    count: u64,
) -> Vec<Vec<u64>> {
    let mut seen = Vec::new();
    sxe_loop::iterate_range::<F, _>(
        dimensions,
        bound,
        start,
        count,
        &mut |_: usize, _: u64, tuple: &[u64]| seen.push(tuple.to_vec()),
    );
    seen
}

/// Tuple reached after `steps` advances from rank 0.
pub fn advance_by<F: Family>(dimensions: usize, bound: u64, steps: u64) -> Vec<u64> {
    let mut cursor = Cursor::<F>::new(dimensions, bound);
    for _ in 0..steps {
        assert!(cursor.advance(), "ran out after fewer than {steps} steps");
    }
    cursor.indices().to_vec()
}

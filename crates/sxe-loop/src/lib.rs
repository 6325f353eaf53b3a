#![deny(missing_docs)]
//! Resumable, rank-addressable enumerators over index tuples and integer
//! compositions.
//!
//! Three families are provided, each as a module of free functions and as a
//! [`Family`] implementation usable with the generic [`Cursor`]:
//!
//! - [`triangle`]: strictly increasing tuples `i1 < i2 < … < id` from
//!   `[0, maximum)`, in lexicographic order.
//! - [`triangle_eq`]: non-decreasing tuples `i1 <= i2 <= … <= id` from
//!   `[0, maximum)`, in lexicographic order.
//! - [`triangle_sum`]: `dimensions + 1` non-negative integers summing to
//!   `sum`, with the first component counting down from `sum`.
//!
//! Every family supports full enumeration, ranged enumeration that starts
//! at an arbitrary rank, closed-form counting with an overflow sentinel of
//! `0`, and unranking. Unranking scans candidate values one component at a
//! time, so its cost grows linearly with the bound rather than with the rank.
//!
//! Precondition violations (zero dimensions, ranks or ranges outside the
//! enumeration) are caller bugs and panic.

pub mod count;
mod cursor;
pub mod triangle;
pub mod triangle_eq;
pub mod triangle_sum;

pub use cursor::Cursor;
pub use triangle::Triangle;
pub use triangle_eq::TriangleEq;
pub use triangle_sum::TriangleSum;

/// Receives each tuple produced by an enumeration.
///
/// Closures taking `(dimensions, bound, tuple)` implement this trait
/// directly.
pub trait Visitor {
    /// Called once per tuple, in canonical order.
    fn visit(&mut self, dimensions: usize, bound: u64, indices: &[u64]);
}

impl<T> Visitor for T
where
    T: FnMut(usize, u64, &[u64]),
{
    fn visit(&mut self, dimensions: usize, bound: u64, indices: &[u64]) {
        self(dimensions, bound, indices)
    }
}

/// Ordering constraint and counting rules of one enumeration family.
pub trait Family {
    /// Short name used in diagnostics.
    const NAME: &'static str;

    /// Length of each tuple for the given `dimensions`.
    fn arity(dimensions: usize) -> usize;

    /// Closed-form number of tuples, or `0` when it overflows `u64`.
    fn iterations(dimensions: usize, bound: u64) -> u64;

    /// Writes the tuple at `rank` into `out`. Linear in `bound` per
    /// component.
    fn permutation_into(dimensions: usize, bound: u64, rank: u64, out: &mut [u64]);

    /// Writes the first tuple into `out`. Returns false when the enumeration
    /// is empty.
    fn first_into(dimensions: usize, bound: u64, out: &mut [u64]) -> bool;

    /// Length of the auxiliary state kept next to the tuple.
    fn scratch_len(_dimensions: usize) -> usize {
        0
    }

    /// Rebuilds the auxiliary state after the tuple was overwritten.
    fn sync_scratch(_dimensions: usize, _bound: u64, _indices: &[u64], _scratch: &mut [u64]) {}

    /// Moves `indices` to the next tuple. Returns false when `indices` was
    /// the last one, leaving `indices` unspecified.
    fn advance(dimensions: usize, bound: u64, indices: &mut [u64], scratch: &mut [u64]) -> bool;
}

/// Visits every tuple of family `F` in canonical order.
pub fn iterate<F: Family, V: Visitor + ?Sized>(dimensions: usize, bound: u64, visitor: &mut V) {
    Cursor::<F>::new(dimensions, bound).visit_remaining(visitor);
}

/// Visits the tuples of family `F` at ranks `[start, start + count)`.
///
/// # Panics
///
/// Panics unless `start < iterations` and `count <= iterations - start`.
pub fn iterate_range<F: Family, V: Visitor + ?Sized>(
    dimensions: usize,
    bound: u64,
    start: u64,
    count: u64,
    visitor: &mut V,
) {
    check_dimensions(dimensions);
    let total = F::iterations(dimensions, bound);
    assert!(
        start < total,
        "{}: range start {start} outside [0, {total})",
        F::NAME
    );
    assert!(
        count <= total - start,
        "{}: range count {count} exceeds the {} ranks left after {start}",
        F::NAME,
        total - start
    );
    if count == 0 {
        return;
    }
    Cursor::<F>::at(dimensions, bound, start).visit_count(count, visitor);
}

/// Returns the tuple of family `F` at `rank`.
pub fn permutation<F: Family>(dimensions: usize, bound: u64, rank: u64) -> Vec<u64> {
    check_dimensions(dimensions);
    let mut out = vec![0; F::arity(dimensions)];
    F::permutation_into(dimensions, bound, rank, &mut out);
    out
}

pub(crate) fn check_dimensions(dimensions: usize) {
    assert!(dimensions > 0, "dimensions must be at least 1");
}

pub(crate) fn check_rank<F: Family>(dimensions: usize, bound: u64, rank: u64, out: &[u64]) {
    check_dimensions(dimensions);
    let total = F::iterations(dimensions, bound);
    assert!(
        rank < total,
        "{}: rank {rank} outside [0, {total}) for dimensions={dimensions} bound={bound}",
        F::NAME
    );
    assert!(
        out.len() >= F::arity(dimensions),
        "{}: output buffer holds {} of {} entries",
        F::NAME,
        out.len(),
        F::arity(dimensions)
    );
}

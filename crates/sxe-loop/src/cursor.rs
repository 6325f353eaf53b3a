use std::marker::PhantomData;

use crate::{check_dimensions, Family, Visitor};

/// In-progress enumeration of a [`Family`].
///
/// The cursor owns its tuple and scratch buffers. [`Cursor::reset`] and
/// [`Cursor::seek`] reuse them, so a worker can keep one cursor for the whole
/// run and restart it for every outer step.
#[derive(Debug, Clone)]
pub struct Cursor<F: Family> {
    dimensions: usize,
    bound: u64,
    indices: Vec<u64>,
    scratch: Vec<u64>,
    exhausted: bool,
    family: PhantomData<F>,
}

impl<F: Family> Cursor<F> {
    /// Creates a cursor positioned on rank 0, or exhausted when the
    /// enumeration is empty.
    pub fn new(dimensions: usize, bound: u64) -> Self {
        check_dimensions(dimensions);
        let mut cursor = Self {
            dimensions,
            bound,
            indices: vec![0; F::arity(dimensions)],
            scratch: vec![0; F::scratch_len(dimensions)],
            exhausted: true,
            family: PhantomData,
        };
        cursor.rewind();
        cursor
    }

    /// Creates a cursor positioned on `rank` by unranking.
    pub fn at(dimensions: usize, bound: u64, rank: u64) -> Self {
        let mut cursor = Self::new(dimensions, bound);
        cursor.seek(rank);
        cursor
    }

    /// Switches to a new bound and rewinds to rank 0, keeping the buffers.
    pub fn reset(&mut self, bound: u64) {
        self.bound = bound;
        self.rewind();
    }

    /// Moves back to rank 0.
    pub fn rewind(&mut self) {
        self.exhausted = !F::first_into(self.dimensions, self.bound, &mut self.indices);
        if !self.exhausted {
            F::sync_scratch(self.dimensions, self.bound, &self.indices, &mut self.scratch);
        }
    }

    /// Jumps directly to `rank` without replaying earlier ranks.
    ///
    /// # Panics
    ///
    /// Panics when `rank` is outside `[0, iterations)`.
    pub fn seek(&mut self, rank: u64) {
        F::permutation_into(self.dimensions, self.bound, rank, &mut self.indices);
        F::sync_scratch(self.dimensions, self.bound, &self.indices, &mut self.scratch);
        self.exhausted = false;
    }

    /// Tuple arity parameter the cursor was built with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Current bound (`maximum` or `sum`).
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Current tuple. Meaningless once the cursor is exhausted.
    pub fn indices(&self) -> &[u64] {
        &self.indices
    }

    /// Returns true once the enumeration has run past its last tuple.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Steps to the next tuple in canonical order. Returns false when there
    /// is none.
    pub fn advance(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        if !F::advance(
            self.dimensions,
            self.bound,
            &mut self.indices,
            &mut self.scratch,
        ) {
            self.exhausted = true;
        }
        !self.exhausted
    }

    /// Visits the current tuple and every tuple after it. Returns the number
    /// of visits.
    pub fn visit_remaining<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> u64 {
        let mut visited = 0;
        while !self.exhausted {
            visitor.visit(self.dimensions, self.bound, &self.indices);
            visited += 1;
            self.advance();
        }
        visited
    }

    /// Visits exactly `count` tuples starting with the current one. The
    /// cursor is left on the last visited tuple.
    ///
    /// # Panics
    ///
    /// Panics when fewer than `count` tuples remain.
    pub fn visit_count<V: Visitor + ?Sized>(&mut self, count: u64, visitor: &mut V) {
        for step in 0..count {
            assert!(
                !self.exhausted,
                "enumeration exhausted after {step} of {count} requested visits"
            );
            visitor.visit(self.dimensions, self.bound, &self.indices);
            if step + 1 < count {
                self.advance();
            }
        }
    }
}

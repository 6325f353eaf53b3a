#![deny(missing_docs)]
//! Dense matrix helpers and simplex-noise cell geometry.
//!
//! The cell used by the search has `n + 1` vertices in `n` dimensions:
//! the rows of the deskewed prefix-pattern transform `T` and the origin.
//! Vertex `k` is the deskewed pattern with `k + 1` leading ones. The cell is
//! only equilateral in the plane.

/// Square row-major matrices with cofactor determinant and inverse.
pub mod matrix;
/// Simplex cell transform, vertices and coordinate conversion.
pub mod simplex;

pub use matrix::Matrix;
pub use simplex::{
    build_transform, deskew_factor, deskew_point, simplex_vertices, skew_factor, skew_point,
    to_cartesian, SimplexGeometry,
};

use sxe_core::errors::{ErrorInfo, SxeError};

use crate::matrix::Matrix;

/// Tolerance for the `T * T^-1 = I` self-check.
const INVERSE_TOLERANCE: f64 = 1e-9;

/// Factor mapping skewed lattice coordinates back into simplex-noise space:
/// `(n + 1 - sqrt(n + 1)) / (n (n + 1))`.
pub fn deskew_factor(dimensions: usize) -> f64 {
    let n = dimensions as f64;
    (n + 1.0 - (n + 1.0).sqrt()) / (n * (n + 1.0))
}

/// Factor skewing Cartesian space onto the simplex lattice:
/// `(sqrt(n + 1) - 1) / n`.
pub fn skew_factor(dimensions: usize) -> f64 {
    let n = dimensions as f64;
    ((n + 1.0).sqrt() - 1.0) / n
}

/// Subtracts `sum(point) * deskew_factor(n)` from every component.
pub fn deskew_point(point: &mut [f64]) {
    let shift = point.iter().sum::<f64>() * deskew_factor(point.len());
    for value in point.iter_mut() {
        *value -= shift;
    }
}

/// Adds `sum(point) * skew_factor(n)` to every component.
pub fn skew_point(point: &mut [f64]) {
    let shift = point.iter().sum::<f64>() * skew_factor(point.len());
    for value in point.iter_mut() {
        *value += shift;
    }
}

/// Barycentric-to-Cartesian transform.
///
/// Row `i` is the prefix pattern with `i + 1` leading ones, deskewed, which
/// is also the Cartesian position of simplex vertex `i`.
pub fn build_transform(dimensions: usize) -> Matrix {
    let mut transform = Matrix::zeros(dimensions);
    for i in 0..dimensions {
        let row = transform.row_mut(i);
        for (j, value) in row.iter_mut().enumerate() {
            *value = if j <= i { 1.0 } else { 0.0 };
        }
        deskew_point(row);
    }
    transform
}

/// `dest[i] = sum_j point[j] * T[i + j * n]`: the rows of `T` weighted by the
/// first `n` barycentric weights.
pub fn to_cartesian(transform: &Matrix, point: &[f64], dest: &mut [f64]) {
    let n = transform.size();
    let entries = transform.as_slice();
    for (i, out) in dest.iter_mut().enumerate().take(n) {
        *out = point
            .iter()
            .take(n)
            .enumerate()
            .map(|(j, weight)| weight * entries[i + j * n])
            .sum();
    }
}

/// Cartesian coordinates of the `n + 1` simplex vertices, row-major
/// `(n + 1) x n`. Vertex `n` is the origin.
pub fn simplex_vertices(dimensions: usize) -> Vec<f64> {
    let transform = build_transform(dimensions);
    let mut vertices = Vec::with_capacity(dimensions * (dimensions + 1));
    vertices.extend_from_slice(transform.as_slice());
    vertices.extend(std::iter::repeat(0.0).take(dimensions));
    vertices
}

/// Immutable per-run geometry shared by every worker.
#[derive(Debug, Clone)]
pub struct SimplexGeometry {
    dimensions: usize,
    transform: Matrix,
    inverse: Matrix,
    vertices: Vec<f64>,
}

impl SimplexGeometry {
    /// Builds and validates the geometry for an `dimensions`-simplex.
    ///
    /// Fails when the transform is singular or its inverse does not
    /// reproduce the identity, either of which means the construction is
    /// broken.
    pub fn new(dimensions: usize) -> Result<Self, SxeError> {
        if dimensions == 0 {
            return Err(SxeError::Geometry(ErrorInfo::new(
                "zero_dimensions",
                "a simplex needs at least one dimension",
            )));
        }
        let transform = build_transform(dimensions);
        let inverse = transform.inverse()?;
        let residual = transform
            .product(&inverse)
            .max_abs_diff(&Matrix::identity(dimensions));
        if residual > INVERSE_TOLERANCE {
            return Err(SxeError::Geometry(
                ErrorInfo::new("inverse_residual", "transform inverse is inaccurate")
                    .with_context("dimensions", dimensions)
                    .with_context("residual", residual),
            ));
        }
        Ok(Self {
            dimensions,
            transform,
            inverse,
            vertices: simplex_vertices(dimensions),
        })
    }

    /// Spatial dimension `n`.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of vertices, `n + 1`.
    pub fn vertex_count(&self) -> usize {
        self.dimensions + 1
    }

    /// Barycentric-to-Cartesian transform `T`.
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Inverse transform `T^-1`.
    pub fn inverse(&self) -> &Matrix {
        &self.inverse
    }

    /// Cartesian position of vertex `index`.
    pub fn vertex(&self, index: usize) -> &[f64] {
        &self.vertices[index * self.dimensions..(index + 1) * self.dimensions]
    }

    /// All vertices, row-major.
    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    /// Maps barycentric weights to Cartesian coordinates. Only the first `n`
    /// weights matter; the remaining weight belongs to the origin vertex.
    pub fn barycentric_to_cartesian(&self, point: &[f64], dest: &mut [f64]) {
        to_cartesian(&self.transform, point, dest);
    }

    /// Recovers all `n + 1` barycentric weights from Cartesian coordinates,
    /// normalized to sum to one.
    pub fn cartesian_to_barycentric(&self, point: &[f64], dest: &mut [f64]) {
        let n = self.dimensions;
        assert!(dest.len() > n, "destination needs {} entries", n + 1);
        to_cartesian(&self.inverse, point, &mut dest[..n]);
        dest[n] = 1.0 - dest[..n].iter().sum::<f64>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_match_known_constants() {
        assert!((deskew_factor(2) - (3.0 - 3f64.sqrt()) / 6.0).abs() < 1e-15);
        assert!((deskew_factor(3) - 1.0 / 6.0).abs() < 1e-15);
        assert!((skew_factor(3) - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn skew_undoes_deskew() {
        let mut point = [0.3, -1.2, 2.5, 0.1];
        let original = point;
        deskew_point(&mut point);
        skew_point(&mut point);
        for (a, b) in point.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn last_vertex_is_origin() {
        let geometry = SimplexGeometry::new(3).expect("geometry");
        assert_eq!(geometry.vertex(3), &[0.0, 0.0, 0.0]);
        assert_eq!(geometry.vertex(0), geometry.transform().row(0));
    }
}

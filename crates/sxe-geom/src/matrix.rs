use std::fmt;

use serde::{Deserialize, Serialize};
use sxe_core::errors::{ErrorInfo, SxeError};

/// Square matrix stored row-major: entry `(row, col)` lives at
/// `col + row * size`.
///
/// The determinant and inverse use cofactor expansion, which is only meant
/// for the small transforms built once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    size: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// All-zero matrix.
    pub fn zeros(size: usize) -> Self {
        assert!(size > 0, "matrix size must be at least 1");
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Identity matrix.
    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::zeros(size);
        for i in 0..size {
            matrix.set(i, i, 1.0);
        }
        matrix
    }

    /// Builds a matrix from row slices.
    ///
    /// # Panics
    ///
    /// Panics when the rows do not form a square.
    pub fn from_rows(rows: &[&[f64]]) -> Self {
        let size = rows.len();
        let mut matrix = Self::zeros(size);
        for (row, values) in rows.iter().enumerate() {
            assert_eq!(values.len(), size, "row {row} is not {size} wide");
            matrix.row_mut(row).copy_from_slice(values);
        }
        matrix
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[col + row * self.size]
    }

    /// Overwrites the entry at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[col + row * self.size] = value;
    }

    /// Row `row` as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.size..(row + 1) * self.size]
    }

    /// Row `row` as a mutable slice.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.size..(row + 1) * self.size]
    }

    /// Matrix with row `row` and column `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> Matrix {
        assert!(self.size > 1, "a 1x1 matrix has no minors");
        assert!(row < self.size && col < self.size, "minor ({row}, {col}) out of range");
        let size = self.size - 1;
        let mut data = Vec::with_capacity(size * size);
        for r in (0..self.size).filter(|&r| r != row) {
            for c in (0..self.size).filter(|&c| c != col) {
                data.push(self.get(r, c));
            }
        }
        Matrix { size, data }
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        if self.size == 1 {
            return self.data[0];
        }
        let mut determinant = 0.0;
        for col in 0..self.size {
            let term = self.get(0, col) * self.minor(0, col).determinant();
            if col % 2 == 0 {
                determinant += term;
            } else {
                determinant -= term;
            }
        }
        determinant
    }

    /// Inverse via the adjugate: minors, then cofactor signs, then
    /// transposition, divided by the determinant.
    pub fn inverse(&self) -> Result<Matrix, SxeError> {
        let determinant = self.determinant();
        if determinant == 0.0 || !determinant.is_finite() {
            return Err(SxeError::Geometry(
                ErrorInfo::new("singular_matrix", "matrix is not invertible")
                    .with_context("size", self.size)
                    .with_context("determinant", determinant),
            ));
        }
        if self.size == 1 {
            return Ok(Matrix {
                size: 1,
                data: vec![1.0 / self.data[0]],
            });
        }
        let mut inverse = Matrix::zeros(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                let sign = if (row + col) % 2 == 0 { 1.0 } else { -1.0 };
                let cofactor = sign * self.minor(row, col).determinant();
                // Transposed placement makes this the adjugate.
                inverse.set(col, row, cofactor / determinant);
            }
        }
        Ok(inverse)
    }

    /// Matrix product `self * other`.
    pub fn product(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.size, other.size, "matrix sizes differ");
        let mut out = Matrix::zeros(self.size);
        for row in 0..self.size {
            for col in 0..self.size {
                let value = (0..self.size)
                    .map(|k| self.get(row, k) * other.get(k, col))
                    .sum();
                out.set(row, col, value);
            }
        }
        out
    }

    /// Largest absolute entry-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Matrix) -> f64 {
        assert_eq!(self.size, other.size, "matrix sizes differ");
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix")?;
        for row in 0..self.size {
            write!(f, "  ")?;
            for (col, value) in self.row(row).iter().enumerate() {
                if col > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{value}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  det = {}", self.determinant())
    }
}

//! Gradient vectors with components in `{-1, 0, +1}` and their per-vertex
//! assignment.

/// Number of distinct gradients in `dimensions` space, or `None` on
/// overflow.
///
/// Every gradient has one zero component and signs on the rest:
/// `2^(d-1) * d` vectors. The plane additionally uses the four diagonals.
pub fn gradient_count(dimensions: usize) -> Option<u64> {
    assert!(dimensions > 0, "dimensions must be at least 1");
    let exponent = u32::try_from(dimensions - 1).ok()?;
    let signs = 1u64.checked_shl(exponent)?;
    let base = signs.checked_mul(dimensions as u64)?;
    if dimensions == 2 {
        base.checked_add(4)
    } else {
        Some(base)
    }
}

/// Decodes gradient `index` into `out`.
///
/// `index >> (d - 1)` selects the zero component; bit `k` of `index` gives
/// the sign of the `k`-th remaining component (set is `+1`). When the zero
/// slot is past the last axis, which only the plane's indices `4..8` reach,
/// every component gets a sign and the result is a diagonal.
pub fn decode_gradient(index: u64, out: &mut [f64]) {
    let dimensions = out.len();
    let zero = index >> (dimensions - 1);
    let mut bit = 0;
    for (axis, component) in out.iter_mut().enumerate() {
        if axis as u64 == zero {
            *component = 0.0;
            continue;
        }
        *component = if (index >> bit) & 1 == 1 { 1.0 } else { -1.0 };
        bit += 1;
    }
}

/// One gradient per simplex vertex, stored row-major.
#[derive(Debug, Clone)]
pub struct GradientAssignment {
    dimensions: usize,
    components: Vec<f64>,
}

impl GradientAssignment {
    /// All-zero assignment for the `dimensions + 1` vertices.
    pub fn new(dimensions: usize) -> Self {
        assert!(dimensions > 0, "dimensions must be at least 1");
        Self {
            dimensions,
            components: vec![0.0; dimensions * (dimensions + 1)],
        }
    }

    /// Decodes one gradient index per vertex, as produced by the outer
    /// enumeration.
    pub fn assign(&mut self, indices: &[u64]) {
        assert_eq!(
            indices.len(),
            self.dimensions + 1,
            "one gradient index per vertex"
        );
        for (row, &index) in self
            .components
            .chunks_exact_mut(self.dimensions)
            .zip(indices)
        {
            decode_gradient(index, row);
        }
    }

    /// Gradient of vertex `vertex`.
    pub fn gradient(&self, vertex: usize) -> &[f64] {
        &self.components[vertex * self.dimensions..(vertex + 1) * self.dimensions]
    }

    /// Spatial dimension.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

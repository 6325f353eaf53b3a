use serde::{Deserialize, Serialize};
use sxe_geom::SimplexGeometry;
use sxe_loop::{Cursor, TriangleSum, Visitor};

use crate::gradient::GradientAssignment;

/// Squared radius beyond which a vertex contributes nothing.
pub const FALLOFF_RADIUS_SQ: f64 = 0.5;

/// Falloff exponent used when the configuration does not override it.
pub fn default_falloff_exponent(dimensions: usize) -> i32 {
    if dimensions == 2 {
        4
    } else {
        dimensions as i32
    }
}

/// Smallest and largest kernel value seen over a set of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Running minimum.
    pub minimum: f64,
    /// Running maximum.
    pub maximum: f64,
}

impl Extent {
    /// Both bounds at `0.0`, the value of the kernel far from every vertex.
    pub const ZERO: Extent = Extent {
        minimum: 0.0,
        maximum: 0.0,
    };

    fn include(&mut self, value: f64) {
        self.minimum = self.minimum.min(value);
        self.maximum = self.maximum.max(value);
    }
}

/// Sum of the vertex contributions at a Cartesian point.
pub fn evaluate(
    geometry: &SimplexGeometry,
    gradients: &GradientAssignment,
    exponent: i32,
    point: &[f64],
) -> f64 {
    let mut total = 0.0;
    for vertex in 0..geometry.vertex_count() {
        let position = geometry.vertex(vertex);
        let mut dist_sq = 0.0;
        let mut dot = 0.0;
        for ((p, v), g) in point.iter().zip(position).zip(gradients.gradient(vertex)) {
            let offset = p - v;
            dist_sq += offset * offset;
            dot += offset * g;
        }
        if dist_sq >= FALLOFF_RADIUS_SQ {
            continue;
        }
        total += (FALLOFF_RADIUS_SQ - dist_sq).powi(exponent) * dot;
    }
    total
}

/// Evaluates the kernel at every lattice point of a given density inside the
/// simplex. Buffers and the inner cursor are reused across calls.
#[derive(Debug)]
pub struct KernelSampler<'g> {
    geometry: &'g SimplexGeometry,
    exponent: i32,
    cursor: Cursor<TriangleSum>,
    weights: Vec<f64>,
    cartesian: Vec<f64>,
}

impl<'g> KernelSampler<'g> {
    /// Creates a sampler over `geometry`.
    pub fn new(geometry: &'g SimplexGeometry, exponent: i32) -> Self {
        let dimensions = geometry.dimensions();
        Self {
            geometry,
            exponent,
            cursor: Cursor::new(dimensions, 1),
            weights: vec![0.0; dimensions + 1],
            cartesian: vec![0.0; dimensions],
        }
    }

    /// Falloff exponent in use.
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Samples every composition of `density` as barycentric weights and
    /// returns the extent of the kernel values, starting from zero.
    ///
    /// # Panics
    ///
    /// Panics when `density == 0`.
    pub fn sample(&mut self, gradients: &GradientAssignment, density: u64) -> Extent {
        assert!(density > 0, "sample density must be at least 1");
        self.cursor.reset(density);
        let mut pass = SamplePass {
            geometry: self.geometry,
            gradients,
            exponent: self.exponent,
            scale: 1.0 / density as f64,
            weights: &mut self.weights,
            cartesian: &mut self.cartesian,
            extent: Extent::ZERO,
        };
        self.cursor.visit_remaining(&mut pass);
        pass.extent
    }
}

struct SamplePass<'a> {
    geometry: &'a SimplexGeometry,
    gradients: &'a GradientAssignment,
    exponent: i32,
    scale: f64,
    weights: &'a mut [f64],
    cartesian: &'a mut [f64],
    extent: Extent,
}

impl Visitor for SamplePass<'_> {
    fn visit(&mut self, _dimensions: usize, _bound: u64, indices: &[u64]) {
        for (weight, &part) in self.weights.iter_mut().zip(indices) {
            *weight = part as f64 * self.scale;
        }
        self.geometry
            .barycentric_to_cartesian(self.weights, self.cartesian);
        let value = evaluate(self.geometry, self.gradients, self.exponent, self.cartesian);
        self.extent.include(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponent_defaults() {
        assert_eq!(default_falloff_exponent(2), 4);
        assert_eq!(default_falloff_exponent(3), 3);
        assert_eq!(default_falloff_exponent(5), 5);
    }

    #[test]
    fn vertices_evaluate_to_zero() {
        // At a vertex its own offset is zero and every other vertex is
        // further than the falloff radius.
        let geometry = SimplexGeometry::new(3).expect("geometry");
        let mut gradients = GradientAssignment::new(3);
        gradients.assign(&[0, 5, 9, 11]);
        for vertex in 0..geometry.vertex_count() {
            let value = evaluate(&geometry, &gradients, 3, geometry.vertex(vertex));
            assert_eq!(value, 0.0);
        }
    }

    #[test]
    fn density_one_only_hits_vertices() {
        let geometry = SimplexGeometry::new(2).expect("geometry");
        let mut gradients = GradientAssignment::new(2);
        gradients.assign(&[1, 4, 6]);
        let mut sampler = KernelSampler::new(&geometry, 4);
        assert_eq!(sampler.sample(&gradients, 1), Extent::ZERO);
    }

    #[test]
    fn centroid_matches_direct_evaluation() {
        let geometry = SimplexGeometry::new(2).expect("geometry");
        let mut gradients = GradientAssignment::new(2);
        gradients.assign(&[7, 7, 7]);
        let mut centroid = [0.0; 2];
        geometry.barycentric_to_cartesian(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0], &mut centroid);
        let direct = evaluate(&geometry, &gradients, 4, &centroid);
        let mut sampler = KernelSampler::new(&geometry, 4);
        let extent = sampler.sample(&gradients, 3);
        assert!(extent.minimum <= direct.min(0.0));
        assert!(extent.maximum >= direct.max(0.0));
    }
}

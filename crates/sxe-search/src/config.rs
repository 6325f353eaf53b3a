use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

use serde::{Deserialize, Serialize};
use sxe_core::errors::{ErrorInfo, SxeError};
use sxe_core::WorkRange;
use sxe_loop::triangle_eq;

use crate::gradient::gradient_count;
use crate::serde::from_yaml_slice;

/// YAML-configurable parameters of one extremum search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Simplex dimension. Values below 2 are raised to 2.
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    /// Worker count; `0` uses every available core.
    #[serde(default)]
    pub threads: usize,
    /// Sample density of the coarse pass.
    #[serde(default = "default_points")]
    pub points: u64,
    /// Sample density used to refine assignments that moved an extreme.
    #[serde(default = "default_points")]
    pub points_large: u64,
    /// Report every outer step instead of only improvements.
    #[serde(default)]
    pub show_every: bool,
    /// Overrides the kernel falloff exponent.
    #[serde(default)]
    pub falloff_exponent: Option<i32>,
}

fn default_dimensions() -> usize {
    3
}

fn default_points() -> u64 {
    1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            threads: 0,
            points: default_points(),
            points_large: default_points(),
            show_every: false,
            falloff_exponent: None,
        }
    }
}

impl SearchConfig {
    /// Returns a copy with out-of-range values clamped to the nearest usable
    /// value. Thread count `0` is kept and resolved by [`Self::worker_count`].
    pub fn normalized(&self) -> Self {
        Self {
            dimensions: self.dimensions.max(2),
            threads: self.threads,
            points: self.points.max(1),
            points_large: self.points_large.max(1),
            show_every: self.show_every,
            falloff_exponent: self.falloff_exponent,
        }
    }

    /// Number of workers the driver will use.
    pub fn worker_count(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}

/// Loads a search configuration from a YAML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SearchConfig, SxeError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        SxeError::Config(
            ErrorInfo::new("config_read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    from_yaml_slice(&bytes)
}

/// Size of a search and how it is split across workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPlan {
    /// Simplex dimension.
    pub dimensions: usize,
    /// Distinct gradient vectors per vertex.
    pub gradient_count: u64,
    /// Distinct gradient assignments, the outer enumeration size.
    pub total: u64,
    /// Inner samples per assignment in the coarse pass.
    pub samples_per_assignment: u64,
    /// One contiguous rank range per worker.
    pub ranges: Vec<WorkRange>,
}

impl SearchPlan {
    /// Plans a search for an already normalized configuration.
    pub fn new(config: &SearchConfig) -> Result<Self, SxeError> {
        let dimensions = config.dimensions;
        let gradient_count = gradient_count(dimensions).ok_or_else(|| {
            SxeError::Config(
                ErrorInfo::new("gradient_overflow", "gradient count does not fit in 64 bits")
                    .with_context("dimensions", dimensions),
            )
        })?;
        let total = triangle_eq::iterations(dimensions + 1, gradient_count);
        if total == 0 {
            return Err(SxeError::Config(
                ErrorInfo::new("search_too_large", "gradient assignment count overflows")
                    .with_context("dimensions", dimensions)
                    .with_context("gradient_count", gradient_count)
                    .with_hint("lower the dimension"),
            ));
        }
        let samples_per_assignment = sxe_loop::triangle_sum::iterations(dimensions, config.points);
        Ok(Self {
            dimensions,
            gradient_count,
            total,
            samples_per_assignment,
            ranges: WorkRange::partition(total, config.worker_count()),
        })
    }

    /// Number of workers the plan was split for.
    pub fn workers(&self) -> usize {
        self.ranges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_follow_the_command_line_rules() {
        let config = SearchConfig {
            dimensions: 0,
            threads: 0,
            points: 0,
            points_large: 0,
            show_every: true,
            falloff_exponent: Some(3),
        }
        .normalized();
        assert_eq!(config.dimensions, 2);
        assert_eq!(config.points, 1);
        assert_eq!(config.points_large, 1);
        assert!(config.show_every);
        assert_eq!(config.falloff_exponent, Some(3));
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn plan_for_two_dimensions() {
        let config = SearchConfig {
            dimensions: 2,
            threads: 4,
            points: 3,
            ..SearchConfig::default()
        };
        let plan = SearchPlan::new(&config).expect("plan");
        assert_eq!(plan.gradient_count, 8);
        assert_eq!(plan.total, 120);
        assert_eq!(plan.samples_per_assignment, 10);
        assert_eq!(plan.workers(), 4);
        assert_eq!(plan.ranges.iter().map(|r| r.count).sum::<u64>(), 120);
    }

    #[test]
    fn oversized_search_is_a_config_error() {
        let config = SearchConfig {
            dimensions: 40,
            threads: 1,
            ..SearchConfig::default()
        };
        let err = SearchPlan::new(&config).expect_err("overflow");
        assert_eq!(err.info().code, "search_too_large");
    }
}

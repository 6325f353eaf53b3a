#![deny(missing_docs)]
//! Exhaustive search for the extreme values of the simplex noise kernel.
//!
//! Every assignment of gradients to the simplex vertices is enumerated with
//! [`sxe_loop::triangle_eq`], split into contiguous rank ranges across a
//! fixed pool of workers. Each worker samples the kernel on a barycentric
//! lattice ([`sxe_loop::triangle_sum`]) and merges its local extent into a
//! shared [`ExtremumState`]. Assignments that move a bound are re-sampled at
//! a finer density.

/// Search configuration, YAML loading and work planning.
pub mod config;
/// Worker launch, per-worker search loop and outcome.
pub mod driver;
/// Shared running minimum and maximum.
pub mod extremum;
/// Gradient decoding and per-vertex assignment.
pub mod gradient;
/// Canonical hashing helpers.
pub mod hash;
/// Kernel evaluation and lattice sampling.
pub mod kernel;
/// Progress events and sinks.
pub mod progress;
/// Report assembly and persistence.
pub mod report;
/// Canonical JSON and YAML serde helpers.
pub mod serde;

pub use config::{load_config, SearchConfig, SearchPlan};
pub use driver::{run_search, run_search_with, Launcher, OsThreads, SearchOutcome, WorkerJob};
pub use extremum::{ExtremumSnapshot, ExtremumState, WorkerProgress};
pub use gradient::{decode_gradient, gradient_count, GradientAssignment};
pub use kernel::{default_falloff_exponent, evaluate, Extent, KernelSampler};
pub use progress::{CommitKind, NullSink, ProgressEvent, ProgressSink, TracingSink};
pub use report::{read_report, write_report, SearchReport};

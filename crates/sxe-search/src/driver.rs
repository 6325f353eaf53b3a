use std::io;
use std::panic;
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sxe_core::errors::SxeError;
use sxe_geom::SimplexGeometry;
use sxe_loop::triangle_eq;
use tracing::{debug, info, warn};

use crate::config::{SearchConfig, SearchPlan};
use crate::extremum::{ExtremumState, WorkerProgress};
use crate::gradient::GradientAssignment;
use crate::kernel::{default_falloff_exponent, KernelSampler};
use crate::progress::{ProgressSink, TracingSink};

/// Work handed to a [`Launcher`].
pub type WorkerJob<'scope> = Box<dyn FnOnce() + Send + 'scope>;

/// Starts worker threads inside a scope.
pub trait Launcher: Sync {
    /// Starts `job` on a new thread named `name`. On error the job has not
    /// run and the driver runs its range on the calling thread instead.
    fn launch<'scope, 'env>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        name: String,
        job: WorkerJob<'scope>,
    ) -> io::Result<ScopedJoinHandle<'scope, ()>>;
}

/// Named scoped OS threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsThreads;

impl Launcher for OsThreads {
    fn launch<'scope, 'env>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        name: String,
        job: WorkerJob<'scope>,
    ) -> io::Result<ScopedJoinHandle<'scope, ()>> {
        thread::Builder::new().name(name).spawn_scoped(scope, job)
    }
}

/// Final result of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Smallest kernel value found.
    pub minimum: f64,
    /// Largest kernel value found.
    pub maximum: f64,
    /// `max(-minimum, maximum)`.
    pub largest: f64,
    /// Falloff exponent the kernel used.
    pub falloff_exponent: i32,
    /// Gradient assignments evaluated.
    pub iterations_completed: u64,
    /// Gradient assignments in the search.
    pub total: u64,
    /// Commits that moved either bound.
    pub updates: u64,
    /// Workers the search was split across.
    pub workers: usize,
    /// Workers that could not be launched and ran on the calling thread.
    pub spawn_failures: usize,
    /// Wall-clock duration in seconds.
    pub elapsed_seconds: f64,
}

impl SearchOutcome {
    /// `1 / largest`, or `0` when the kernel never left zero.
    pub fn normalization(&self) -> f64 {
        if self.largest > 0.0 {
            1.0 / self.largest
        } else {
            0.0
        }
    }
}

struct WorkerContext<'a> {
    config: &'a SearchConfig,
    plan: &'a SearchPlan,
    geometry: &'a SimplexGeometry,
    state: &'a ExtremumState,
    sink: &'a dyn ProgressSink,
    exponent: i32,
}

impl WorkerContext<'_> {
    fn run(&self, worker: usize) {
        let range = self.plan.ranges[worker];
        if range.is_empty() {
            debug!(worker, "empty range");
            return;
        }
        let dimensions = self.config.dimensions;
        let mut gradients = GradientAssignment::new(dimensions);
        let mut sampler = KernelSampler::new(self.geometry, self.exponent);
        let mut progress = WorkerProgress {
            worker,
            workers: self.plan.workers(),
            completed: 0,
            assigned: range.count,
        };
        triangle_eq::iterate_range(
            dimensions + 1,
            self.plan.gradient_count,
            range.start,
            range.count,
            &mut |_: usize, _: u64, tuple: &[u64]| {
                gradients.assign(tuple);
                let coarse = sampler.sample(&gradients, self.config.points);
                progress.completed += 1;
                if self.state.commit(coarse, false, progress, self.sink) {
                    let refined = sampler.sample(&gradients, self.config.points_large);
                    self.state.commit(refined, true, progress, self.sink);
                }
            },
        );
        debug!(worker, start = range.start, count = range.count, "worker finished");
    }
}

/// Runs a search on OS threads, logging progress through `tracing`.
pub fn run_search(config: &SearchConfig) -> Result<SearchOutcome, SxeError> {
    run_search_with(config, &OsThreads, &TracingSink)
}

/// Runs a search with an explicit launcher and progress sink.
///
/// The configuration is normalized first. Workers `0..n-1` are launched
/// through `launcher`; the last range runs on the calling thread, followed
/// by the range of every worker that failed to launch. A worker panic is
/// re-raised once all workers have been joined.
pub fn run_search_with<L, S>(
    config: &SearchConfig,
    launcher: &L,
    sink: &S,
) -> Result<SearchOutcome, SxeError>
where
    L: Launcher,
    S: ProgressSink,
{
    let config = config.normalized();
    let plan = SearchPlan::new(&config)?;
    let geometry = SimplexGeometry::new(config.dimensions)?;
    let exponent = config
        .falloff_exponent
        .unwrap_or_else(|| default_falloff_exponent(config.dimensions));
    let state = ExtremumState::new(plan.total, config.show_every);
    info!(
        dimensions = config.dimensions,
        gradients = plan.gradient_count,
        assignments = plan.total,
        samples = plan.samples_per_assignment,
        workers = plan.workers(),
        exponent,
        "starting search"
    );

    let context = WorkerContext {
        config: &config,
        plan: &plan,
        geometry: &geometry,
        state: &state,
        sink,
        exponent,
    };
    let started = Instant::now();
    let spawn_failures = launch_all(&context, launcher);
    let elapsed_seconds = started.elapsed().as_secs_f64();

    let snapshot = state.snapshot();
    Ok(SearchOutcome {
        minimum: snapshot.minimum,
        maximum: snapshot.maximum,
        largest: snapshot.largest(),
        falloff_exponent: exponent,
        iterations_completed: snapshot.iterations_completed,
        total: plan.total,
        updates: snapshot.updates,
        workers: plan.workers(),
        spawn_failures,
        elapsed_seconds,
    })
}

fn launch_all<L: Launcher>(context: &WorkerContext<'_>, launcher: &L) -> usize {
    let workers = context.plan.workers();
    let inline = workers - 1;
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(inline);
        let mut failed = Vec::new();
        for worker in 0..inline {
            let job: WorkerJob<'_> = Box::new(move || context.run(worker));
            match launcher.launch(scope, format!("sxe-worker-{worker}"), job) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    warn!(worker, error = %err, "worker launch failed; running its range inline");
                    failed.push(worker);
                }
            }
        }
        context.run(inline);
        for &worker in &failed {
            context.run(worker);
        }
        for handle in handles {
            if let Err(payload) = handle.join() {
                panic::resume_unwind(payload);
            }
        }
        failed.len()
    })
}


mod common;

use common::{small_config, RecordingSink};
use sxe_geom::SimplexGeometry;
use sxe_loop::triangle_eq;
use sxe_search::{
    default_falloff_exponent, gradient_count, run_search_with, CommitKind, GradientAssignment,
    KernelSampler, NullSink, OsThreads, SearchConfig,
};

#[test]
fn thread_count_does_not_change_the_bounds() {
    for dimensions in [2, 3] {
        let single = run_search_with(&small_config(dimensions, 1), &OsThreads, &NullSink)
            .expect("single thread");
        let pooled = run_search_with(&small_config(dimensions, 4), &OsThreads, &NullSink)
            .expect("four threads");
        assert_eq!(single.minimum, pooled.minimum);
        assert_eq!(single.maximum, pooled.maximum);
        assert_eq!(single.iterations_completed, single.total);
        assert_eq!(pooled.iterations_completed, pooled.total);
        assert_eq!(pooled.workers, 4);
        assert_eq!(pooled.spawn_failures, 0);
    }
}

/// Coarse bounds from a single sequential pass over every assignment.
fn sequential_bounds(dimensions: usize, points: u64) -> (f64, f64) {
    let geometry = SimplexGeometry::new(dimensions).expect("geometry");
    let count = gradient_count(dimensions).expect("gradient count");
    let mut gradients = GradientAssignment::new(dimensions);
    let mut sampler = KernelSampler::new(&geometry, default_falloff_exponent(dimensions));
    let (mut minimum, mut maximum) = (0.0f64, 0.0f64);
    triangle_eq::iterate(dimensions + 1, count, &mut |_: usize, _: u64, tuple: &[u64]| {
        gradients.assign(tuple);
        let extent = sampler.sample(&gradients, points);
        minimum = minimum.min(extent.minimum);
        maximum = maximum.max(extent.maximum);
    });
    (minimum, maximum)
}

#[test]
fn bounds_match_a_sequential_pass() {
    for dimensions in [2, 3] {
        let outcome = run_search_with(&small_config(dimensions, 3), &OsThreads, &NullSink)
            .expect("search");
        let (minimum, maximum) = sequential_bounds(dimensions, 4);
        assert_eq!(outcome.minimum, minimum, "dimensions={dimensions}");
        assert_eq!(outcome.maximum, maximum, "dimensions={dimensions}");
        assert!(outcome.minimum < 0.0 && outcome.maximum > 0.0);
        assert_eq!(outcome.largest, (-outcome.minimum).max(outcome.maximum));
    }
    let planar = run_search_with(&small_config(2, 2), &OsThreads, &NullSink).expect("search");
    assert_eq!(planar.falloff_exponent, 4);
}

#[test]
fn commits_are_monotone_and_ordered() {
    let sink = RecordingSink::default();
    let config = SearchConfig {
        show_every: true,
        points_large: 6,
        ..small_config(2, 3)
    };
    let outcome = run_search_with(&config, &OsThreads, &sink).expect("search");
    let events = sink.events();

    let mut counted = 0;
    for pair in events.windows(2) {
        assert!(pair[1].minimum <= pair[0].minimum);
        assert!(pair[1].maximum >= pair[0].maximum);
    }
    for event in &events {
        if let CommitKind::Counted { completed, total } = event.kind {
            counted += 1;
            assert_eq!(completed, counted);
            assert_eq!(total, outcome.total);
        }
        assert_eq!(event.largest, (-event.minimum).max(event.maximum));
    }
    assert_eq!(counted, outcome.total);
    assert!(events[0].updated);
    let updates = events.iter().filter(|event| event.updated).count() as u64;
    assert_eq!(updates, outcome.updates);
}

#[test]
fn quiet_runs_only_report_updates() {
    let sink = RecordingSink::default();
    let outcome = run_search_with(&small_config(2, 2), &OsThreads, &sink).expect("search");
    let events = sink.events();
    assert!(events.iter().all(|event| event.updated));
    assert_eq!(events.len() as u64, outcome.updates);
}

#[test]
fn refinement_never_loosens_the_coarse_bounds() {
    let coarse = run_search_with(&small_config(2, 2), &OsThreads, &NullSink).expect("coarse");
    let config = SearchConfig {
        points_large: 12,
        ..small_config(2, 2)
    };
    let refined = run_search_with(&config, &OsThreads, &NullSink).expect("refined");
    assert!(refined.minimum <= coarse.minimum);
    assert!(refined.maximum >= coarse.maximum);
}

#[test]
fn exponent_override_is_used() {
    let config = SearchConfig {
        falloff_exponent: Some(3),
        ..small_config(3, 2)
    };
    let outcome = run_search_with(&config, &OsThreads, &NullSink).expect("search");
    assert_eq!(outcome.falloff_exponent, 3);
}

#[test]
fn more_workers_than_assignments() {
    let outcome = run_search_with(&small_config(2, 200), &OsThreads, &NullSink).expect("search");
    assert_eq!(outcome.workers, 200);
    assert_eq!(outcome.iterations_completed, 120);
}

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use sxe_search::{ProgressEvent, ProgressSink, SearchConfig};

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(relative)
}

pub fn small_config(dimensions: usize, threads: usize) -> SearchConfig {
    SearchConfig {
        dimensions,
        threads,
        points: 4,
        points_large: 4,
        ..SearchConfig::default()
    }
}

/// Keeps every event in commit order.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl ProgressSink for RecordingSink {
    fn record(&self, event: &ProgressEvent) {
        self.events.lock().expect("events lock").push(*event);
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sxe_core::errors::SxeError;
use sxe_core::provenance::{RunProvenance, SchemaVersion};

use crate::config::SearchConfig;
use crate::driver::SearchOutcome;
use crate::hash::stable_hash_string;
use crate::serde::{from_json_slice, to_canonical_json_bytes};

/// Serialized summary of a finished search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    /// Schema of this payload.
    pub schema: SchemaVersion,
    /// Config hash, timestamp and tool versions.
    pub provenance: RunProvenance,
    /// Effective (normalized) configuration.
    pub config: SearchConfig,
    /// Bounds and counters of the run.
    pub outcome: SearchOutcome,
    /// Factor that scales the kernel into `[-1, 1]`.
    pub normalization: f64,
}

impl SearchReport {
    /// Builds a report, hashing the normalized configuration.
    pub fn from_outcome(config: &SearchConfig, outcome: SearchOutcome) -> Result<Self, SxeError> {
        let config = config.normalized();
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            "sxe-search".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        let provenance = RunProvenance {
            config_hash: stable_hash_string(&config)?,
            created_at: Utc::now().to_rfc3339(),
            tool_versions,
        };
        Ok(Self {
            schema: SchemaVersion::default(),
            provenance,
            normalization: outcome.normalization(),
            config,
            outcome,
        })
    }
}

/// Writes a report as canonical JSON.
pub fn write_report<P: AsRef<Path>>(path: P, report: &SearchReport) -> Result<(), SxeError> {
    let path = path.as_ref();
    let bytes = to_canonical_json_bytes(report)?;
    fs::write(path, bytes)
        .map_err(|err| SxeError::io("report_write", err).with_context("path", path.display()))
}

/// Reads a report written by [`write_report`].
pub fn read_report<P: AsRef<Path>>(path: P) -> Result<SearchReport, SxeError> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .map_err(|err| SxeError::io("report_read", err).with_context("path", path.display()))?;
    from_json_slice(&bytes)
}

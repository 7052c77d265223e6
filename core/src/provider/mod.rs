//! Process/system stats boundary.
//!
//! Provides the `StatsProvider` trait and implementations for `ps`/`pgrep`
//! (production) and a scripted mock (testing). Every query is synchronous
//! and total: a process that cannot be found or sampled is `None`, a failed
//! system query is the unknown [`SystemSample`] — never an error that
//! unwinds the caller.

pub mod mock;
pub mod ps;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{ServiceSource, ServiceSpec};
use crate::sample::{DbStats, ProcessSample, SystemSample};


/// Trait for point-in-time process and system measurements.
pub trait StatsProvider {
    /// Sample one process by PID. `None` means "not running" (or not
    /// sampleable), a normal state.
    fn sample_by_pid(&self, pid: &str) -> Option<ProcessSample>;

    /// Resolve a command-line pattern to a PID. First match wins.
    fn find_pid(&self, pattern: &str) -> Option<String>;

    /// System-wide totals; the unknown sample on failure.
    fn system_sample(&self) -> SystemSample;
}


/// Per-service aggregation result. `sample == None` renders as "down".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRow {
    pub name: String,
    pub sample: Option<ProcessSample>,
}


/// Poll every configured service once, preserving display order.
///
/// A service with an empty fixed PID is "not tracked": it is reported
/// absent without touching the provider at all.
pub fn collect_services(provider: &dyn StatsProvider, specs: &[ServiceSpec]) -> Vec<ServiceRow> {
    specs
        .iter()
        .map(|spec| {
            let sample = match &spec.source {
                ServiceSource::Pid(pid) if pid.is_empty() => None,
                ServiceSource::Pid(pid) => provider.sample_by_pid(pid),
                ServiceSource::Pattern(pattern) => provider
                    .find_pid(pattern)
                    .and_then(|pid| provider.sample_by_pid(&pid)),
            };
            ServiceRow {
                name: spec.name.clone(),
                sample,
            }
        })
        .collect()
}


/// Stat the database file for the storage indicator. The file is never
/// opened; only existence and size are read.
pub fn probe_db(path: &Path) -> DbStats {
    match std::fs::metadata(path) {
        Ok(meta) => DbStats {
            exists: true,
            size_mb: meta.len() as f64 / (1024.0 * 1024.0),
        },
        Err(_) => DbStats::missing(),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

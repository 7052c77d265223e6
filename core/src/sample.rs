//! Sample types — point-in-time resource measurements.
//!
//! Samples are ephemeral: produced once per poll, never persisted. A missing
//! per-process sample is represented as `Option::None` by callers and means
//! "service not running" — a normal state, not an error.

use serde::{Deserialize, Serialize};


/// Resource usage of a single process at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSample {
    /// CPU usage in percent, as reported by the OS.
    pub cpu_percent: f64,
    /// Share of physical memory in percent.
    pub mem_percent: f64,
    /// Resident set size in MiB.
    pub resident_mb: f64,
}


/// System-wide resource usage at one instant.
///
/// The zero value (both memory fields zero) means "unknown" — the system
/// query failed — and is distinct from a real measurement of zero usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemSample {
    /// Sum of per-process CPU usage across the system, in percent.
    pub cpu_total_percent: f64,
    /// Physical memory in use, MiB.
    pub mem_used_mb: u64,
    /// Total physical memory, MiB.
    pub mem_total_mb: u64,
}

impl SystemSample {
    /// The explicit "query failed" value.
    pub fn unknown() -> Self {
        SystemSample {
            cpu_total_percent: 0.0,
            mem_used_mb: 0,
            mem_total_mb: 0,
        }
    }

    /// Whether this sample carries a real measurement.
    pub fn is_known(&self) -> bool {
        self.mem_total_mb > 0
    }

    /// Memory usage as a percentage of total. Zero when unknown.
    pub fn mem_percent(&self) -> f64 {
        if self.mem_total_mb == 0 {
            0.0
        } else {
            (self.mem_used_mb as f64 / self.mem_total_mb as f64) * 100.0
        }
    }
}


/// Storage indicator for the database file. The file is only stat'ed,
/// never opened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DbStats {
    pub exists: bool,
    pub size_mb: f64,
}

impl DbStats {
    pub fn missing() -> Self {
        DbStats {
            exists: false,
            size_mb: 0.0,
        }
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

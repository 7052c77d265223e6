//! `ps`-backed stats provider.
//!
//! Shells out to the standard procps tools synchronously: `ps -p` for
//! per-process samples, `pgrep -f` for discovery, `ps -eo %cpu` plus
//! `free -m` for the system-wide aggregate. A slow call delays the tick it
//! runs in; that latency hit is accepted in exchange for a snapshot that is
//! never stale-by-design. All output parsing lives in pure helpers so it
//! can be tested against fixture strings.

use std::process::Command;

use crate::sample::{ProcessSample, SystemSample};

use super::StatsProvider;


/// Production provider. Stateless; each call spawns the tool it needs.
pub struct PsProvider;

impl PsProvider {
    pub fn new() -> Self {
        PsProvider
    }
}

impl Default for PsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsProvider for PsProvider {
    fn sample_by_pid(&self, pid: &str) -> Option<ProcessSample> {
        if pid.is_empty() {
            return None;
        }
        // Signal-0 probe short-circuits `ps` for PIDs that are already gone.
        if let Ok(n) = pid.parse::<i32>() {
            if !pid_alive(n) {
                return None;
            }
        }
        let out = Command::new("ps")
            .args(["-p", pid, "-o", "%cpu,%mem,rss", "--no-headers"])
            .output()
            .ok()?;
        if !out.status.success() {
            return None;
        }
        parse_ps_sample(&String::from_utf8_lossy(&out.stdout))
    }

    fn find_pid(&self, pattern: &str) -> Option<String> {
        let out = Command::new("pgrep").args(["-f", pattern]).output().ok()?;
        if !out.status.success() {
            return None;
        }
        first_pid(&String::from_utf8_lossy(&out.stdout))
    }

    fn system_sample(&self) -> SystemSample {
        let Some(cpu_total_percent) = total_cpu() else {
            return SystemSample::unknown();
        };
        let Some((mem_used_mb, mem_total_mb)) = mem_usage() else {
            return SystemSample::unknown();
        };
        SystemSample {
            cpu_total_percent,
            mem_used_mb,
            mem_total_mb,
        }
    }
}


/// Whether a process with this PID exists, via `kill(pid, 0)`.
pub fn pid_alive(pid: i32) -> bool {
    unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
}

fn total_cpu() -> Option<f64> {
    let out = Command::new("ps")
        .args(["-eo", "%cpu", "--no-headers"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    Some(sum_cpu_column(&String::from_utf8_lossy(&out.stdout)))
}

fn mem_usage() -> Option<(u64, u64)> {
    let out = Command::new("free").arg("-m").output().ok()?;
    if !out.status.success() {
        return None;
    }
    parse_free_mem(&String::from_utf8_lossy(&out.stdout))
}


// ---------------------------------------------------------------------------
// Output parsing
// ---------------------------------------------------------------------------

/// Parse one `ps -o %cpu,%mem,rss` row. RSS arrives in KiB.
pub fn parse_ps_sample(output: &str) -> Option<ProcessSample> {
    let parts: Vec<&str> = output.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    Some(ProcessSample {
        cpu_percent: parts[0].parse().ok()?,
        mem_percent: parts[1].parse().ok()?,
        resident_mb: parts[2].parse::<f64>().ok()? / 1024.0,
    })
}

/// First PID line of `pgrep` output.
pub fn first_pid(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(|l| l.to_string())
}

/// Sum a whitespace-separated `%cpu` column; unparseable tokens count as 0.
pub fn sum_cpu_column(output: &str) -> f64 {
    output
        .split_whitespace()
        .filter_map(|tok| tok.parse::<f64>().ok())
        .sum()
}

/// Extract `(used_mb, total_mb)` from the `Mem:` row of `free -m`.
pub fn parse_free_mem(output: &str) -> Option<(u64, u64)> {
    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("Mem:") {
            let parts: Vec<&str> = rest.split_whitespace().collect();
            if parts.len() >= 2 {
                let total = parts[0].parse().ok()?;
                let used = parts[1].parse().ok()?;
                return Some((used, total));
            }
        }
    }
    None
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

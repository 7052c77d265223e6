//! Log file reads — stateless tail and full-content snapshots.
//!
//! Both functions re-read the file on every call; there is no cursor or
//! offset tracking. If the file grows between two calls, which lines count
//! as "the last N" shifts accordingly. That race is accepted: this is a
//! best-effort tail for a dashboard, not a log-shipping pipeline.

use std::fs;
use std::path::Path;


/// Return at most the last `max_lines` lines of the file, oldest first.
/// Any I/O failure yields an empty vec, never an error.
pub fn tail(path: &Path, max_lines: usize) -> Vec<String> {
    let Ok(text) = fs::read_to_string(path) else {
        return Vec::new();
    };
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    lines[start..].iter().map(|l| l.to_string()).collect()
}

/// Return the file's entire contents, or an empty string on any I/O error.
pub fn read_full(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Error block extraction — finds the most recent error in a log.
//!
//! Dev-stack errors are multi-line: a message line followed by stack frames,
//! with no structured terminator. This module scans the whole log top to
//! bottom with a two-state machine and keeps the *last* block it saw start,
//! so two back-to-back errors resolve to the second one.
//!
//! The continuation predicates (leading `/`, `main.`/`runtime.` frame
//! prefixes, `goroutine ` markers, blank lines, embedded tabs) are a frozen
//! heuristic tuned against real wails/Go/vite output. Their precise
//! behavior, including the quirks, is what downstream tooling expects;
//! do not tighten or loosen them.

use serde::{Deserialize, Serialize};

/// Substrings (matched case-insensitively) that start or restart a block.
const TRIGGERS: &[&str] = &["error", "panic", "fail"];

/// Stack-frame prefixes accepted as block continuations.
const FRAME_PREFIXES: &[&str] = &["main.", "runtime.", "goroutine "];


/// An extracted error block: one trigger line plus its continuation lines,
/// in original order. Never empty — "no error found" is `None` at the
/// [`extract_last_error`] call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBlock {
    pub lines: Vec<String>,
}

impl ErrorBlock {
    /// The block as a single newline-joined string, for the clipboard or
    /// the dump file.
    pub fn as_text(&self) -> String {
        self.lines.join("\n")
    }
}


/// Scanner state: outside any block, or extending the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Normal,
    InError,
}


/// Whether the line's case-insensitive form contains a trigger substring.
/// Also used by the dashboard to flag an error anywhere in the visible tail.
pub fn is_trigger_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    TRIGGERS.iter().any(|t| lower.contains(t))
}

/// Whether the line looks like a continuation of an in-progress block:
/// a path-like frame, a recognized frame prefix, a blank separator, or an
/// indented (tab-containing) frame.
fn is_continuation(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty()
        || trimmed.starts_with('/')
        || FRAME_PREFIXES.iter().any(|p| trimmed.starts_with(p))
        || line.contains('\t')
}


/// Extract the most recent error block from the full log text.
///
/// Two-state scan, top to bottom. In both states the trigger check runs
/// before anything else: a trigger line hard-resets the capture buffer to
/// just itself, discarding any partially-built earlier block. While in a
/// block, a non-trigger line extends it iff it matches a continuation
/// predicate; otherwise capture ends but the buffer is preserved as the
/// best candidate so far (only a later trigger replaces it).
///
/// The ordering is load-bearing: a continuation-shaped line that *also*
/// contains a trigger substring (say `/path/to/error_handler.go`) restarts
/// the block rather than extending it. Swapping the checks would change
/// which block wins.
pub fn extract_last_error(text: &str) -> Option<ErrorBlock> {
    let mut state = Scan::Normal;
    let mut buffer: Vec<String> = Vec::new();

    for line in text.lines() {
        if is_trigger_line(line) {
            buffer.clear();
            buffer.push(line.to_string());
            state = Scan::InError;
            continue;
        }
        if state == Scan::InError {
            if is_continuation(line) {
                buffer.push(line.to_string());
            } else {
                state = Scan::Normal;
            }
        }
    }

    if buffer.is_empty() {
        None
    } else {
        Some(ErrorBlock { lines: buffer })
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

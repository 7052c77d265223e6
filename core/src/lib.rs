//! miaumon engine — watches the miau dev processes and log stream.
//!
//! This crate is the headless half of the monitor: it samples process and
//! system resources, tails the dev log, extracts error blocks on demand,
//! and owns the dashboard snapshot the TUI renders. It performs no terminal
//! I/O; everything here is driven by the event loop in `miaumon-tui` and is
//! fully testable without a terminal.
//!
//! # Modules
//!
//! - [`config`] — environment and service-set resolution
//! - [`logtail`] — stateless last-N-lines / full-file log reads
//! - [`extract`] — most-recent error block extraction
//! - [`provider`] — process/system stats boundary (`ps`-backed + mock)
//! - [`state`] — the dashboard snapshot and status message lifecycle
//! - [`clipboard`] — clipboard boundary with file-save fallback
//! - [`dispatch`] — key-to-action mapping and the extract action

pub mod clipboard;
pub mod config;
pub mod dispatch;
pub mod extract;
pub mod logtail;
pub mod provider;
pub mod sample;
pub mod state;

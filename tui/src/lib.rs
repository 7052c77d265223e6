//! miaumon TUI — terminal rendering and the event loop.
//!
//! This crate is the interactive half of the monitor. It owns the terminal
//! (raw mode + alternate screen, restored on every exit path) and drives
//! the tick cycle: poll for one keypress, dispatch it, refresh the
//! dashboard state from the engine, draw. All domain logic lives in
//! `miaumon-core`; rendering consumes an immutable `&DashboardState`.
//!
//! # Modules
//!
//! - [`dashboard`] — frame layout, services table, log colorization, footer
//! - [`runner`] — terminal lifecycle and the cooperative tick loop

pub mod dashboard;
pub mod runner;

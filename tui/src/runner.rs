//! Event loop runner — terminal lifecycle and the tick cycle.
//!
//! Strictly single-threaded and cooperative: the loop's own turn is the
//! only writer of the dashboard state, so there are no locks. The only two
//! suspension points are the bounded `event::poll` timeout (which doubles
//! as the inter-tick sleep) and nothing else — a slow `ps` call delays the
//! tick rather than being hidden behind a thread.
//!
//! Within a tick, input is dispatched before the state refresh and the
//! next draw, so a status message set by a keypress is visible in the very
//! next frame.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::prelude::*;
use ratatui::Terminal;

use miaumon_core::clipboard::{Clipboard, XclipClipboard};
use miaumon_core::config::MonitorConfig;
use miaumon_core::dispatch;
use miaumon_core::provider::ps::PsProvider;
use miaumon_core::provider::StatsProvider;
use miaumon_core::state::{now_ms, DashboardState};

use crate::dashboard;


/// The monitor runner. Owns the ratatui terminal, the engine state, and
/// the provider/clipboard boundaries.
pub struct Monitor {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    config: MonitorConfig,
    state: DashboardState,
    provider: Box<dyn StatsProvider>,
    clipboard: Box<dyn Clipboard>,
    last_refresh: Instant,
}

impl Monitor {
    /// Enter raw mode and the alternate screen. This is the only fatal
    /// seam in the program: if the terminal cannot be set up, there is
    /// nothing to monitor with.
    pub fn new(config: MonitorConfig) -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Monitor {
            terminal,
            config,
            state: DashboardState::new(),
            provider: Box::new(PsProvider::new()),
            clipboard: Box::new(XclipClipboard),
            last_refresh: Instant::now(),
        })
    }

    /// Run the tick loop until Ctrl-C (or `q`) is pressed.
    pub fn run(&mut self) -> Result<(), io::Error> {
        // First frame should carry data, not placeholders.
        self.state.refresh(self.provider.as_ref(), &self.config);
        self.last_refresh = Instant::now();

        loop {
            let state = &self.state;
            let refresh = self.config.refresh_interval;
            self.terminal
                .draw(|frame| dashboard::render_frame(frame, state, now_ms(), refresh))?;

            // Poll with whatever is left of the tick; zero means "just
            // check" when a refresh is already overdue.
            let timeout = self
                .config
                .refresh_interval
                .checked_sub(self.last_refresh.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                if let Event::Key(key_event) = event::read()? {
                    if should_quit(&key_event) {
                        break;
                    }
                    if let Some(ch) = key_char(&key_event) {
                        dispatch::dispatch_key(
                            &mut self.state,
                            &self.config,
                            self.clipboard.as_ref(),
                            ch,
                            now_ms(),
                        );
                    }
                }
            }

            if self.last_refresh.elapsed() >= self.config.refresh_interval {
                self.state.refresh(self.provider.as_ref(), &self.config);
                self.last_refresh = Instant::now();
            }
        }

        self.shutdown()
    }

    /// Restore the terminal to its normal state.
    fn shutdown(&mut self) -> Result<(), io::Error> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Monitor {
    // Backstop for abnormal exits (panic unwind, early `?` return):
    // raw mode must never outlive the process.
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}


/// Whether this key event ends the monitor: Ctrl-C, or a bare `q`.
pub fn should_quit(key: &KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    key.code == KeyCode::Char('q') && key.modifiers.is_empty()
}

/// The plain character of a key event, if it is one. Modified keys are
/// not dispatched (Ctrl-E is not the extract key).
pub fn key_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(ch) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            Some(ch)
        }
        _ => None,
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

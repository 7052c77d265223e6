//! Input dispatch — maps keys to actions and executes them.
//!
//! One recognized key: `e` (either case) triggers error extraction. The
//! handler is stateless and idempotent under rapid repeats — every press
//! independently re-reads the log and re-runs extraction; there is no
//! debouncing because both are cheap.

use crate::clipboard::{save_error_file, Clipboard};
use crate::config::MonitorConfig;
use crate::extract::extract_last_error;
use crate::logtail;
use crate::state::DashboardState;


/// Actions a keypress can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Extract the most recent error block and copy (or save) it.
    ExtractError,
}

/// Map a keypress to an action. Unrecognized keys are no-ops.
pub fn action_for_key(key: char) -> Option<Action> {
    match key {
        'e' | 'E' => Some(Action::ExtractError),
        _ => None,
    }
}

/// Dispatch one keypress against the state. Called at the start of a tick,
/// before the refresh, so the resulting status renders the same tick.
pub fn dispatch_key(
    state: &mut DashboardState,
    config: &MonitorConfig,
    clipboard: &dyn Clipboard,
    key: char,
    now_ms: u64,
) {
    match action_for_key(key) {
        Some(Action::ExtractError) => run_extract(state, config, clipboard, now_ms),
        None => {}
    }
}

/// Execute the extract action: re-read the full log, find the latest error
/// block, copy it — falling back to the dump file when the clipboard
/// refuses — and set a status message on every branch.
pub fn run_extract(
    state: &mut DashboardState,
    config: &MonitorConfig,
    clipboard: &dyn Clipboard,
    now_ms: u64,
) {
    let content = logtail::read_full(&config.log_path);
    match extract_last_error(&content) {
        Some(block) => {
            let text = block.as_text();
            if clipboard.copy(&text) {
                state.set_status("Error copied to clipboard", now_ms);
            } else {
                match save_error_file(&config.error_file, &text) {
                    Ok(()) => state.set_status(
                        format!("Error saved to {}", config.error_file.display()),
                        now_ms,
                    ),
                    Err(_) => state.set_status("Could not copy or save error", now_ms),
                }
            }
        }
        None => state.set_status("No error found", now_ms),
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::{ServiceSource, ServiceSpec};
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_config(dir: &str) -> (MonitorConfig, PathBuf) {
        let root = std::env::temp_dir().join(dir);
        let _ = std::fs::create_dir_all(&root);
        let config = MonitorConfig {
            log_path: root.join("dev.log"),
            error_file: root.join("last-error.txt"),
            db_path: root.join("miau.db"),
            max_log_lines: 18,
            refresh_interval: Duration::from_secs(2),
            services: vec![ServiceSpec {
                name: "Go Backend".into(),
                source: ServiceSource::Pattern("miau-desktop".into()),
            }],
        };
        (config, root)
    }

    #[test]
    fn only_e_maps_to_extract() {
        assert_eq!(action_for_key('e'), Some(Action::ExtractError));
        assert_eq!(action_for_key('E'), Some(Action::ExtractError));
        for key in ['a', 'q', ' ', '\n', '1', 'x'] {
            assert_eq!(action_for_key(key), None, "{:?}", key);
        }
    }

    #[test]
    fn unrecognized_key_leaves_state_untouched() {
        let (config, root) = test_config("miaumon_disp_noop");
        let mut state = DashboardState::new();
        let clipboard = MemoryClipboard::new();
        dispatch_key(&mut state, &config, &clipboard, 'x', 100);
        assert!(state.status.is_none());
        assert!(clipboard.copied().is_empty());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn extract_copies_block_and_reports() {
        let (config, root) = test_config("miaumon_disp_copy");
        std::fs::write(&config.log_path, "INFO up\nERROR boom\n\tat main.run\n").unwrap();
        let mut state = DashboardState::new();
        let clipboard = MemoryClipboard::new();
        dispatch_key(&mut state, &config, &clipboard, 'e', 100);
        assert_eq!(clipboard.copied(), vec!["ERROR boom\n\tat main.run"]);
        let status = state.status.unwrap();
        assert_eq!(status.text, "Error copied to clipboard");
        assert_eq!(status.created_ms, 100);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn clipboard_failure_falls_back_to_file() {
        let (config, root) = test_config("miaumon_disp_fallback");
        std::fs::write(&config.log_path, "ERROR boom\n").unwrap();
        let mut state = DashboardState::new();
        let clipboard = MemoryClipboard::refusing();
        dispatch_key(&mut state, &config, &clipboard, 'e', 100);
        assert_eq!(
            std::fs::read_to_string(&config.error_file).unwrap(),
            "ERROR boom"
        );
        let status = state.status.unwrap();
        assert!(status.text.contains("Error saved to"));
        assert!(status.text.contains("last-error.txt"));
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn no_error_sets_distinct_status() {
        let (config, root) = test_config("miaumon_disp_none");
        std::fs::write(&config.log_path, "INFO all quiet\n").unwrap();
        let mut state = DashboardState::new();
        let clipboard = MemoryClipboard::new();
        dispatch_key(&mut state, &config, &clipboard, 'e', 100);
        assert!(clipboard.copied().is_empty());
        assert_eq!(state.status.unwrap().text, "No error found");
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_log_reads_as_no_error() {
        let (config, root) = test_config("miaumon_disp_nolog");
        let mut state = DashboardState::new();
        let clipboard = MemoryClipboard::new();
        dispatch_key(&mut state, &config, &clipboard, 'e', 100);
        assert_eq!(state.status.unwrap().text, "No error found");
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn repeated_presses_rerun_independently() {
        let (config, root) = test_config("miaumon_disp_repeat");
        std::fs::write(&config.log_path, "ERROR first\n").unwrap();
        let mut state = DashboardState::new();
        let clipboard = MemoryClipboard::new();
        dispatch_key(&mut state, &config, &clipboard, 'e', 100);
        // The log grows between presses; the second press sees the new block.
        std::fs::write(&config.log_path, "ERROR first\nERROR second\n").unwrap();
        dispatch_key(&mut state, &config, &clipboard, 'e', 200);
        assert_eq!(
            clipboard.copied(),
            vec!["ERROR first", "ERROR second"]
        );
        assert_eq!(state.status.unwrap().created_ms, 200);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn save_failure_reports_distinct_status() {
        let (mut config, root) = test_config("miaumon_disp_badsave");
        config.error_file = PathBuf::from("/nonexistent/miaumon/err.txt");
        std::fs::write(&config.log_path, "ERROR boom\n").unwrap();
        let mut state = DashboardState::new();
        let clipboard = MemoryClipboard::refusing();
        dispatch_key(&mut state, &config, &clipboard, 'e', 100);
        assert_eq!(state.status.unwrap().text, "Could not copy or save error");
        let _ = std::fs::remove_dir_all(&root);
    }
}

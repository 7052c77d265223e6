//! Dashboard state — the single mutable snapshot behind the display.
//!
//! The event loop owns one `DashboardState` and is its only writer; the
//! rendering surface gets `&DashboardState`. There is no locking because
//! there is no second actor: input dispatch and the refresh both run on the
//! loop's own turn.

use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::extract::is_trigger_line;
use crate::logtail;
use crate::provider::{collect_services, probe_db, ServiceRow, StatsProvider};
use crate::sample::{DbStats, SystemSample};

/// How long a status message stays visible.
pub const STATUS_VISIBLE_MS: u64 = 5000;


/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}


// ---------------------------------------------------------------------------
// StatusMessage
// ---------------------------------------------------------------------------

/// A transient footer message. Expiry is a read-time check: an expired
/// message may linger in the state, the display just stops showing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    /// Creation time, ms since epoch.
    pub created_ms: u64,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, now_ms: u64) -> Self {
        StatusMessage {
            text: text.into(),
            created_ms: now_ms,
        }
    }

    /// Visible while less than [`STATUS_VISIBLE_MS`] old.
    pub fn is_visible(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.created_ms) < STATUS_VISIBLE_MS
    }
}


// ---------------------------------------------------------------------------
// DashboardState
// ---------------------------------------------------------------------------

/// Everything the dashboard renders, recomputed once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardState {
    /// Latest per-service samples, in display order.
    pub services: Vec<ServiceRow>,
    /// Latest system-wide sample (unknown when the query failed).
    pub system: SystemSample,
    /// Database storage indicator.
    pub db: DbStats,
    /// The visible log tail, oldest first, bounded by config.
    pub log_tail: Vec<String>,
    /// Whether any tail line contains a trigger substring.
    pub has_error: bool,
    /// Current status message; replaced wholesale, never stacked.
    pub status: Option<StatusMessage>,
}

impl DashboardState {
    /// The empty pre-first-tick state.
    pub fn new() -> Self {
        DashboardState {
            services: Vec::new(),
            system: SystemSample::unknown(),
            db: DbStats::missing(),
            log_tail: Vec::new(),
            has_error: false,
            status: None,
        }
    }

    /// Recompute the snapshot from the providers and the log file.
    /// The status message is left alone — staleness is read-time.
    pub fn refresh(&mut self, provider: &dyn StatsProvider, config: &MonitorConfig) {
        self.services = collect_services(provider, &config.services);
        self.system = provider.system_sample();
        self.db = probe_db(&config.db_path);
        self.log_tail = logtail::tail(&config.log_path, config.max_log_lines);
        self.has_error = tail_has_error(&self.log_tail);
    }

    /// Replace the status message. The previous one, expired or not, is gone.
    pub fn set_status(&mut self, text: impl Into<String>, now_ms: u64) {
        self.status = Some(StatusMessage::new(text, now_ms));
    }

    /// The status message, if one is set and still within its window.
    pub fn visible_status(&self, now_ms: u64) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|s| s.is_visible(now_ms))
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}


/// Whether any line of the tail contains a trigger substring.
pub fn tail_has_error(lines: &[String]) -> bool {
    lines.iter().any(|l| is_trigger_line(l))
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ServiceSource, ServiceSpec};
    use crate::provider::mock::MockProvider;
    use crate::sample::ProcessSample;
    use std::path::PathBuf;
    use std::time::Duration;

    fn test_config(dir: &str) -> (MonitorConfig, PathBuf) {
        let root = std::env::temp_dir().join(dir);
        let _ = std::fs::create_dir_all(&root);
        let log_path = root.join("dev.log");
        let config = MonitorConfig {
            log_path: log_path.clone(),
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
    fn status_visible_within_window() {
        let msg = StatusMessage::new("copied", 10_000);
        assert!(msg.is_visible(10_000));
        assert!(msg.is_visible(14_999));
        assert!(!msg.is_visible(15_000));
        assert!(!msg.is_visible(20_000));
    }

    #[test]
    fn status_visibility_is_pure_in_now() {
        let msg = StatusMessage::new("copied", 0);
        // Same message, different clocks — no hidden state.
        assert!(msg.is_visible(4_999));
        assert!(!msg.is_visible(5_000));
        assert!(msg.is_visible(1));
    }

    #[test]
    fn new_status_replaces_old_entirely() {
        let mut state = DashboardState::new();
        state.set_status("first", 0);
        state.set_status("second", 10_000);
        let visible = state.visible_status(10_001).unwrap();
        assert_eq!(visible.text, "second");
        // The first message is gone, not stacked behind the second.
        assert_eq!(state.status.as_ref().unwrap().created_ms, 10_000);
    }

    #[test]
    fn expired_status_is_suppressed_not_cleared() {
        let mut state = DashboardState::new();
        state.set_status("old news", 0);
        assert!(state.visible_status(60_000).is_none());
        // Still present in the state; only the read suppresses it.
        assert!(state.status.is_some());
    }

    #[test]
    fn refresh_populates_snapshot() {
        let (config, root) = test_config("miaumon_state_refresh");
        std::fs::write(&config.log_path, "INFO up\nERROR db down\n").unwrap();
        let provider = MockProvider::new()
            .with_pid("miau-desktop", "55")
            .with_sample(
                "55",
                ProcessSample {
                    cpu_percent: 1.5,
                    mem_percent: 0.5,
                    resident_mb: 20.0,
                },
            )
            .with_system(SystemSample {
                cpu_total_percent: 35.0,
                mem_used_mb: 2000,
                mem_total_mb: 8000,
            });

        let mut state = DashboardState::new();
        state.refresh(&provider, &config);

        assert_eq!(state.services.len(), 1);
        assert!(state.services[0].sample.is_some());
        assert!(state.system.is_known());
        assert_eq!(state.log_tail.len(), 2);
        assert!(state.has_error);
        assert!(!state.db.exists);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn refresh_with_missing_log_clears_tail() {
        let (config, root) = test_config("miaumon_state_nolog");
        let provider = MockProvider::new();
        let mut state = DashboardState::new();
        state.log_tail = vec!["stale".into()];
        state.has_error = true;
        state.refresh(&provider, &config);
        assert!(state.log_tail.is_empty());
        assert!(!state.has_error);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn refresh_leaves_status_alone() {
        let (config, root) = test_config("miaumon_state_status");
        let provider = MockProvider::new();
        let mut state = DashboardState::new();
        state.set_status("copied", 123);
        state.refresh(&provider, &config);
        assert_eq!(state.status.as_ref().unwrap().text, "copied");
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn tail_error_detection_matches_triggers() {
        assert!(tail_has_error(&["build FAILED".into()]));
        assert!(tail_has_error(&["ok".into(), "panic: x".into()]));
        assert!(!tail_has_error(&["INFO ready".into()]));
        assert!(!tail_has_error(&[]));
    }
}

//! Monitor configuration — environment resolution and the service set.
//!
//! All knobs come from the environment, matching how the dev scripts launch
//! the monitor: `MIAU_LOG` points at the log file the dev stack appends to,
//! `WAILS_PID` carries the PID of the primary dev process, and
//! `MIAUMON_SERVICES` may point at a YAML or JSON file replacing the
//! built-in service set. A missing or malformed services file falls back to
//! the defaults silently — configuration trouble must never take the
//! monitor down.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default path of the monitored log file.
pub const DEFAULT_LOG_FILE: &str = "/tmp/miau-dev.log";
/// Where an extracted error block is written when the clipboard fails.
pub const ERROR_DUMP_FILE: &str = "/tmp/miau-last-error.txt";
/// How many log lines the dashboard tail shows.
pub const MAX_LOG_LINES: usize = 18;
/// Seconds between dashboard refreshes.
pub const REFRESH_SECS: u64 = 2;


// ---------------------------------------------------------------------------
// Service specs
// ---------------------------------------------------------------------------

/// How a monitored service is identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSource {
    /// A fixed PID, typically handed down via the environment. An empty
    /// string means "not tracked" and is reported as absent without ever
    /// querying the provider.
    Pid(String),
    /// A command-line pattern resolved to a PID on every poll.
    Pattern(String),
}

/// One entry in the fixed set of monitored services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Display name, e.g. "Go Backend".
    pub name: String,
    pub source: ServiceSource,
}


/// On-disk shape of a service entry. `pid` wins when both are given;
/// an entry with neither is skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSpecFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl ServiceSpecFile {
    fn into_spec(self) -> Option<ServiceSpec> {
        let source = match (self.pid, self.pattern) {
            (Some(pid), _) => ServiceSource::Pid(pid),
            (None, Some(pattern)) => ServiceSource::Pattern(pattern),
            (None, None) => return None,
        };
        Some(ServiceSpec {
            name: self.name,
            source,
        })
    }
}


// ---------------------------------------------------------------------------
// MonitorConfig
// ---------------------------------------------------------------------------

/// Resolved monitor configuration. Built once at startup; read-only after.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// The log file the dev stack appends to.
    pub log_path: PathBuf,
    /// Fallback destination for extracted error blocks.
    pub error_file: PathBuf,
    /// Database file, probed for existence and size only.
    pub db_path: PathBuf,
    /// Tail bound for the log panel.
    pub max_log_lines: usize,
    /// Fixed refresh interval.
    pub refresh_interval: Duration,
    /// The services shown in the dashboard table, in display order.
    pub services: Vec<ServiceSpec>,
}

impl MonitorConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::var("MIAU_LOG").ok(),
            std::env::var("WAILS_PID").ok(),
            std::env::var("MIAUMON_SERVICES").ok(),
            std::env::var("HOME").ok(),
        )
    }

    /// Pure resolution from already-read environment values.
    pub fn resolve(
        log: Option<String>,
        wails_pid: Option<String>,
        services_file: Option<String>,
        home: Option<String>,
    ) -> Self {
        let log_path = log
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let home = home.unwrap_or_else(|| "/tmp".into());
        let db_path = PathBuf::from(home)
            .join(".config")
            .join("miau")
            .join("data")
            .join("miau.db");

        let services = services_file
            .as_deref()
            .and_then(|p| load_services(Path::new(p)))
            .unwrap_or_else(|| default_services(wails_pid.unwrap_or_default()));

        MonitorConfig {
            log_path,
            error_file: PathBuf::from(ERROR_DUMP_FILE),
            db_path,
            max_log_lines: MAX_LOG_LINES,
            refresh_interval: Duration::from_secs(REFRESH_SECS),
            services,
        }
    }
}


/// The built-in service set of the miau dev stack.
pub fn default_services(wails_pid: String) -> Vec<ServiceSpec> {
    vec![
        ServiceSpec {
            name: "wails3 dev".into(),
            source: ServiceSource::Pid(wails_pid),
        },
        ServiceSpec {
            name: "Go Backend".into(),
            source: ServiceSource::Pattern("miau-desktop".into()),
        },
        ServiceSpec {
            name: "Vite (Svelte)".into(),
            source: ServiceSource::Pattern("vite".into()),
        },
    ]
}


/// Load a service set from a YAML or JSON file. Returns `None` — caller
/// falls back to the defaults — on any read or parse failure, and on a
/// file that yields no usable entries.
pub fn load_services(path: &Path) -> Option<Vec<ServiceSpec>> {
    let text = std::fs::read_to_string(path).ok()?;
    let entries: Vec<ServiceSpecFile> = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&text).ok()?
    } else {
        serde_yaml::from_str(&text).ok()?
    };
    let specs: Vec<ServiceSpec> = entries
        .into_iter()
        .filter_map(ServiceSpecFile::into_spec)
        .collect();
    if specs.is_empty() {
        None
    } else {
        Some(specs)
    }
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_defaults() {
        let cfg = MonitorConfig::resolve(None, None, None, None);
        assert_eq!(cfg.log_path, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(cfg.error_file, PathBuf::from(ERROR_DUMP_FILE));
        assert_eq!(cfg.max_log_lines, 18);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(2));
        assert!(cfg.db_path.starts_with("/tmp"));
        assert_eq!(cfg.services.len(), 3);
    }

    #[test]
    fn resolve_log_override() {
        let cfg = MonitorConfig::resolve(Some("/var/log/dev.log".into()), None, None, None);
        assert_eq!(cfg.log_path, PathBuf::from("/var/log/dev.log"));
    }

    #[test]
    fn empty_log_env_falls_back_to_default() {
        let cfg = MonitorConfig::resolve(Some(String::new()), None, None, None);
        assert_eq!(cfg.log_path, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn db_path_under_home() {
        let cfg = MonitorConfig::resolve(None, None, None, Some("/home/dev".into()));
        assert_eq!(
            cfg.db_path,
            PathBuf::from("/home/dev/.config/miau/data/miau.db")
        );
    }

    #[test]
    fn wails_pid_lands_in_first_service() {
        let cfg = MonitorConfig::resolve(None, Some("4242".into()), None, None);
        assert_eq!(cfg.services[0].source, ServiceSource::Pid("4242".into()));
    }

    #[test]
    fn missing_wails_pid_means_untracked() {
        let cfg = MonitorConfig::resolve(None, None, None, None);
        assert_eq!(cfg.services[0].source, ServiceSource::Pid(String::new()));
    }

    #[test]
    fn default_set_names_and_patterns() {
        let services = default_services("1".into());
        assert_eq!(services[1].name, "Go Backend");
        assert_eq!(
            services[1].source,
            ServiceSource::Pattern("miau-desktop".into())
        );
        assert_eq!(services[2].source, ServiceSource::Pattern("vite".into()));
    }

    #[test]
    fn load_services_yaml() {
        let dir = std::env::temp_dir().join("miaumon_cfg_yaml");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("services.yaml");
        std::fs::write(
            &path,
            "- name: backend\n  pattern: my-backend\n- name: frontend\n  pid: \"99\"\n",
        )
        .unwrap();
        let specs = load_services(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].source, ServiceSource::Pattern("my-backend".into()));
        assert_eq!(specs[1].source, ServiceSource::Pid("99".into()));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_services_json() {
        let dir = std::env::temp_dir().join("miaumon_cfg_json");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("services.json");
        std::fs::write(
            &path,
            r#"[{"name": "backend", "pattern": "my-backend"}]"#,
        )
        .unwrap();
        let specs = load_services(&path).unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "backend");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_services_missing_file_is_none() {
        assert!(load_services(Path::new("/nonexistent/services.yaml")).is_none());
    }

    #[test]
    fn load_services_malformed_is_none() {
        let dir = std::env::temp_dir().join("miaumon_cfg_bad");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("services.yaml");
        std::fs::write(&path, ": not valid yaml [").unwrap();
        assert!(load_services(&path).is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn entry_without_pid_or_pattern_is_skipped() {
        let entry = ServiceSpecFile {
            name: "ghost".into(),
            pid: None,
            pattern: None,
        };
        assert!(entry.into_spec().is_none());
    }

    #[test]
    fn pid_wins_over_pattern() {
        let entry = ServiceSpecFile {
            name: "both".into(),
            pid: Some("7".into()),
            pattern: Some("irrelevant".into()),
        };
        let spec = entry.into_spec().unwrap();
        assert_eq!(spec.source, ServiceSource::Pid("7".into()));
    }
}

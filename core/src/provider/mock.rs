//! Scripted stats provider for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::sample::{ProcessSample, SystemSample};

use super::StatsProvider;


/// Test double: returns pre-scripted samples and records every query.
pub struct MockProvider {
    samples: HashMap<String, ProcessSample>,
    pids: HashMap<String, String>,
    system: SystemSample,
    calls: RefCell<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        MockProvider {
            samples: HashMap::new(),
            pids: HashMap::new(),
            system: SystemSample::unknown(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Script a sample for a PID.
    pub fn with_sample(mut self, pid: &str, sample: ProcessSample) -> Self {
        self.samples.insert(pid.to_string(), sample);
        self
    }

    /// Script a pattern-to-PID resolution.
    pub fn with_pid(mut self, pattern: &str, pid: &str) -> Self {
        self.pids.insert(pattern.to_string(), pid.to_string());
        self
    }

    /// Script the system-wide sample.
    pub fn with_system(mut self, system: SystemSample) -> Self {
        self.system = system;
        self
    }

    /// Every query made so far, e.g. `"sample:42"` or `"find:vite"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsProvider for MockProvider {
    fn sample_by_pid(&self, pid: &str) -> Option<ProcessSample> {
        self.calls.borrow_mut().push(format!("sample:{}", pid));
        self.samples.get(pid).cloned()
    }

    fn find_pid(&self, pattern: &str) -> Option<String> {
        self.calls.borrow_mut().push(format!("find:{}", pattern));
        self.pids.get(pattern).cloned()
    }

    fn system_sample(&self) -> SystemSample {
        self.calls.borrow_mut().push("system".into());
        self.system
    }
}

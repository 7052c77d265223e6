//! Clipboard boundary — copy with a file-save fallback.
//!
//! The monitor never treats a clipboard failure as a fault: the dispatcher
//! falls back to writing the dump file and tells the operator where it
//! landed. Hence the trait returns a plain success flag, not an error.

use std::cell::RefCell;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};


/// Trait for the copy side effect.
pub trait Clipboard {
    /// Copy text to the system clipboard. `false` on any failure.
    fn copy(&self, text: &str) -> bool;
}


/// Production clipboard: pipes the text to `xclip -selection clipboard`.
pub struct XclipClipboard;

impl Clipboard for XclipClipboard {
    fn copy(&self, text: &str) -> bool {
        let child = Command::new("xclip")
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .stderr(Stdio::null())
            .spawn();
        let Ok(mut child) = child else {
            return false;
        };
        if let Some(stdin) = child.stdin.as_mut() {
            if stdin.write_all(text.as_bytes()).is_err() {
                let _ = child.kill();
                let _ = child.wait();
                return false;
            }
        }
        drop(child.stdin.take());
        match child.wait() {
            Ok(status) => status.success(),
            Err(_) => false,
        }
    }
}


/// In-memory clipboard for tests and headless runs: records what was
/// copied, and can be scripted to refuse.
pub struct MemoryClipboard {
    accept: bool,
    copied: RefCell<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        MemoryClipboard {
            accept: true,
            copied: RefCell::new(Vec::new()),
        }
    }

    /// A clipboard that refuses every copy.
    pub fn refusing() -> Self {
        MemoryClipboard {
            accept: false,
            copied: RefCell::new(Vec::new()),
        }
    }

    pub fn copied(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&self, text: &str) -> bool {
        if self.accept {
            self.copied.borrow_mut().push(text.to_string());
        }
        self.accept
    }
}


/// Write an extracted block to the dump file, replacing any previous one.
pub fn save_error_file(path: &Path, text: &str) -> std::io::Result<()> {
    std::fs::write(path, text)
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Shared helpers for unit tests (log capture)

use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use crate::primer::Engine;
use crate::log::{Logger, LogEntry, LogSeverity};

/// Logger that stores the entries logged by the installing thread
///
/// Unit tests run in parallel, so entries from other test threads are dropped.
pub struct CaptureLogger {
    owner: ThreadId,
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

/// Handle to the entries captured by an installed `CaptureLogger`
pub struct CaptureHandle {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CaptureLogger {
    /// Install a fresh capture logger as the global logger
    ///
    /// Callers must be `#[serial]` and call `Engine::reset_logger()` when done.
    pub fn install() -> CaptureHandle {
        let entries = Arc::new(Mutex::new(Vec::new()));
        Engine::set_logger(CaptureLogger { owner: thread::current().id(), entries: entries.clone() });
        CaptureHandle { entries }
    }
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        if thread::current().id() != self.owner {
            return;
        }
        self.entries.lock().unwrap().push(entry.clone());
    }
}

impl CaptureHandle {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn messages_with(&self, severity: LogSeverity) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.severity == severity)
            .map(|entry| entry.message)
            .collect()
    }
}

// ============================================================================
// Shader sources
// ============================================================================

pub const VERTEX_SOURCE: &str = "#version 330 core\n\
layout(location = 0) in vec4 position;\n\
void main()\n\
{\n\
    gl_Position = position;\n\
}\n";

pub const COLOR_FRAGMENT_SOURCE: &str = "#version 330 core\n\
layout(location = 0) out vec4 color;\n\
uniform vec4 u_Color;\n\
void main()\n\
{\n\
    color = u_Color;\n\
}\n";

/// Fragment shader missing a semicolon
pub const MALFORMED_FRAGMENT_SOURCE: &str = "#version 330 core\n\
layout(location = 0) out vec4 color;\n\
void main()\n\
{\n\
    color = vec4(1.0, 1.0, 0.0, 1.0)\n\
}\n";

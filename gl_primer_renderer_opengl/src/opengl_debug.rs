/// OpenGL debug output - driver messages routed to the engine logger
///
/// When the context exposes `glDebugMessageCallback` (GL 4.3 or KHR_debug),
/// every driver message is forwarded to the `engine_*` log with a severity
/// derived from the GL severity, and counted. Identical messages are grouped
/// so repeats are marked instead of flooding the log.

use std::ffi::{c_void, CStr};
use std::ptr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use colored::*;
use gl::types::{GLchar, GLenum, GLsizei, GLuint};
use gl_primer::primer::log::LogSeverity;
use gl_primer::primer::Engine;
use rustc_hash::FxHashMap;

const LOG_SOURCE: &str = "primer::opengl::debug";

/// Global debug statistics (atomic counters)
static DEBUG_STATS: DebugStatsTracker = DebugStatsTracker::new();

/// Occurrences per message text
static MESSAGE_TRACKER: Mutex<Option<FxHashMap<String, u32>>> = Mutex::new(None);

/// Counts of received driver messages per severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugStats {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
    pub notification: u32,
}

impl DebugStats {
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low + self.notification
    }
}

struct DebugStatsTracker {
    high: AtomicU32,
    medium: AtomicU32,
    low: AtomicU32,
    notification: AtomicU32,
}

impl DebugStatsTracker {
    const fn new() -> Self {
        Self {
            high: AtomicU32::new(0),
            medium: AtomicU32::new(0),
            low: AtomicU32::new(0),
            notification: AtomicU32::new(0),
        }
    }

    fn increment(&self, severity: GLenum) {
        let counter = match severity {
            gl::DEBUG_SEVERITY_HIGH => &self.high,
            gl::DEBUG_SEVERITY_MEDIUM => &self.medium,
            gl::DEBUG_SEVERITY_LOW => &self.low,
            _ => &self.notification,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get_stats(&self) -> DebugStats {
        DebugStats {
            high: self.high.load(Ordering::Relaxed),
            medium: self.medium.load(Ordering::Relaxed),
            low: self.low.load(Ordering::Relaxed),
            notification: self.notification.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.high.store(0, Ordering::Relaxed);
        self.medium.store(0, Ordering::Relaxed);
        self.low.store(0, Ordering::Relaxed);
        self.notification.store(0, Ordering::Relaxed);
    }
}

/// Install the debug callback on the current context
///
/// Returns false when the context has no debug output entry point.
pub fn enable_debug_output() -> bool {
    if !gl::DebugMessageCallback::is_loaded() {
        Engine::log(
            LogSeverity::Debug,
            LOG_SOURCE,
            "glDebugMessageCallback unavailable, driver messages disabled".to_string(),
        );
        return false;
    }

    DEBUG_STATS.reset();
    if let Ok(mut tracker) = MESSAGE_TRACKER.lock() {
        *tracker = Some(FxHashMap::default());
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        // Messages arrive on the thread issuing the faulty call
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), ptr::null());
    }
    Engine::log(LogSeverity::Debug, LOG_SOURCE, "Driver debug output enabled".to_string());
    true
}

/// Current debug statistics
pub fn get_debug_stats() -> DebugStats {
    DEBUG_STATS.get_stats()
}

/// Print debug statistics report
pub fn print_debug_stats_report() {
    let stats = get_debug_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No driver debug messages".green().bold());
        return;
    }

    println!("\n{}", "=== OpenGL Debug Output Report ===".bright_blue().bold());

    if stats.high > 0 {
        println!("  {} {}", "High:".red().bold(), stats.high);
    }
    if stats.medium > 0 {
        println!("  {} {}", "Medium:".yellow().bold(), stats.medium);
    }
    if stats.low > 0 {
        println!("  {} {}", "Low:".cyan(), stats.low);
    }
    if stats.notification > 0 {
        println!("  {} {}", "Notification:".bright_black(), stats.notification);
    }

    println!("  {} {}", "Total:".white().bold(), stats.total());

    if let Ok(tracker) = MESSAGE_TRACKER.lock() {
        if let Some(messages) = tracker.as_ref() {
            let repeated = messages.values().filter(|&&count| count > 1).count();
            if repeated > 0 {
                println!("\n  {} {} message(s) appeared multiple times", "ℹ".cyan(), repeated);
            }
        }
    }

    println!("{}\n", "==================================".bright_blue().bold());
}

/// Engine log severity for a GL debug severity
pub(crate) fn log_severity(severity: GLenum) -> LogSeverity {
    match severity {
        gl::DEBUG_SEVERITY_HIGH => LogSeverity::Error,
        gl::DEBUG_SEVERITY_MEDIUM => LogSeverity::Warn,
        gl::DEBUG_SEVERITY_LOW => LogSeverity::Info,
        _ => LogSeverity::Debug,
    }
}

pub(crate) fn source_name(source: GLenum) -> &'static str {
    match source {
        gl::DEBUG_SOURCE_API => "API",
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => "Window System",
        gl::DEBUG_SOURCE_SHADER_COMPILER => "Shader Compiler",
        gl::DEBUG_SOURCE_THIRD_PARTY => "Third Party",
        gl::DEBUG_SOURCE_APPLICATION => "Application",
        _ => "Other",
    }
}

pub(crate) fn type_name(message_type: GLenum) -> &'static str {
    match message_type {
        gl::DEBUG_TYPE_ERROR => "Error",
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined Behavior",
        gl::DEBUG_TYPE_PORTABILITY => "Portability",
        gl::DEBUG_TYPE_PERFORMANCE => "Performance",
        gl::DEBUG_TYPE_MARKER => "Marker",
        _ => "Other",
    }
}

/// Log line for one driver message
pub(crate) fn format_message(source: GLenum, message_type: GLenum, id: GLuint, text: &str, occurrences: u32) -> String {
    let repeat = if occurrences > 1 {
        format!(" [×{}]", occurrences)
    } else {
        String::new()
    };
    format!(
        "[{}/{}] #{}{}: {}",
        source_name(source),
        type_name(message_type),
        id,
        repeat,
        text.trim_end()
    )
}

fn track_message(text: &str) -> u32 {
    match MESSAGE_TRACKER.lock() {
        Ok(mut tracker) => {
            let messages = tracker.get_or_insert_with(FxHashMap::default);
            let count = messages.entry(text.to_string()).or_insert(0);
            *count += 1;
            *count
        }
        Err(_) => 1,
    }
}

/// GL debug message callback
///
/// Called by the driver on the context thread (synchronous output).
extern "system" fn gl_debug_callback(
    source: GLenum,
    message_type: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    if message.is_null() {
        return;
    }
    let text = unsafe {
        if length >= 0 {
            let bytes = std::slice::from_raw_parts(message as *const u8, length as usize);
            String::from_utf8_lossy(bytes).into_owned()
        } else {
            CStr::from_ptr(message).to_string_lossy().into_owned()
        }
    };

    DEBUG_STATS.increment(severity);
    let occurrences = track_message(&text);

    Engine::log(
        log_severity(severity),
        LOG_SOURCE,
        format_message(source, message_type, id, &text, occurrences),
    );
}

#[cfg(test)]
#[path = "opengl_debug_tests.rs"]
mod tests;

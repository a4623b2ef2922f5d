//! Tagged file logger
//!
//! Writes timestamped, tagged lines to a single append-only file and can
//! mirror them to the console:
//! - Tags: debug / info / success / error, plus raw `text`
//! - Optional `[sender]` label on decorated lines
//! - Per-tag suppression and console tee
//! - Single-slot memory of the last logged error
//!
//! ## Usage
//!
//! ```no_run
//! use microlog::logger::{self, LogTag, LoggerOptions};
//!
//! let _guard = logger::init("logs/app.log", LoggerOptions::new().tee(true).suppress(LogTag::Text))
//!     .expect("log file");
//!
//! logger::info("Server started", Some("http"));
//! logger::error("Connection refused", None);
//! logger::text("--- raw separator ---");
//! // `_guard` flushes pending lines when it goes out of scope
//! ```
//!
//! The functions here drive one process-wide `Logger` created on first use.
//! Embedders that prefer an explicit handle can construct `Logger` directly
//! and pass it around; the behavior is identical.
//!
//! Calls made before `init` are echoed to the console instead of being lost.
//! Write failures are reported on stderr and never reach the caller.
//!
//! Lines are appended by a background writer. The global logger lives in a
//! static that is never dropped, so `init` returns a `FlushGuard`: keep it
//! alive in `main` and everything logged is on disk before the process exits.

mod config;
mod console;
mod core;
mod file;
mod format;
mod message;
mod tags;

// Re-export public types
pub use self::core::{FlushGuard, Logger};
pub use config::{LoggerConfig, LoggerOptions};
pub use console::{Console, StdConsole};
pub use format::{compose_line, format_timestamp, now_timestamp, paint, LINE_ENDING};
pub use message::{LastError, Message};
pub use tags::LogTag;

use crate::errors::Result;
use once_cell::sync::Lazy;
use std::path::Path;

static GLOBAL: Lazy<Logger> = Lazy::new(Logger::new);

/// The process-wide logger behind the free functions
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// Attach the global logger to `path`
///
/// Only the first call with a non-empty path has any effect; later calls
/// return the same handle with the original path and options intact. The
/// parent directory and the file are created when missing; an existing file
/// is appended to, never truncated.
///
/// The returned guard derefs to the global `Logger` and flushes it on drop.
pub fn init(path: impl AsRef<Path>, options: LoggerOptions) -> Result<FlushGuard<'static>> {
    Ok(global().init(path, options)?.flush_guard())
}

/// Log at DEBUG
pub fn debug(message: impl Into<Message>, sender: Option<&str>) {
    global().debug(message, sender);
}

/// Log at INFO
pub fn info(message: impl Into<Message>, sender: Option<&str>) {
    global().info(message, sender);
}

/// Log at SUCCESS
pub fn success(message: impl Into<Message>, sender: Option<&str>) {
    global().success(message, sender);
}

/// Log at ERROR and remember the payload (see `get_last_error`)
pub fn error(message: impl Into<Message>, sender: Option<&str>) {
    global().error(message, sender);
}

/// Write a raw line, no decoration
pub fn text(message: &str) {
    global().text(message);
}

pub fn log_debug(message: impl Into<Message>, sender: Option<&str>) {
    debug(message, sender);
}

pub fn log_info(message: impl Into<Message>, sender: Option<&str>) {
    info(message, sender);
}

pub fn log_success(message: impl Into<Message>, sender: Option<&str>) {
    success(message, sender);
}

pub fn log_error(message: impl Into<Message>, sender: Option<&str>) {
    error(message, sender);
}

pub fn log_text(message: &str) {
    text(message);
}

/// Most recent `error` payload, `LastError::Unset` if there was none
pub fn get_last_error() -> LastError {
    global().get_last_error()
}

/// Overwrite the last-error slot (`LastError::Unset` clears it)
pub fn reset_last_error(value: LastError) {
    global().reset_last_error(value);
}

/// Block until all pending lines are written
///
/// Call this during shutdown to ensure all logs are on disk.
pub fn flush() {
    global().flush();
}

pub async fn flush_async() {
    global().flush_async().await;
}

/// Route `log::info!` and friends through the global logger
pub fn install_log_bridge(max_level: log::LevelFilter) -> std::result::Result<(), log::SetLoggerError> {
    log::set_logger(global())?;
    log::set_max_level(max_level);
    Ok(())
}

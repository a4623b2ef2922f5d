/// Core logging implementation
///
/// A `Logger` starts uninitialized. In that state every line is echoed to the
/// console so early messages are not lost. The first `init` with a non-empty
/// path installs the file sink and options; later calls change nothing.
///
/// Dispatch rules for one call:
/// 1. `error` records its payload as the last error (even when suppressed)
/// 2. Suppressed tags stop here: no file write, no echo
/// 3. Initialized: append to the file, echo too when `tee` is on
/// 4. Not initialized: echo only
use super::config::{LoggerConfig, LoggerOptions};
use super::console::{Console, StdConsole};
use super::file::{ensure_log_file, FileSink};
use super::format::{compose_line, now_timestamp, paint, LINE_ENDING};
use super::message::{LastError, Message};
use super::tags::LogTag;
use crate::errors::Result;
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::{Arc, Mutex};

struct Attached {
    config: LoggerConfig,
    sink: FileSink,
}

pub struct Logger {
    attached: OnceCell<Attached>,
    last_error: Mutex<LastError>,
    console: Arc<dyn Console>,
}

impl Logger {
    pub fn new() -> Self {
        Self::with_console(Arc::new(StdConsole))
    }

    /// Logger whose console echoes (and write-failure reports) go to `console`
    pub fn with_console(console: Arc<dyn Console>) -> Self {
        Self {
            attached: OnceCell::new(),
            last_error: Mutex::new(LastError::Unset),
            console,
        }
    }

    /// Attach the log file. First call with a non-empty path wins; an empty
    /// path is ignored and leaves the logger uninitialized.
    ///
    /// Returns `self` so setup and use can be chained.
    pub fn init(&self, path: impl AsRef<Path>, options: LoggerOptions) -> Result<&Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(self);
        }

        self.attached.get_or_try_init(|| {
            ensure_log_file(path)?;
            let sink = FileSink::open(path, self.console.clone())?;
            Ok::<_, crate::errors::LoggerError>(Attached {
                config: LoggerConfig {
                    log_path: path.to_path_buf(),
                    options,
                },
                sink,
            })
        })?;

        Ok(self)
    }

    pub fn is_initialized(&self) -> bool {
        self.attached.get().is_some()
    }

    /// Configuration installed by `init`, if any
    pub fn config(&self) -> Option<&LoggerConfig> {
        self.attached.get().map(|a| &a.config)
    }

    pub fn debug(&self, message: impl Into<Message>, sender: Option<&str>) {
        self.log_tagged(LogTag::Debug, message.into(), sender);
    }

    pub fn info(&self, message: impl Into<Message>, sender: Option<&str>) {
        self.log_tagged(LogTag::Info, message.into(), sender);
    }

    pub fn success(&self, message: impl Into<Message>, sender: Option<&str>) {
        self.log_tagged(LogTag::Success, message.into(), sender);
    }

    /// Log an error and remember the payload for `get_last_error`
    pub fn error(&self, message: impl Into<Message>, sender: Option<&str>) {
        let message = message.into();
        self.set_last_error(LastError::Recorded(message.clone()));
        self.log_tagged(LogTag::Error, message, sender);
    }

    /// Write `message` exactly as given, no timestamp, label or sender
    pub fn text(&self, message: &str) {
        self.log_tagged(LogTag::Text, Message::from(message), None);
    }

    pub fn get_last_error(&self) -> LastError {
        match self.last_error.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Overwrite the last-error slot; pass `LastError::Unset` to clear it
    pub fn reset_last_error(&self, value: LastError) {
        self.set_last_error(value);
    }

    /// Guard that flushes this logger when dropped. Keep it alive for the
    /// lifetime of `main` so queued lines are on disk before the process exits.
    pub fn flush_guard(&self) -> FlushGuard<'_> {
        FlushGuard { logger: self }
    }

    /// Block until every queued line is on disk. No-op before `init`.
    pub fn flush(&self) {
        if let Some(attached) = self.attached.get() {
            attached.sink.flush();
        }
    }

    /// Async variant of `flush` for callers inside a runtime
    pub async fn flush_async(&self) {
        if let Some(attached) = self.attached.get() {
            attached.sink.flush_async().await;
        }
    }

    /// Check if a tag is filtered out by the configured suppress set
    pub fn is_suppressed(&self, tag: LogTag) -> bool {
        self.config()
            .map(|c| c.options.is_suppressed(tag))
            .unwrap_or(false)
    }

    fn set_last_error(&self, value: LastError) {
        match self.last_error.lock() {
            Ok(mut slot) => *slot = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }

    fn log_tagged(&self, tag: LogTag, message: Message, sender: Option<&str>) {
        if self.is_suppressed(tag) {
            return;
        }
        let line = if tag.is_decorated() {
            compose_line(&now_timestamp(), tag, &message, sender)
        } else {
            message.render()
        };
        self.dispatch(tag, &line);
    }

    fn dispatch(&self, tag: LogTag, line: &str) {
        let echo = match self.attached.get() {
            Some(attached) => {
                attached.sink.write(format!("{}{}", line, LINE_ENDING));
                attached.config.options.tee
            }
            None => true,
        };

        if echo {
            let painted = paint(tag, line);
            if tag.is_error_stream() {
                self.console.err(&painted);
            } else {
                self.console.out(&painted);
            }
        }
    }
}

/// Flushes the logger on drop
///
/// Returned by `logger::init`. Dropping it right away (`let _ = ...`) flushes
/// immediately and gives no protection at exit; bind it to a named variable.
#[must_use = "queued lines are only guaranteed on disk when the guard is dropped at exit"]
pub struct FlushGuard<'a> {
    logger: &'a Logger,
}

impl<'a> FlushGuard<'a> {
    pub fn logger(&self) -> &'a Logger {
        self.logger
    }
}

impl std::ops::Deref for FlushGuard<'_> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        self.logger
    }
}

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        self.logger.flush();
    }
}

impl std::fmt::Debug for FlushGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlushGuard").field("logger", self.logger).finish()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config())
            .field("last_error", &self.get_last_error())
            .finish()
    }
}

/// Bridge for the `log` facade: records become tagged lines, the record
/// target is used as sender.
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !self.is_suppressed(LogTag::from(metadata.level()))
    }

    // Suppression is checked by the tagged calls themselves, so a suppressed
    // error record still lands in the last-error slot
    fn log(&self, record: &log::Record) {
        let message = record.args().to_string();
        let sender = Some(record.target());
        match LogTag::from(record.level()) {
            LogTag::Error => self.error(message, sender),
            LogTag::Info => self.info(message, sender),
            _ => self.debug(message, sender),
        }
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

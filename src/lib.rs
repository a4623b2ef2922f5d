//! Minimal tagged logger
//!
//! See [`logger`] for the API.

pub mod arguments;
pub mod errors;
pub mod logger;
pub mod paths;

pub use errors::{LoggerError, Result};
pub use logger::{FlushGuard, LastError, LogTag, Logger, LoggerOptions, Message};

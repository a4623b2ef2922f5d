/// Error types for logger setup
///
/// Only initialization and option parsing can fail. Per-line writes never
/// surface an error to the caller; failures are reported on the console.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to create log directory {path}: {source}")] CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create log file {path}: {source}")] CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open log file {path} for appending: {source}")] OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start log writer: {0}")] Writer(#[source] std::io::Error),

    #[error("Invalid logger options: {0}")] InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, LoggerError>;

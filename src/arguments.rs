/// Command-line arguments for the `microlog` binary
///
/// Appends one message to a log file, e.g.
/// `microlog --tag error --sender cron "backup failed"`.
use crate::logger::{LogTag, LoggerOptions};
use crate::paths;
use clap::Parser;
use std::path::PathBuf;

pub const APP_NAME: &str = "microlog";

#[derive(Parser, Debug)]
#[command(name = "microlog")]
#[command(about = "Append a tagged, timestamped line to a log file", long_about = None)]
pub struct Args {
    /// Log file (defaults to the platform data directory)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Tag: debug, info, success, error or text
    #[arg(short, long, default_value = "info", value_parser = parse_tag)]
    pub tag: LogTag,

    /// Sender label shown in brackets
    #[arg(short, long)]
    pub sender: Option<String>,

    /// Also print the line to the console
    #[arg(long)]
    pub tee: bool,

    /// Drop messages with this tag (repeatable)
    #[arg(long, value_parser = parse_tag)]
    pub suppress: Vec<LogTag>,

    /// Options file (.toml or .json) with `tee` / `suppress`; flags add to it
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Log the message this many times
    #[arg(long, default_value_t = 1)]
    pub repeat: usize,

    /// Treat the message as JSON
    #[arg(long)]
    pub json: bool,

    /// Message to log
    pub message: String,
}

fn parse_tag(value: &str) -> Result<LogTag, String> {
    LogTag::from_str(value).ok_or_else(|| {
        format!(
            "unknown tag '{}', expected one of: debug, info, success, error, text",
            value
        )
    })
}

impl Args {
    pub fn log_path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| paths::get_default_log_path(APP_NAME))
    }

    /// Merge the options file (if any) with the command-line flags
    pub fn logger_options(&self) -> crate::errors::Result<LoggerOptions> {
        let base = match &self.options {
            Some(path) => LoggerOptions::load(path)?,
            None => LoggerOptions::default(),
        };
        let tee = base.tee || self.tee;
        Ok(base.tee(tee).suppress_all(self.suppress.iter().copied()))
    }
}

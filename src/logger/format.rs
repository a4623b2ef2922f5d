//! Line composition and console coloring
//!
//! Handles:
//! - Fixed-width local timestamps
//! - Decorated lines: `<timestamp> <label> [<sender>] <message>`
//! - Tag-colored console echoes

use super::message::Message;
use super::tags::LogTag;
use chrono::{DateTime, Local, TimeZone};
use colored::*;

/// Line terminator appended to every file write
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Timestamp layout, every numeric field zero-padded
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an instant as `YYYY-MM-DD HH:MM:SS` in its own time zone
pub fn format_timestamp<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local time, formatted
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// Build the decorated line for a tag. The sender segment is dropped when the
/// sender is missing or empty.
pub fn compose_line(timestamp: &str, tag: LogTag, message: &Message, sender: Option<&str>) -> String {
    let sender_text = match sender {
        Some(s) if !s.is_empty() => format!("[{}] ", s),
        _ => String::new(),
    };

    format!(
        "{} {} {}{}",
        timestamp,
        tag.label(),
        sender_text,
        message.render()
    )
}

/// Wrap a line in the tag's color, ending with the reset code
pub fn paint(tag: LogTag, line: &str) -> String {
    line.color(tag.color()).to_string()
}

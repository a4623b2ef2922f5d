//! Message payloads and the last-error slot
//!
//! A log call accepts plain text, a JSON value or an error. Each variant has
//! its own rendering rule:
//! - `Text` is used as-is
//! - `Json` objects/arrays with a `message` key render that key's value,
//!   other objects/arrays pretty-print with 2-space indentation, scalars are
//!   string-coerced
//! - `Error` renders the error's display text

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Json(Value),
    Error(String),
}

impl Message {
    /// Capture an error by its display text
    pub fn from_error(err: &(dyn std::error::Error + '_)) -> Self {
        Message::Error(err.to_string())
    }

    /// Capture any serializable value as a JSON message. Values that fail to
    /// serialize are kept as their error text so the call still logs something.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Message::Json(v),
            Err(e) => Message::Error(e.to_string()),
        }
    }

    /// Text written after the timestamp/label/sender prefix
    pub fn render(&self) -> String {
        match self {
            Message::Text(s) => s.clone(),
            Message::Error(s) => s.clone(),
            Message::Json(value) => render_json(value),
        }
    }
}

fn render_json(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("message") {
            Some(inner) => coerce_scalar(inner),
            None => pretty(value),
        },
        Value::Array(_) => pretty(value),
        scalar => coerce_scalar(scalar),
    }
}

fn coerce_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    // serde_json's pretty printer indents with two spaces
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Message::Text(s.to_string())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Self {
        Message::Text(s)
    }
}

impl From<&String> for Message {
    fn from(s: &String) -> Self {
        Message::Text(s.clone())
    }
}

impl From<Value> for Message {
    fn from(v: Value) -> Self {
        Message::Json(v)
    }
}

macro_rules! message_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Message {
                fn from(v: $t) -> Self {
                    Message::Json(Value::from(v))
                }
            }
        )*
    };
}

message_from_scalar!(bool, i32, i64, u32, u64, f64);

impl From<anyhow::Error> for Message {
    fn from(err: anyhow::Error) -> Self {
        Message::Error(err.to_string())
    }
}

impl From<std::io::Error> for Message {
    fn from(err: std::io::Error) -> Self {
        Message::Error(err.to_string())
    }
}

/// Most recent payload passed to `error`, or whatever was last reset into it.
///
/// `Unset` and `Null` are distinct: `Unset` means nothing was ever recorded
/// (or the slot was cleared), `Null` is an explicit reset to "no error".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LastError {
    #[default]
    Unset,
    Null,
    Recorded(Message),
}

impl LastError {
    pub fn recorded(message: impl Into<Message>) -> Self {
        LastError::Recorded(message.into())
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, LastError::Unset)
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            LastError::Recorded(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Message> for LastError {
    fn from(message: Message) -> Self {
        LastError::Recorded(message)
    }
}

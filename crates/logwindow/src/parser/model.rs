use std::fmt;
use thiserror::Error;
use serde::{Serialize, Deserialize};
use chrono::NaiveDateTime;


/// Which of the two accepted line grammars produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineFormat {
    /// `TS - THREAD [LEVEL] Logger(123) [ctx] - message`
    WithLineNumber,
    /// `TS - THREAD [LEVEL] Logger [ctx] - message`
    WithoutLineNumber,
}

impl LineFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineFormat::WithLineNumber => "with_line_number",
            LineFormat::WithoutLineNumber => "without_line_number",
        }
    }
}

/// Severity of a record as written in the bracketed level segment.
///
/// Level words are matched case-sensitively. Anything outside the six
/// standard levels is kept verbatim in `Other` so the record still shows up
/// in the sequence (it just isn't counted in any tally bucket).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Other(String),
}

impl LogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
            LogLevel::Other(word) => word,
        }
    }

    /// ERROR or FATAL: the levels that get a context window.
    pub fn is_failure(&self) -> bool {
        matches!(self, LogLevel::Error | LogLevel::Fatal)
    }

    /// WARN, ERROR or FATAL: eligible for the time-bounded extension.
    pub fn is_severe(&self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error | LogLevel::Fatal)
    }
}

impl From<&str> for LogLevel {
    fn from(word: &str) -> Self {
        match word {
            "TRACE" => LogLevel::Trace,
            "DEBUG" => LogLevel::Debug,
            "INFO" => LogLevel::Info,
            "WARN" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            "FATAL" => LogLevel::Fatal,
            other => LogLevel::Other(other.to_string()),
        }
    }
}

impl From<String> for LogLevel {
    fn from(word: String) -> Self {
        LogLevel::from(word.as_str())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Other(word) => word,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assembled log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Millisecond-precision instant from the line prefix (no zone info in the source).
    /// `None` when the prefix has the right shape but names no real instant
    /// (month 13, Feb 30); such a record never falls inside a time window.
    #[serde(with = "super::serde_utils::millis")]
    pub timestamp: Option<NaiveDateTime>,

    /// Thread/worker id, digits only
    pub thread_id: String,

    pub level: LogLevel,

    /// Dotted logger name, trimmed
    pub logger: String,

    /// Source line of the logging call; `None` for the short grammar
    pub line_number: Option<u32>,

    /// Bracketed context tag (correlation id etc.), trimmed, may be empty
    pub context: String,

    /// Message body. Continuation lines are appended with `\n`.
    pub message: String,

    /// The original (trimmed) line this record was parsed from
    pub raw: String,

    /// Zero-based position in the assembled sequence. Set by the assembler;
    /// the classifier leaves it at 0.
    pub sequence_index: usize,
}

/// Outcome of classifying one non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// A structured record in one of the two grammars.
    Record(LogRecord),
    /// Free text (stack trace frame, wrapped message) to fold into the previous record.
    Continuation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Non-UTF8 content")]
    NonUtf8,
}

/// The two structured line grammars and the pieces they share

pub mod with_line;
pub mod without_line;

pub use with_line::WithLineNumberParser;
pub use without_line::WithoutLineNumberParser;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use crate::parser::traits::{LogLevel, LogRecord, ParseError};

/// Captured segments of a structured line, before type conversion.
pub(crate) struct RecordParts<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub millis: &'a str,
    pub thread_id: &'a str,
    pub level: &'a str,
    pub logger: &'a str,
    pub line_number: Option<u32>,
    pub context: &'a str,
    pub message: &'a str,
}

impl RecordParts<'_> {
    /// Build the record. A date/time that is not a real instant leaves
    /// `timestamp` as `None`; the line still becomes a record.
    pub fn into_record(self, raw: &str) -> LogRecord {
        LogRecord {
            timestamp: parse_timestamp(self.date, self.time, self.millis).ok(),
            thread_id: self.thread_id.to_string(),
            level: LogLevel::from(self.level),
            logger: self.logger.trim().to_string(),
            line_number: self.line_number,
            context: self.context.trim().to_string(),
            message: self.message.to_string(),
            raw: raw.to_string(),
            sequence_index: 0,
        }
    }
}

/// Parse the `YYYY-MM-DD`, `HH:MM:SS` and `mmm` groups of a line prefix.
pub(crate) fn parse_timestamp(date: &str, time: &str, millis: &str) -> Result<NaiveDateTime, ParseError> {
    let invalid = || ParseError::InvalidTimestamp(format!("{} {},{}", date, time, millis));

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())?;
    let clock = NaiveTime::parse_from_str(time, "%H:%M:%S").map_err(|_| invalid())?;
    let millis: u32 = millis.parse().map_err(|_| invalid())?;
    let clock = clock.with_nanosecond(millis * 1_000_000).ok_or_else(invalid)?;

    Ok(day.and_time(clock))
}

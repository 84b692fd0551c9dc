use std::sync::OnceLock;
use regex::Regex;

use crate::parser::traits::{LineFormat, LineParser, LogRecord, ParseError};
use super::RecordParts;

/// `2024-01-01 10:00:00,000 - 12 [ERROR] App.Orders.Service(88) [req-7] - message`
fn pattern() -> &'static Regex {
    static WITH_LINE_RE: OnceLock<Regex> = OnceLock::new();
    WITH_LINE_RE.get_or_init(|| {
        Regex::new(
            r"^([0-9]{4}-[0-9]{2}-[0-9]{2})\s+([0-9]{2}:[0-9]{2}:[0-9]{2}),([0-9]{3})\s+-\s+([0-9]+)\s+\[([A-Za-z0-9_]+)\s*\]\s+([^\\(]+)\(([0-9]+)\)\s+\[([^\]]*)\]\s+-\s+(.+)$",
        )
        .expect("valid with-line-number regex")
    })
}

/// Parser for the grammar carrying the source line number after the logger.
pub struct WithLineNumberParser;

impl LineParser for WithLineNumberParser {
    fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = pattern()
            .captures(line)
            .ok_or_else(|| ParseError::InvalidFormat("no logger(line) segment".into()))?;

        // digits only, so the sole failure is overflow
        let line_number = caps[7]
            .parse::<u32>()
            .map_err(|_| ParseError::InvalidFormat(format!("line number out of range: {}", &caps[7])))?;

        Ok(RecordParts {
            date: &caps[1],
            time: &caps[2],
            millis: &caps[3],
            thread_id: &caps[4],
            level: &caps[5],
            logger: &caps[6],
            line_number: Some(line_number),
            context: &caps[8],
            message: &caps[9],
        }
        .into_record(line))
    }

    fn format(&self) -> LineFormat {
        LineFormat::WithLineNumber
    }
}

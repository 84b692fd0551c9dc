use std::sync::OnceLock;
use regex::Regex;

use crate::parser::traits::{LineFormat, LineParser, LogRecord, ParseError};
use super::RecordParts;

/// `2024-01-01 10:00:00,000 - 12 [INFO ] App.Orders.Service [req-7] - message`
fn pattern() -> &'static Regex {
    static WITHOUT_LINE_RE: OnceLock<Regex> = OnceLock::new();
    WITHOUT_LINE_RE.get_or_init(|| {
        Regex::new(
            r"^([0-9]{4}-[0-9]{2}-[0-9]{2})\s+([0-9]{2}:[0-9]{2}:[0-9]{2}),([0-9]{3})\s+-\s+([0-9]+)\s+\[([A-Za-z0-9_]+)\s*\]\s+([^\\\[]+)\s+\[([^\]]*)\]\s+-\s+(.+)$",
        )
        .expect("valid without-line-number regex")
    })
}

/// Parser for the grammar with no source line number.
pub struct WithoutLineNumberParser;

impl LineParser for WithoutLineNumberParser {
    fn parse(&self, line: &str) -> Result<LogRecord, ParseError> {
        let caps = pattern()
            .captures(line)
            .ok_or_else(|| ParseError::InvalidFormat("not a log4net record line".into()))?;

        Ok(RecordParts {
            date: &caps[1],
            time: &caps[2],
            millis: &caps[3],
            thread_id: &caps[4],
            level: &caps[5],
            logger: &caps[6],
            line_number: None,
            context: &caps[7],
            message: &caps[8],
        }
        .into_record(line))
    }

    fn format(&self) -> LineFormat {
        LineFormat::WithoutLineNumber
    }
}

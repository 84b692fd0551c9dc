pub use super::model::{Classified, LineFormat, LogLevel, LogRecord, ParseError};

pub trait LineParser: Send + Sync {
    /// parse one trimmed line into a record (sequence index left at 0)
    fn parse(&self, line: &str) -> Result<LogRecord, ParseError>;
    fn format(&self) -> LineFormat;
}

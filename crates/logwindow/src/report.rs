//! Report — the single value handed back to callers.

use std::sync::Arc;
use serde::Serialize;

use crate::assemble::{Assembly, AssemblyStats};
use crate::parser::{LogLevel, LogRecord};
use crate::window::ContextWindow;

/// Severity counts for the dashboard.
///
/// `errors` is ERROR + FATAL. TRACE, DEBUG and unknown levels only count
/// toward `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
}

impl Tally {
    pub fn count(&mut self, level: &LogLevel) {
        self.total += 1;
        match level {
            LogLevel::Error | LogLevel::Fatal => self.errors += 1,
            LogLevel::Warn => self.warnings += 1,
            LogLevel::Info => self.info += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Every assembled record, in document order
    pub records: Vec<Arc<LogRecord>>,
    /// One window per ERROR/FATAL record, in document order
    pub windows: Vec<ContextWindow>,
    pub tally: Tally,
    pub stats: AssemblyStats,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a window by id (ids are dense, so this is an index).
    pub fn window(&self, id: usize) -> Option<&ContextWindow> {
        self.windows.get(id).filter(|w| w.id == id)
    }
}

/// Package the two passes' outputs.
pub fn aggregate(
    records: Vec<Arc<LogRecord>>,
    windows: Vec<ContextWindow>,
    assembly: &Assembly,
) -> ParseResult {
    ParseResult {
        records,
        windows,
        tally: assembly.tally,
        stats: assembly.stats,
    }
}

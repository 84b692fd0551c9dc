//! Window — per-failure context windows.
//!
//! For every ERROR/FATAL record a [`ContextWindow`] collects the records
//! before and after it that help explain the failure. Two rules decide
//! inclusion:
//!
//! - the *immediate band*: up to `line_window` records on either side
//!   (same thread only on the before side, any thread on the after side)
//! - the *severe extension*: WARN/ERROR/FATAL records on the same thread
//!   whose timestamps are within `time_window` of the failure
//!
//! Runs of skipped records between two included ones collapse into a single
//! [`WindowItem::Gap`].

pub mod builder;
pub mod gap;

use std::fmt;
use std::sync::Arc;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::parser::LogRecord;

pub use builder::{build_windows, ContextWindowBuilder};

/// Positional radius of the immediate band.
pub const DEFAULT_LINE_WINDOW: usize = 20;
/// Temporal radius of the severe extension.
pub const DEFAULT_TIME_WINDOW_SECS: u64 = 120;

/// Window radii. Defaults are ±20 records and ±2 minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub line_window: usize,
    pub time_window_secs: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            line_window: DEFAULT_LINE_WINDOW,
            time_window_secs: DEFAULT_TIME_WINDOW_SECS,
        }
    }
}

impl WindowConfig {
    pub fn time_window(&self) -> TimeDelta {
        // i64::MAX seconds would overflow TimeDelta; clamp to something absurd but valid
        TimeDelta::try_seconds(self.time_window_secs.min(i64::MAX as u64 / 1_000) as i64)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.line_window == 0 {
            return Err("window.line_window must be > 0".to_string());
        }
        if self.time_window_secs == 0 {
            return Err("window.time_window_secs must be > 0".to_string());
        }
        Ok(())
    }
}

/// Why a record made it into a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InclusionReason {
    /// Inside the positional band around the failure
    Immediate,
    /// WARN/ERROR/FATAL on the same thread, close in time
    Severe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowItem {
    Record {
        record: Arc<LogRecord>,
        reason: InclusionReason,
    },
    /// `count` consecutive records left out (never 0).
    Gap { count: usize },
}

impl WindowItem {
    pub fn record(&self) -> Option<&LogRecord> {
        match self {
            WindowItem::Record { record, .. } => Some(record.as_ref()),
            WindowItem::Gap { .. } => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, WindowItem::Gap { .. })
    }
}

impl fmt::Display for WindowItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowItem::Record { record, .. } => {
                write!(f, "[{}] {}", record.level, record.message)
            }
            WindowItem::Gap { count } => {
                let plural = if *count == 1 { "" } else { "s" };
                write!(f, "{} log line{} skipped", count, plural)
            }
        }
    }
}

/// Context around one ERROR/FATAL record. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    /// Position among the failures of this run, in document order
    pub id: usize,
    pub target: Arc<LogRecord>,
    /// Oldest first
    pub before: Vec<WindowItem>,
    /// Oldest first
    pub after: Vec<WindowItem>,
}

impl ContextWindow {
    pub fn shown_before(&self) -> usize {
        shown(&self.before)
    }

    pub fn shown_after(&self) -> usize {
        shown(&self.after)
    }

    pub fn skipped_before(&self) -> usize {
        skipped(&self.before)
    }

    pub fn skipped_after(&self) -> usize {
        skipped(&self.after)
    }
}

fn shown(items: &[WindowItem]) -> usize {
    items.iter().filter(|item| !item.is_gap()).count()
}

fn skipped(items: &[WindowItem]) -> usize {
    items
        .iter()
        .map(|item| match item {
            WindowItem::Gap { count } => *count,
            WindowItem::Record { .. } => 0,
        })
        .sum()
}

// Module structure for logwindow: log4net-style log parsing with
// per-failure context windows.

// Core pipeline (pure, no I/O)
pub mod parser;
pub mod assemble;
pub mod window;
pub mod report;
pub mod pipeline;

// Host
pub mod conf;
pub mod error;
pub mod runtime;

pub use pipeline::{analyze, analyze_bytes, analyze_with};
pub use report::{ParseResult, Tally};
pub use window::{ContextWindow, InclusionReason, WindowConfig, WindowItem};
pub use parser::{LogLevel, LogRecord};

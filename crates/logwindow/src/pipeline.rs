//! Pipeline — text in, [`ParseResult`] out.
//!
//! Two passes: assemble the complete record sequence, then build every
//! window against it, so a window's after side sees records parsed later.
//! Pure and synchronous; safe to call concurrently on independent inputs.

use std::sync::Arc;

use crate::assemble::assemble;
use crate::parser::{LogRecord, ParseError};
use crate::report::{aggregate, ParseResult};
use crate::window::{build_windows, WindowConfig};

/// Analyze with the default ±20 records / ±2 minutes windows.
pub fn analyze(content: &str) -> ParseResult {
    analyze_with(content, &WindowConfig::default())
}

pub fn analyze_with(content: &str, config: &WindowConfig) -> ParseResult {
    let mut assembly = assemble(content);

    let records: Vec<Arc<LogRecord>> = std::mem::take(&mut assembly.records)
        .into_iter()
        .map(Arc::new)
        .collect();

    let windows = build_windows(&records, config);

    tracing::debug!(
        records = records.len(),
        windows = windows.len(),
        errors = assembly.tally.errors,
        warnings = assembly.tally.warnings,
        "log analysis complete"
    );

    aggregate(records, windows, &assembly)
}

/// Like [`analyze_with`], for raw bytes. Fails only if they aren't UTF-8.
pub fn analyze_bytes(raw: &[u8], config: &WindowConfig) -> Result<ParseResult, ParseError> {
    let content = std::str::from_utf8(raw).map_err(|_| ParseError::NonUtf8)?;
    Ok(analyze_with(content, config))
}

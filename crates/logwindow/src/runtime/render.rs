//! Render — turn a ParseResult into text or JSON for stdout.

use std::fmt::{self, Write};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::AppResult;
use crate::parser::LogRecord;
use crate::report::ParseResult;
use crate::window::{ContextWindow, WindowItem};

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    result: &'a ParseResult,
}

pub fn render_json(file: &str, result: &ParseResult) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&FileReport { file, result })?)
}

/// Dashboard counts, then every failure with its before/after context.
pub fn render_text(file: &str, result: &ParseResult) -> AppResult<String> {
    let mut out = String::new();
    write_report(&mut out, file, result)?;
    Ok(out)
}

fn write_report(out: &mut impl Write, file: &str, result: &ParseResult) -> fmt::Result {
    let t = &result.tally;

    writeln!(out, "== {} ==", file)?;
    writeln!(
        out,
        "Total: {}  Errors: {}  Warnings: {}  Info: {}",
        t.total, t.errors, t.warnings, t.info
    )?;

    if result.windows.is_empty() {
        return writeln!(out, "No errors found.");
    }

    for window in &result.windows {
        writeln!(out)?;
        write_window(out, window)?;
    }

    Ok(())
}

fn write_window(out: &mut impl Write, window: &ContextWindow) -> fmt::Result {
    let target = &window.target;
    let line = target
        .line_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string());

    writeln!(out, "#{} {} {}", window.id, target.level, stamp(target.timestamp))?;
    write_message(out, "    ", &target.message)?;
    writeln!(
        out,
        "    Logger: {} (Line: {}) | Thread: {}",
        target.logger, line, target.thread_id
    )?;

    if !window.before.is_empty() {
        writeln!(out, "  Before error ({} logs shown)", window.shown_before())?;
        write_items(out, &window.before)?;
    }
    if !window.after.is_empty() {
        writeln!(out, "  After error ({} logs shown)", window.shown_after())?;
        write_items(out, &window.after)?;
    }

    Ok(())
}

fn write_items(out: &mut impl Write, items: &[WindowItem]) -> fmt::Result {
    for item in items {
        match item {
            WindowItem::Gap { .. } => writeln!(out, "    ··· {} ···", item)?,
            WindowItem::Record { record, .. } => write_record(out, record)?,
        }
    }
    Ok(())
}

fn write_record(out: &mut impl Write, record: &LogRecord) -> fmt::Result {
    write!(out, "    {} [{}] ", stamp(record.timestamp), record.level)?;

    let mut lines = record.message.split('\n');
    if let Some(first) = lines.next() {
        writeln!(out, "{}", first)?;
    }
    for rest in lines {
        writeln!(out, "        {}", rest)?;
    }
    Ok(())
}

fn write_message(out: &mut impl Write, indent: &str, message: &str) -> fmt::Result {
    for line in message.split('\n') {
        writeln!(out, "{}{}", indent, line)?;
    }
    Ok(())
}

// "-" for records whose prefix named no real instant
fn stamp(ts: Option<NaiveDateTime>) -> String {
    ts.map(|ts| ts.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

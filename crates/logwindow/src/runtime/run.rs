//! Run — acquire each file, analyze it off the async runtime, print the report.

use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::conf::{AnalyzerConfig, OutputFormat};
use crate::error::{AppError, AppResult};
use crate::pipeline::analyze_bytes;
use crate::report::ParseResult;
use crate::window::WindowConfig;
use super::boot::Cli;
use super::render::{render_json, render_text};

/// Analyze every file named on the command line. Files are independent:
/// they're read and analyzed concurrently, reported in argument order, and
/// one failing doesn't stop the rest.
///
/// Returns the number of files that could not be analyzed.
pub async fn run(cli: Cli, config: AnalyzerConfig) -> AppResult<usize> {
    let handles: Vec<_> = cli
        .files
        .iter()
        .cloned()
        .map(|path| {
            let window = config.window.clone();
            tokio::spawn(analyze_file(path, window))
        })
        .collect();

    let mut failures = 0;
    for (path, handle) in cli.files.iter().zip(handles) {
        match handle.await? {
            Ok(result) => {
                let report = render(path, &result, config.output)?;
                println!("{}", report);
            }
            Err(e) => {
                error!("{}", e);
                failures += 1;
            }
        }
    }

    Ok(failures)
}

/// Read one file and analyze it on a blocking thread.
pub async fn analyze_file(path: PathBuf, window: WindowConfig) -> AppResult<ParseResult> {
    let name = path.display().to_string();

    let raw = tokio::fs::read(&path).await.map_err(|source| AppError::Io {
        path: name.clone(),
        source,
    })?;

    let result = tokio::task::spawn_blocking(move || analyze_bytes(&raw, &window))
        .await?
        .map_err(|_| AppError::Decode { path: name.clone() })?;

    info!(
        file = %name,
        records = result.tally.total,
        errors = result.tally.errors,
        warnings = result.tally.warnings,
        "analyzed log file"
    );

    Ok(result)
}

fn render(path: &Path, result: &ParseResult, output: OutputFormat) -> AppResult<String> {
    let name = path.display().to_string();
    match output {
        OutputFormat::Text => render_text(&name, result),
        OutputFormat::Json => render_json(&name, result),
    }
}

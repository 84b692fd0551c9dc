//! Boot — logging init, CLI parsing, config load.

use std::path::PathBuf;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::{AnalyzerConfig, OutputFormat};
use crate::error::AppResult;

/// Find ERROR/FATAL entries in log4net text logs and show what led up to them.
#[derive(Debug, Clone, Parser)]
#[command(name = "logwindow", version)]
pub struct Cli {
    /// Log files to analyze (each one independently)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output format: text or json
    #[arg(long)]
    pub output: Option<OutputFormat>,

    /// Records to include on each side of a failure
    #[arg(long)]
    pub line_window: Option<usize>,

    /// Seconds around a failure in which WARN/ERROR/FATAL records are pulled in
    #[arg(long)]
    pub time_window_secs: Option<u64>,
}

impl Cli {
    /// Flags win over environment and file config.
    pub fn apply(&self, config: &mut AnalyzerConfig) {
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(lines) = self.line_window {
            config.window.line_window = lines;
        }
        if let Some(secs) = self.time_window_secs {
            config.window.time_window_secs = secs;
        }
    }
}

/// Initialise the tracing / logging subsystem. Logs go to stderr so stdout
/// stays clean for reports.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logwindow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Parse arguments and load config (flags > env > file > defaults).
///
/// Returns `(Cli, AnalyzerConfig)` on success.
pub fn boot() -> AppResult<(Cli, AnalyzerConfig)> {
    let cli = Cli::parse();

    let mut config = AnalyzerConfig::load()?;
    cli.apply(&mut config);

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    debug!(
        line_window = config.window.line_window,
        time_window_secs = config.window.time_window_secs,
        output = %config.output,
        files = cli.files.len(),
        "configuration loaded"
    );

    Ok((cli, config))
}

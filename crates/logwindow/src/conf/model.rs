//! Model — AnalyzerConfig and related structs.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::window::WindowConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub window: WindowConfig,
    pub output: OutputFormat,
}

/// How the host prints each result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Tally dashboard plus each error with its context
    #[default]
    Text,
    /// The full result as JSON
    Json,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            output: OutputFormat::Text,
        }
    }
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

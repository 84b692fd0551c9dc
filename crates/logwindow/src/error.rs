use thiserror::Error;

/// Failures of the host around the analysis: reading files, decoding
/// them, loading config, writing output. Analysis itself cannot fail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8 text")]
    Decode { path: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Text output error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Analysis task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// Convenience type alias
pub type AppResult<T> = Result<T, AppError>;

// Error types shared by the panel library.
// - Visualizer failures come from producers and propagate unchanged through the panel.
// - Panel errors cover activation preconditions the host can hit from stale input.
// - Config and document errors wrap file, YAML and JSON failures for the binary to report.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualizerError {
    #[error("Invalid payload for {kind}: {reason}")]
    InvalidPayload { kind: &'static str, reason: String },

    #[error("Render failed: {0}")]
    Render(String),
}

impl VisualizerError {
    pub fn invalid_payload(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            kind,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Panel has not been shown yet")]
    NotShown,

    #[error("Panel has no tabs to activate")]
    NotTabbed,

    #[error("No tab at index {index} (panel has {count})")]
    NoSuchTab { index: usize, count: usize },

    #[error("Visualizer error: {0}")]
    Visualizer(#[from] VisualizerError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

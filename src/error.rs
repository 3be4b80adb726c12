use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a run. Malformed issue data never ends up here; it
/// degrades to defaults during transformation instead.
#[derive(Debug, Error)]
pub enum PrdError {
    #[error("--max-results must be between 1 and 100 (got {0})")]
    InvalidPageSize(u32),

    #[error("unsupported Jira API version {0} (expected 2 or 3)")]
    InvalidApiVersion(u8),

    #[error("request timeout must be at least 1 second")]
    InvalidTimeout,

    #[error("missing Jira {name}: pass {flag} or set it in the [jira] section of the config file")]
    MissingSetting {
        name: &'static str,
        flag: &'static str,
    },

    #[error("Jira API request failed")]
    Request(#[source] reqwest::Error),

    #[error("Jira returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse Jira search response")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to write PRD to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

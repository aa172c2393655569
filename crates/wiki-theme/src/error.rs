//! Configuration and rendering errors.
//!
//! Theme switching itself never fails; these errors come from loading
//! configuration files and rendering markup.

use std::path::PathBuf;

/// Errors returned by configuration loading and markup rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported configuration format '{0}', expected .yml, .yaml or .json")]
    UnsupportedFormat(String),

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

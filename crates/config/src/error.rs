//! Configuration and catalog errors

use std::path::PathBuf;

use solar_agent_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cost tier {size_kw} kW: {reason}")]
    InvalidTier { size_kw: f64, reason: String },

    #[error("{0} catalog is empty")]
    Empty(&'static str),
}

use crate::manifest::ParseError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SrcManifestError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to load manifest from {path}: {reason}")]
    ManifestLoad { path: PathBuf, reason: String },

    #[error("Failed to write manifest to {path}: {reason}")]
    ManifestSave { path: PathBuf, reason: String },

    #[error("Manifest {path} is not in canonical form")]
    ManifestNotCanonical { path: PathBuf },

    #[error("Failed to load fetch plan from {path}: {reason}")]
    PlanLoad { path: PathBuf, reason: String },

    #[error("Failed to save fetch plan to {path}: {reason}")]
    PlanSave { path: PathBuf, reason: String },

    #[error("Fetch plan validation failed: {details}")]
    PlanValidation { details: String },

    #[error("{missing} of {total} planned files are missing from {input_dir}")]
    MissingInputs {
        input_dir: PathBuf,
        missing: usize,
        total: usize,
    },

    #[error("Failed to hash manifest file {path}: {reason}")]
    ManifestFileHash { path: PathBuf, reason: String },

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Why a single input row was left out of the output.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("empty prompt")]
    EmptyPrompt,

    #[error("empty completion")]
    EmptyCompletion,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("malformed record: {0}")]
    Malformed(#[from] csv::Error),

    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

//! Error types for natded

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProverError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProverError>;

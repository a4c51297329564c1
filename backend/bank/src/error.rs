use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Dataset has no '{0}' column")]
    MissingColumn(&'static str),

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] io::Error),
}

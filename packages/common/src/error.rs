use std::path::PathBuf;
use thiserror::Error;

/// Common error type for loading token sources from disk
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CommonError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CommonError::Read {
            path: path.into(),
            source,
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("The output filename is blank. Please enter a filename")]
    EmptyName,

    #[error("Invalid export job: {0}")]
    InvalidJob(String),

    #[error("Failed to copy {} to {}: {reason}", src.display(), dest.display())]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Failed to zip {}: {reason}", path.display())]
    ZipFailed { path: PathBuf, reason: String },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Host data error: {0}")]
    HostData(String),

    #[error("Export worker thread panicked")]
    WorkerPanicked,
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Settings(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

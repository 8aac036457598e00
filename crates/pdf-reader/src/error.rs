use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReaderError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot open PDF: {0}")]
    OpenError(String),

    #[error("Page {page} out of range (1-{total})")]
    OutOfRange { page: i64, total: u16 },

    #[error("Invalid page number: {0}")]
    InvalidPageInput(String),

    #[error("Render failed: {0}")]
    RenderError(String),

    #[error("No document open")]
    NoDocument,

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ReaderError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReaderError>;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("the file '{}' does not exist or is not a file", .0.display())]
    DocumentNotFound(PathBuf),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("document processing error: {0}")]
    DocumentProcessing(String),
    #[error("language model error: {0}")]
    LanguageModel(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

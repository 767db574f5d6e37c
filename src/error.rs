use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid maximum dimensions: {0}x{1}. Both must be greater than zero")]
    InvalidDimensions(u32, u32),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Unknown category: {0}. Expected photography or painting")]
    InvalidCategory(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(PathBuf),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Metadata serialization error: {0}")]
    Metadata(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

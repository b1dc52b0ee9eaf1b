use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the image resizer
#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("Target size must be greater than 0, got: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Source image is empty")]
    EmptyImage,

    #[error("{} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the asset path updater
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Project directory {} does not exist", .0.display())]
    MissingProjectDir(PathBuf),

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

use thiserror::Error;

use crate::capture::CaptureError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("You must be logged in to upload shirts")]
    NotAuthenticated,
    #[error("Please provide a name for your shirt")]
    MissingName,
    #[error("Please provide an image for your shirt")]
    MissingImage,
    #[error("Shirt not found")]
    NotFound,
    #[error("Failed to upload image: {0:#}")]
    Upload(anyhow::Error),
    #[error("Failed to save shirt: {0:#}")]
    Write(anyhow::Error),
    #[error("Failed to load shirts: {0:#}")]
    Read(anyhow::Error),
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

use thiserror::Error;

/// The record cannot produce a document. Only `name` is required.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("resume record is missing required field '{field}'")]
pub struct MalformedRecordError {
    pub field: &'static str,
}

/// The profile picture was dropped; the rest of the document is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImagePlacementWarning {
    #[error("profile image could not be decoded: {0}")]
    Undecodable(String),

    #[error("profile image format is not supported (expected PNG or JPEG)")]
    UnsupportedFormat,

    #[error("profile image has unusable dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecordError),

    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),
}

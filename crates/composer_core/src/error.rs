use std::path::PathBuf;

use shared::{
    domain::AttachmentId,
    error::{ErrorCode, ErrorReport},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("failed to read bytes for attachment {id}: {source}")]
    Read {
        id: AttachmentId,
        source: std::io::Error,
    },
    #[error("failed to decode image for attachment {id}: {reason}")]
    Decode { id: AttachmentId, reason: String },
    #[error("thumbnail worker for attachment {id} stopped before finishing")]
    WorkerStopped { id: AttachmentId },
}

impl From<&ThumbnailError> for ErrorReport {
    fn from(value: &ThumbnailError) -> Self {
        let code = match value {
            ThumbnailError::Read { .. } => ErrorCode::Io,
            ThumbnailError::Decode { .. } => ErrorCode::Decode,
            ThumbnailError::WorkerStopped { .. } => ErrorCode::Internal,
        };
        ErrorReport::new(code, value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to create preference directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write preference file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

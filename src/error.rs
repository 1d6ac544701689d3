use crate::media::MediaKind;
use thiserror::Error;

/// Failures talking to the document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("document store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },
}

/// Failures talking to the media service
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("upload failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider message, passed through verbatim
    #[error("upload failed: {message}")]
    Rejected { kind: MediaKind, message: String },
}

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("stored document {id} is malformed: {reason}")]
    Decode { id: String, reason: String },
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::Store(StoreError::NotFound { .. }))
    }
}

/// Errors surfaced by the admin and inquiry forms
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// A required field was left empty; no repository call was made
    #[error("{0} is required")]
    Validation(&'static str),

    #[error("no edit in progress")]
    NotEditing,

    #[error("a save is already in progress")]
    AlreadySubmitting,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

use std::sync::Arc;
use thiserror::Error;

use crate::propagate::ElementSetError;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog {catalog_id}: unexpected status {status}")]
    Status { catalog_id: u32, status: u16 },
    #[error("TLE directory not found: {0}")]
    DirectoryNotFound(String),
    #[error("TLE file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no element set for catalog {0}")]
    NotFound(u32),
    #[error("requested catalog {expected}, received {found}")]
    Mismatch { expected: u32, found: u64 },
    #[error("malformed element set: {0}")]
    Malformed(#[from] ElementSetError),
    #[error("element set source unavailable: {0}")]
    SourceUnavailable(Arc<RetrievalError>),
    #[error("retrieval task failed: {0}")]
    Task(String),
}

use thiserror::Error;

/// Failures scoped to a single tracked object.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("invalid element set: {0}")]
    InvalidElementSet(String),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("unknown object: {0}")]
    UnknownObject(u32),
    #[error("no element set for object {0}")]
    NotActive(u32),
}

impl From<sgp4::Error> for TrackError {
    fn from(err: sgp4::Error) -> Self {
        TrackError::Propagation(err.to_string())
    }
}

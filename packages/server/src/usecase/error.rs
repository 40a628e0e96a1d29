//! UseCase error types.

use thiserror::Error;

use crate::domain::{CanvasError, InvalidUpdate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacePixelError {
    /// Malformed update: dropped, the connection stays open.
    #[error("invalid pixel update: {0}")]
    InvalidUpdate(#[from] InvalidUpdate),

    /// The identity exhausted its token bucket. The caller terminates the
    /// connection; the update is not applied or broadcast.
    #[error("rate limit exceeded for '{0}'")]
    RateLimitExceeded(String),

    /// The canvas rejected an update that already passed validation — a bug
    /// in the validation path, not client input. Logged and dropped.
    #[error("canvas rejected a validated update: {0}")]
    Internal(#[from] CanvasError),
}

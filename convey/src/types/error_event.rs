//! The event dispatched through error observers.

use std::sync::Arc;

use crate::types::update::Update;

/// A pipeline failure paired with the update that triggered it.
///
/// Cheap to clone: both halves are shared, so every error handler down the
/// router tree sees the same underlying error instance.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    /// The update being processed when the error occurred, if any.
    pub update: Option<Arc<Update>>,
    /// The error itself.
    pub error: Arc<dyn std::error::Error + Send + Sync>,
}

impl ErrorEvent {
    /// Pairs `error` with the update it interrupted.
    pub fn new(
        update: Option<Arc<Update>>,
        error: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self { update, error: Arc::from(error) }
    }
}

//! Error types shared across the dispatch pipeline.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the event pipeline, tagged with the stage that failed.
#[derive(Error, Debug)]
pub enum EventError {
    /// A filter returned an error instead of a verdict.
    #[error("filter error: {0}")]
    Filter(#[source] BoxError),

    /// A handler failed.
    #[error("handler error: {0}")]
    Handler(#[source] BoxError),

    /// A middleware failed outside of handler execution.
    #[error("middleware error: {0}")]
    Middleware(#[source] BoxError),
}

//! Error types for the client and the dispatcher.
//!
//! Client failures split three ways: the server answered with a
//! classified API error ([`ApiError`]), the HTTP layer failed before an
//! answer arrived ([`ClientError::Network`]), or the answer could not be
//! decoded ([`ClientError::Decode`]). Status classification happens in
//! [`crate::client::session`].

use std::sync::Arc;

use thiserror::Error;

/// Failure of a single API call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The response body could not be parsed.
    #[error("decode error: {message}")]
    Decode {
        /// What went wrong.
        message: String,
        /// The offending payload.
        data: String,
    },

    /// The request never produced a response.
    #[error("HTTP Client says - {message}")]
    Network {
        /// Name of the API method being called.
        method: &'static str,
        /// Transport-level failure description.
        message: String,
    },

    /// The server answered with an error status.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// A classified error answer from the API server.
#[derive(Error, Debug)]
#[error("Server says - {message}")]
pub struct ApiError {
    /// Name of the API method being called.
    pub method: &'static str,
    /// Error text extracted from the response.
    pub message: String,
    /// Status classification.
    pub kind: ApiErrorKind,
}

/// Status-code classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400
    BadRequest,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 413
    EntityTooLarge,
    /// 422
    UnprocessableEntity,
    /// Any 5xx whose message mentions a server restart.
    RestartingServer,
    /// Any other 5xx.
    ServerError,
    /// Anything else outside the success range.
    Other,
}

/// The update payload matched none of the known event categories.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("update does not contain any known event type")]
pub struct UpdateTypeLookup;

/// Wrapper re-raising an event-pipeline error that no error handler
/// claimed.
///
/// The original error is shared with the [`ErrorEvent`] that travelled
/// through the error observers, hence the `Arc`.
///
/// [`ErrorEvent`]: crate::types::ErrorEvent
#[derive(Debug, Clone)]
pub struct PropagatedError(pub Arc<dyn std::error::Error + Send + Sync>);

impl std::fmt::Display for PropagatedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unhandled event error: {}", self.0)
    }
}

impl std::error::Error for PropagatedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

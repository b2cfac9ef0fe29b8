//! Handlers are the terminal business logic of the pipeline.
//!
//! A handler receives the event (by reference) and an owned [`Context`]
//! snapshot, and reports back a [`Propagation`] verdict. The observer's
//! trigger loop interprets the verdict: `Handled` stops the search and
//! carries an optional payload up to the caller, `Skip` hands the event to
//! the next candidate handler, `Rejected` and `Unhandled` let routing
//! continue elsewhere.

use std::any::Any;
use std::future::Future;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::BoxError;

/// A type-erased payload returned by a handler.
///
/// Most handlers return nothing ([`HandlerResponse::empty`]); the ones that
/// do answer wrap an arbitrary `Send` value that the pipeline owner knows how
/// to [`downcast`](HandlerResponse::downcast).
pub struct HandlerResponse(Option<Box<dyn Any + Send>>);

impl HandlerResponse {
    /// A response carrying no payload.
    pub fn empty() -> Self {
        Self(None)
    }

    /// A response carrying `value`.
    pub fn new<T: Any + Send>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// Whether the response carries no payload.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Attempts to extract the payload as `T`, handing the response back
    /// unchanged on mismatch.
    pub fn downcast<T: Any + Send>(self) -> Result<T, HandlerResponse> {
        match self.0 {
            Some(boxed) => match boxed.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(boxed) => Err(HandlerResponse(Some(boxed))),
            },
            None => Err(HandlerResponse(None)),
        }
    }
}

impl std::fmt::Debug for HandlerResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(_) => f.write_str("HandlerResponse(..)"),
            None => f.write_str("HandlerResponse(empty)"),
        }
    }
}

/// A handler's verdict on an event.
#[derive(Debug)]
pub enum Propagation {
    /// The event was consumed; stop searching.
    Handled(HandlerResponse),
    /// This handler passes; try the next registered handler.
    Skip,
    /// A filter (or the handler itself) rejected the event.
    Rejected,
    /// Nobody claimed the event.
    Unhandled,
}

impl Propagation {
    /// A `Handled` verdict carrying `value` as the payload.
    pub fn handled<T: Any + Send>(value: T) -> Self {
        Propagation::Handled(HandlerResponse::new(value))
    }

    /// A `Handled` verdict with no payload.
    pub fn finish() -> Self {
        Propagation::Handled(HandlerResponse::empty())
    }

    /// Whether routing should keep looking for a handler elsewhere.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Propagation::Unhandled | Propagation::Rejected)
    }
}

/// Outcome of running a handler (or a middleware chain around one).
pub type HandlerResult = Result<Propagation, BoxError>;

/// The terminal endpoint of the dispatch pipeline.
#[async_trait]
pub trait Handler<E>: Send + Sync {
    /// Executes the handler logic.
    async fn handle(&self, event: &E, ctx: Context) -> HandlerResult;
}

/// Adapter turning an async closure into a [`Handler`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<E, F, Fut> Handler<E> for FnHandler<F>
where
    E: Clone + Send + Sync + 'static,
    F: Fn(E, Context) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    async fn handle(&self, event: &E, ctx: Context) -> HandlerResult {
        (self.0)(event.clone(), ctx).await
    }
}

/// Wraps an async closure as a [`Handler`].
pub fn handler_fn<E, F, Fut>(f: F) -> FnHandler<F>
where
    E: Clone + Send + Sync + 'static,
    F: Fn(E, Context) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    FnHandler(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_roundtrip() {
        let resp = HandlerResponse::new(7usize);
        assert_eq!(resp.downcast::<usize>().unwrap(), 7);

        let resp = HandlerResponse::new("text");
        let back = resp.downcast::<usize>().unwrap_err();
        assert!(!back.is_empty());
        assert_eq!(back.downcast::<&str>().unwrap(), "text");
    }

    #[tokio::test]
    async fn closure_handler() {
        let h = handler_fn(|n: u32, _ctx| async move {
            if n == 0 {
                Ok(Propagation::Skip)
            } else {
                Ok(Propagation::handled(n * 2))
            }
        });
        let ctx = Context::new();
        match h.handle(&21, ctx.clone()).await.unwrap() {
            Propagation::Handled(resp) => assert_eq!(resp.downcast::<u32>().unwrap(), 42),
            other => panic!("expected Handled, got {other:?}"),
        }
        assert!(matches!(h.handle(&0, ctx).await.unwrap(), Propagation::Skip));
    }
}

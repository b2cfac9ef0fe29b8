//! Filters gate handler execution.
//!
//! A filter inspects the event and the current [`Context`] and returns a
//! [`FilterResult`]. Filters attached to one handler are evaluated in
//! registration order and short-circuit on the first rejection. A filter can
//! piggyback data onto acceptance with [`FilterResult::AcceptWith`]; the
//! patch becomes visible to every filter and the handler that run after it.

use std::future::Future;

use async_trait::async_trait;

use crate::context::{Context, ContextData};
use crate::error::BoxError;

/// Verdict of a single filter check.
#[derive(Debug, Default)]
pub enum FilterResult {
    /// The filter did not match; skip this handler.
    #[default]
    Reject,
    /// The filter matched.
    Accept,
    /// The filter matched and injects extra context entries.
    AcceptWith(ContextData),
}

impl FilterResult {
    /// Whether this verdict lets the event pass.
    pub fn is_accept(&self) -> bool {
        !matches!(self, FilterResult::Reject)
    }
}

impl From<bool> for FilterResult {
    fn from(value: bool) -> Self {
        if value { FilterResult::Accept } else { FilterResult::Reject }
    }
}

/// A predicate over an event and its context.
#[async_trait]
pub trait Filter<E>: Send + Sync {
    /// Evaluates the filter against `event`.
    ///
    /// The context is read-only here; injection happens through the returned
    /// [`FilterResult::AcceptWith`] patch so that a rejected chain leaves no
    /// trace behind.
    async fn check(&self, event: &E, ctx: &Context) -> Result<FilterResult, BoxError>;
}

/// Adapter turning an async closure into a [`Filter`].
pub struct FnFilter<F>(F);

#[async_trait]
impl<E, F, Fut, R> Filter<E> for FnFilter<F>
where
    E: Clone + Send + Sync + 'static,
    F: Fn(E, Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, BoxError>> + Send,
    R: Into<FilterResult>,
{
    async fn check(&self, event: &E, ctx: &Context) -> Result<FilterResult, BoxError> {
        (self.0)(event.clone(), ctx.clone()).await.map(Into::into)
    }
}

/// Wraps an async closure as a [`Filter`].
///
/// The closure receives a clone of the event and of the context, and may
/// return anything convertible into [`FilterResult`] (including plain `bool`).
pub fn filter_fn<E, F, Fut, R>(f: F) -> FnFilter<F>
where
    E: Clone + Send + Sync + 'static,
    F: Fn(E, Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<R, BoxError>> + Send,
    R: Into<FilterResult>,
{
    FnFilter(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bool_coercion() {
        let accept = filter_fn(|n: u32, _ctx| async move { Ok::<_, BoxError>(n > 10) });
        let ctx = Context::new();
        assert!(accept.check(&11, &ctx).await.unwrap().is_accept());
        assert!(!accept.check(&3, &ctx).await.unwrap().is_accept());
    }
}

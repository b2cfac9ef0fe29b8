//! Event observers: the per-category registration and trigger machinery.
//!
//! An [`EventObserver`] owns an ordered list of handler entries (handler +
//! its filter chain), observer-wide root filters, and two middleware chains.
//! [`SimpleObserver`] is the payload-less variant used for lifecycle
//! notifications.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::BoxError;
use crate::filter::{Filter, FilterResult};
use crate::handler::{Handler, HandlerResult, Propagation};
use crate::middleware::{Middleware, MiddlewareManager, Next, Terminal};

/// A registered handler together with its personal filter chain.
pub struct HandlerEntry<E> {
    handler: Arc<dyn Handler<E>>,
    filters: Vec<Arc<dyn Filter<E>>>,
}

impl<E: Send + Sync> HandlerEntry<E> {
    /// Wraps `handler` with an empty filter chain.
    pub fn new<H: Handler<E> + 'static>(handler: H) -> Self {
        Self { handler: Arc::new(handler), filters: Vec::new() }
    }

    /// Appends a filter to this entry's chain.
    pub fn filter<F: Filter<E> + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Evaluates the filter chain in order.
    ///
    /// Returns the context the handler should run with when every filter
    /// accepts (the incoming context plus all injected patches), or `None`
    /// on the first rejection. Injections from a chain that later rejects
    /// never leak: they live in the trial context returned here only on
    /// full acceptance.
    pub async fn check(&self, event: &E, ctx: &Context) -> Result<Option<Context>, BoxError> {
        let mut trial = ctx.clone();
        for filter in &self.filters {
            match filter.check(event, &trial).await? {
                FilterResult::Reject => return Ok(None),
                FilterResult::Accept => {}
                FilterResult::AcceptWith(patch) => trial.merge(patch),
            }
        }
        Ok(Some(trial))
    }

    /// The wrapped handler.
    pub fn handler(&self) -> &Arc<dyn Handler<E>> {
        &self.handler
    }
}

/// Runs one handler as the innermost stage of a middleware chain.
struct HandlerTerminal<'h, E>(&'h dyn Handler<E>);

#[async_trait]
impl<E: Send + Sync> Terminal<E> for HandlerTerminal<'_, E> {
    async fn call(&self, event: &E, ctx: Context) -> HandlerResult {
        self.0.handle(event, ctx).await
    }
}

/// Registration point and trigger loop for one event category.
pub struct EventObserver<E> {
    event_name: &'static str,
    handlers: Vec<HandlerEntry<E>>,
    root_filters: Vec<Arc<dyn Filter<E>>>,
    /// Middleware wrapping each individual handler attempt.
    pub inner_middleware: MiddlewareManager<E>,
    /// Middleware wrapping the whole observer trigger, run once per event.
    pub outer_middleware: MiddlewareManager<E>,
}

impl<E: Send + Sync> EventObserver<E> {
    /// Creates an empty observer labelled `event_name` (used in logs).
    pub fn new(event_name: &'static str) -> Self {
        Self {
            event_name,
            handlers: Vec::new(),
            root_filters: Vec::new(),
            inner_middleware: MiddlewareManager::new(),
            outer_middleware: MiddlewareManager::new(),
        }
    }

    /// The category label this observer was created with.
    pub fn event_name(&self) -> &'static str {
        self.event_name
    }

    /// Registers a handler; returns the entry so filters can be chained on.
    pub fn register<H: Handler<E> + 'static>(&mut self, handler: H) -> &mut HandlerEntry<E> {
        self.handlers.push(HandlerEntry::new(handler));
        self.handlers.last_mut().expect("handlers is non-empty after push")
    }

    /// Adds an observer-wide filter applied before any handler is tried.
    pub fn filter<F: Filter<E> + 'static>(&mut self, filter: F) -> &mut Self {
        self.root_filters.push(Arc::new(filter));
        self
    }

    /// Whether any handler is registered.
    pub fn has_handlers(&self) -> bool {
        !self.handlers.is_empty()
    }

    /// Evaluates root filters, merging injections into `ctx`.
    ///
    /// Returns `false` on the first rejection; `ctx` keeps whatever earlier
    /// root filters injected, matching the all-handlers-share-root-data rule.
    pub async fn check_root_filters(
        &self,
        event: &E,
        ctx: &mut Context,
    ) -> Result<bool, BoxError> {
        for filter in &self.root_filters {
            match filter.check(event, ctx).await? {
                FilterResult::Reject => return Ok(false),
                FilterResult::Accept => {}
                FilterResult::AcceptWith(patch) => ctx.merge(patch),
            }
        }
        Ok(true)
    }

    /// Tries registered handlers in order, first match wins.
    ///
    /// `chain` is the complete inner middleware chain to wrap each handler
    /// attempt with (callers prepend inherited middleware to this observer's
    /// own [`inner_middleware`](Self::inner_middleware)). A handler whose
    /// filters reject is skipped silently; a handler returning
    /// [`Propagation::Skip`] defers to the next candidate; any other verdict
    /// (or error) ends the loop.
    pub async fn trigger(
        &self,
        event: &E,
        ctx: &Context,
        chain: &[Arc<dyn Middleware<E>>],
    ) -> HandlerResult {
        for entry in &self.handlers {
            let Some(handler_ctx) = entry.check(event, ctx).await? else {
                continue;
            };
            let terminal = HandlerTerminal(entry.handler.as_ref());
            let next = Next::new(chain, &terminal);
            match next.run(event, handler_ctx).await? {
                Propagation::Skip => continue,
                verdict => return Ok(verdict),
            }
        }
        Ok(Propagation::Unhandled)
    }
}

/// A parameter-less notification callback (startup/shutdown).
#[async_trait]
pub trait LifecycleHandler: Send + Sync {
    /// Runs the callback.
    async fn call(&self, ctx: &Context) -> Result<(), BoxError>;
}

/// Adapter turning an async closure into a [`LifecycleHandler`].
pub struct FnLifecycle<F>(F);

#[async_trait]
impl<F, Fut> LifecycleHandler for FnLifecycle<F>
where
    F: Fn(Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    async fn call(&self, ctx: &Context) -> Result<(), BoxError> {
        (self.0)(ctx.clone()).await
    }
}

/// Wraps an async closure as a [`LifecycleHandler`].
pub fn lifecycle_fn<F, Fut>(f: F) -> FnLifecycle<F>
where
    F: Fn(Context) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), BoxError>> + Send,
{
    FnLifecycle(f)
}

/// Observer for lifecycle notifications: every callback runs, in order, and
/// the first error aborts the sequence.
#[derive(Default)]
pub struct SimpleObserver {
    handlers: Vec<Arc<dyn LifecycleHandler>>,
}

impl SimpleObserver {
    /// Creates an empty observer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback.
    pub fn register<H: LifecycleHandler + 'static>(&mut self, handler: H) {
        self.handlers.push(Arc::new(handler));
    }

    /// Runs every callback in registration order.
    pub async fn trigger(&self, ctx: &Context) -> Result<(), BoxError> {
        for handler in &self.handlers {
            handler.call(ctx).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextData;
    use crate::filter::filter_fn;
    use crate::handler::handler_fn;

    fn inject(key: &'static str, value: u32) -> FilterResult {
        let mut patch = ContextData::new();
        patch.insert(key.into(), Arc::new(value));
        FilterResult::AcceptWith(patch)
    }

    #[tokio::test]
    async fn first_accepting_handler_wins() {
        let mut observer = EventObserver::<u32>::new("test");
        observer
            .register(handler_fn(|_: u32, _| async { Ok(Propagation::handled("first")) }))
            .filter(filter_fn(|n: u32, _| async move { Ok::<_, BoxError>(n > 100) }));
        observer.register(handler_fn(|_: u32, _| async { Ok(Propagation::handled("second")) }));

        let ctx = Context::new();
        match observer.trigger(&5, &ctx, &[]).await.unwrap() {
            Propagation::Handled(resp) => {
                assert_eq!(resp.downcast::<&str>().unwrap(), "second")
            }
            other => panic!("expected Handled, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn skip_moves_to_next_handler() {
        let mut observer = EventObserver::<u32>::new("test");
        observer.register(handler_fn(|_: u32, _| async { Ok(Propagation::Skip) }));
        observer.register(handler_fn(|_: u32, _| async { Ok(Propagation::finish()) }));

        let ctx = Context::new();
        assert!(matches!(
            observer.trigger(&1, &ctx, &[]).await.unwrap(),
            Propagation::Handled(_)
        ));
    }

    #[tokio::test]
    async fn exhaustion_reports_unhandled() {
        let mut observer = EventObserver::<u32>::new("test");
        observer
            .register(handler_fn(|_: u32, _| async { Ok(Propagation::finish()) }))
            .filter(filter_fn(|_: u32, _| async { Ok::<_, BoxError>(false) }));

        let ctx = Context::new();
        assert!(observer.trigger(&1, &ctx, &[]).await.unwrap().is_unhandled());
    }

    #[tokio::test]
    async fn filter_injection_reaches_later_filters_and_handler() {
        let mut observer = EventObserver::<u32>::new("test");
        observer
            .register(handler_fn(|_: u32, ctx: Context| async move {
                let seen = *ctx.get::<u32>("foo").ok_or("foo missing in handler")?;
                Ok(Propagation::handled(seen))
            }))
            .filter(filter_fn(|_: u32, _| async { Ok::<_, BoxError>(inject("foo", 1)) }))
            .filter(filter_fn(|_: u32, ctx: Context| async move {
                Ok::<_, BoxError>(ctx.get::<u32>("foo") == Some(&1))
            }));

        let ctx = Context::new();
        match observer.trigger(&1, &ctx, &[]).await.unwrap() {
            Propagation::Handled(resp) => assert_eq!(resp.downcast::<u32>().unwrap(), 1),
            other => panic!("expected Handled, got {other:?}"),
        }
        // the shared context was never mutated
        assert!(ctx.is_empty());
    }

    #[tokio::test]
    async fn rejected_chain_leaks_nothing_to_next_entry() {
        let mut observer = EventObserver::<u32>::new("test");
        observer
            .register(handler_fn(|_: u32, _| async { Ok(Propagation::finish()) }))
            .filter(filter_fn(|_: u32, _| async { Ok::<_, BoxError>(inject("poison", 9)) }))
            .filter(filter_fn(|_: u32, _| async { Ok::<_, BoxError>(false) }));
        observer.register(handler_fn(|_: u32, ctx: Context| async move {
            assert!(ctx.get::<u32>("poison").is_none(), "injection leaked across entries");
            Ok(Propagation::finish())
        }));

        let ctx = Context::new();
        assert!(matches!(
            observer.trigger(&1, &ctx, &[]).await.unwrap(),
            Propagation::Handled(_)
        ));
    }

    #[tokio::test]
    async fn root_filter_injection_is_shared() {
        let mut observer = EventObserver::<u32>::new("test");
        observer.filter(filter_fn(|_: u32, _| async { Ok::<_, BoxError>(inject("root", 3)) }));

        let mut ctx = Context::new();
        assert!(observer.check_root_filters(&1, &mut ctx).await.unwrap());
        assert_eq!(ctx.get::<u32>("root"), Some(&3));
    }

    #[tokio::test]
    async fn lifecycle_runs_in_order() {
        use std::sync::Mutex;
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut observer = SimpleObserver::new();
        for tag in ["a", "b", "c"] {
            let log = Arc::clone(&log);
            observer.register(lifecycle_fn(move |_| {
                let log = Arc::clone(&log);
                async move {
                    log.lock().unwrap().push(tag);
                    Ok(())
                }
            }));
        }
        observer.trigger(&Context::new()).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }
}

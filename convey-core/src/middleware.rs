//! Middleware wraps handler execution.
//!
//! A [`Middleware`] receives the event, the context, and a [`Next`]
//! continuation. Calling `next.run(..)` hands control to the remainder of
//! the chain and, ultimately, to the [`Terminal`] at its end; skipping the
//! call short-circuits the pipeline with whatever the middleware returns.
//! Registration order is wrap order: the first registered middleware is the
//! outermost.

use std::sync::Arc;

use async_trait::async_trait;

use crate::context::Context;
use crate::handler::HandlerResult;

/// A single link in a middleware chain.
#[async_trait]
pub trait Middleware<E>: Send + Sync {
    /// Processes `event`, optionally delegating to the rest of the chain.
    async fn handle(&self, event: &E, ctx: Context, next: Next<'_, E>) -> HandlerResult;
}

/// The innermost stage of a middleware chain.
#[async_trait]
pub trait Terminal<E>: Send + Sync {
    /// Runs the wrapped logic.
    async fn call(&self, event: &E, ctx: Context) -> HandlerResult;
}

/// Continuation handed to each middleware.
///
/// Borrows the not-yet-run tail of the chain plus the terminal; consuming it
/// with [`run`](Next::run) enforces at most one delegation per middleware.
pub struct Next<'a, E> {
    chain: &'a [Arc<dyn Middleware<E>>],
    terminal: &'a (dyn Terminal<E> + 'a),
}

impl<'a, E: Send + Sync> Next<'a, E> {
    /// Builds a continuation over `chain` ending at `terminal`.
    pub fn new(chain: &'a [Arc<dyn Middleware<E>>], terminal: &'a (dyn Terminal<E> + 'a)) -> Self {
        Self { chain, terminal }
    }

    /// Runs the remaining middleware and then the terminal.
    pub async fn run(self, event: &E, ctx: Context) -> HandlerResult {
        match self.chain.split_first() {
            Some((head, tail)) => {
                let next = Next { chain: tail, terminal: self.terminal };
                head.handle(event, ctx, next).await
            }
            None => self.terminal.call(event, ctx).await,
        }
    }
}

/// Ordered collection of middleware for one observer.
pub struct MiddlewareManager<E> {
    items: Vec<Arc<dyn Middleware<E>>>,
}

impl<E> Default for MiddlewareManager<E> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E> MiddlewareManager<E> {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware; it wraps everything registered after it.
    pub fn register<M: Middleware<E> + 'static>(&mut self, middleware: M) {
        self.items.push(Arc::new(middleware));
    }

    /// Appends an already-shared middleware.
    pub fn register_arc(&mut self, middleware: Arc<dyn Middleware<E>>) {
        self.items.push(middleware);
    }

    /// The registered chain, outermost first.
    pub fn as_slice(&self) -> &[Arc<dyn Middleware<E>>] {
        &self.items
    }

    /// Iterates the chain, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Middleware<E>>> {
        self.items.iter()
    }

    /// Number of registered middleware.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Propagation;
    use std::sync::Mutex;

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Middleware<u32> for Recorder {
        async fn handle(&self, event: &u32, ctx: Context, next: Next<'_, u32>) -> HandlerResult {
            self.log.lock().unwrap().push(format!("{}-pre", self.tag));
            let result = next.run(event, ctx).await;
            self.log.lock().unwrap().push(format!("{}-post", self.tag));
            result
        }
    }

    struct Finish(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl Terminal<u32> for Finish {
        async fn call(&self, _event: &u32, _ctx: Context) -> HandlerResult {
            self.0.lock().unwrap().push("terminal".into());
            Ok(Propagation::finish())
        }
    }

    #[tokio::test]
    async fn registration_order_is_wrap_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = MiddlewareManager::new();
        manager.register(Recorder { tag: "outer", log: Arc::clone(&log) });
        manager.register(Recorder { tag: "inner", log: Arc::clone(&log) });

        let terminal = Finish(Arc::clone(&log));
        let next = Next::new(manager.as_slice(), &terminal);
        let result = next.run(&1, Context::new()).await.unwrap();
        assert!(matches!(result, Propagation::Handled(_)));

        let log = log.lock().unwrap();
        assert_eq!(
            *log,
            vec!["outer-pre", "inner-pre", "terminal", "inner-post", "outer-post"]
        );
    }

    struct ShortCircuit;

    #[async_trait]
    impl Middleware<u32> for ShortCircuit {
        async fn handle(&self, _event: &u32, _ctx: Context, _next: Next<'_, u32>) -> HandlerResult {
            Ok(Propagation::Unhandled)
        }
    }

    #[tokio::test]
    async fn dropping_next_short_circuits() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = MiddlewareManager::<u32>::new();
        manager.register(ShortCircuit);

        let terminal = Finish(Arc::clone(&log));
        let next = Next::new(manager.as_slice(), &terminal);
        let result = next.run(&1, Context::new()).await.unwrap();
        assert!(result.is_unhandled());
        assert!(log.lock().unwrap().is_empty(), "terminal must not run");
    }
}

//! The root of the dispatch tree.
//!
//! [`Dispatcher`] owns the root [`Router`] (and derefs to it, so handlers
//! register on the dispatcher directly), the update-level outer middleware
//! chain, and the FSM wiring. [`feed_update`](Dispatcher::feed_update) is
//! the single entry point: webhook servers decode a payload and feed it
//! here.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use convey_core::{
    BoxError, Context, HandlerResult, Middleware, MiddlewareManager, Next, Propagation,
    Terminal, lifecycle_fn,
};

use crate::client::Bot;
use crate::dispatcher::router::Router;
use crate::dispatcher::user_context::{BOT, EVENT_UPDATE, UserContextMiddleware};
use crate::errors::{ClientError, PropagatedError};
use crate::fsm::{DisabledIsolation, EventIsolation, FsmMiddleware, MemoryStorage, Storage};
use crate::methods::ReplyMethod;
use crate::types::{ErrorEvent, Update};

/// The update-level registration point: outer middleware wrapping the
/// whole dispatch of every raw [`Update`].
#[derive(Default)]
pub struct UpdateObserver {
    /// Middleware run around classification and routing, once per update.
    pub outer_middleware: MiddlewareManager<Update>,
}

/// Root of the dispatch tree.
pub struct Dispatcher {
    router: Router,
    /// The update-level observer.
    pub update: UpdateObserver,
    fsm: Arc<FsmMiddleware>,
    workflow_data: Context,
}

impl Deref for Dispatcher {
    type Target = Router;

    fn deref(&self) -> &Router {
        &self.router
    }
}

impl DerefMut for Dispatcher {
    fn deref_mut(&mut self) -> &mut Router {
        &mut self.router
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// A dispatcher with in-memory storage and no event isolation.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// The FSM wiring (storage access, explicit context construction).
    pub fn fsm(&self) -> &FsmMiddleware {
        &self.fsm
    }

    /// Data seeded into the context of every dispatched update.
    pub fn workflow_data_mut(&mut self) -> &mut Context {
        &mut self.workflow_data
    }

    /// Dispatches one decoded update.
    ///
    /// Returns the propagation verdict on a clean run. A pipeline error is
    /// first offered to the error observers; if they claim it their verdict
    /// is returned, otherwise the error is re-raised wrapped in
    /// [`PropagatedError`].
    pub async fn feed_update(
        &self,
        bot: Arc<Bot>,
        update: Update,
    ) -> Result<Propagation, BoxError> {
        let started = Instant::now();
        let update = Arc::new(update);

        let mut ctx = self.workflow_data.clone();
        ctx.insert_arc(BOT, Arc::clone(&bot) as _);
        ctx.insert_arc(EVENT_UPDATE, Arc::clone(&update) as _);
        let error_ctx = ctx.clone();

        let terminal = ListenUpdate { dispatcher: self };
        let next = Next::new(self.update.outer_middleware.as_slice(), &terminal);
        match next.run(update.as_ref(), ctx).await {
            Ok(verdict) => {
                tracing::info!(
                    event_type = %update.event_type,
                    handled = matches!(verdict, Propagation::Handled(_)),
                    duration_ms = started.elapsed().as_millis() as u64,
                    "update processed"
                );
                Ok(verdict)
            }
            Err(error) => {
                tracing::error!(
                    event_type = %update.event_type,
                    error = %error,
                    "update processing failed"
                );
                let event = ErrorEvent::new(Some(Arc::clone(&update)), error);
                match self.router.propagate_error(&event, &error_ctx, &[]).await? {
                    verdict @ Propagation::Handled(_) => Ok(verdict),
                    _ => Err(Box::new(PropagatedError(event.error))),
                }
            }
        }
    }

    /// Decodes a raw JSON payload and dispatches it.
    pub async fn feed_raw_update(
        &self,
        bot: Arc<Bot>,
        update: serde_json::Value,
    ) -> Result<Propagation, BoxError> {
        let update: Update = serde_json::from_value(update)?;
        self.feed_update(bot, update).await
    }

    /// Runs startup callbacks over the whole tree.
    pub async fn emit_startup(&self) -> Result<(), BoxError> {
        self.router.emit_startup(&self.workflow_data).await
    }

    /// Runs shutdown callbacks over the whole tree.
    pub async fn emit_shutdown(&self) -> Result<(), BoxError> {
        self.router.emit_shutdown(&self.workflow_data).await
    }
}

/// Terminal of the update-level chain: classifies the update and hands it
/// to the router tree.
struct ListenUpdate<'d> {
    dispatcher: &'d Dispatcher,
}

#[async_trait]
impl Terminal<Update> for ListenUpdate<'_> {
    async fn call(&self, update: &Update, ctx: Context) -> HandlerResult {
        let (update_type, event) = match update.event() {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::warn!(
                    event_type = %update.event_type,
                    "dropping update: {err}"
                );
                return Ok(Propagation::Skip);
            }
        };
        self.dispatcher.router.propagate_event(update_type, &event, &ctx, &[]).await
    }
}

/// Fires a handler's reply, swallowing everything except decode failures.
///
/// API and network errors here mean the answer could not be delivered;
/// that is logged and dropped so the webhook loop keeps running. A decode
/// error is a local bug and propagates.
pub async fn silent_call_request(bot: &Bot, reply: ReplyMethod) -> Result<(), ClientError> {
    let name = reply.name();
    match reply.send(bot).await {
        Ok(()) => Ok(()),
        Err(err @ ClientError::Decode { .. }) => Err(err),
        Err(err) => {
            tracing::error!(method = name, error = %err, "failed to respond via webhook");
            Ok(())
        }
    }
}

/// Configures storage, isolation, and seed data for a [`Dispatcher`].
pub struct DispatcherBuilder {
    storage: Arc<dyn Storage>,
    isolation: Arc<dyn EventIsolation>,
    name: String,
    workflow_data: Context,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self {
            storage: Arc::new(MemoryStorage::new()),
            isolation: Arc::new(DisabledIsolation),
            name: "dispatcher".to_owned(),
            workflow_data: Context::new(),
        }
    }
}

impl DispatcherBuilder {
    /// Uses `storage` for FSM state.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    /// Uses `isolation` to serialize same-conversation events.
    pub fn isolation(mut self, isolation: Arc<dyn EventIsolation>) -> Self {
        self.isolation = isolation;
        self
    }

    /// Names the root router.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Seeds a value into the context of every dispatched update.
    pub fn data<T: std::any::Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.workflow_data.insert(key, value);
        self
    }

    /// Builds the dispatcher: user-context extraction first, then FSM
    /// lock-and-load, on the update-level outer chain; FSM teardown is
    /// registered on shutdown.
    pub fn build(self) -> Dispatcher {
        let fsm = Arc::new(FsmMiddleware::new(self.storage, self.isolation));

        let mut update = UpdateObserver::default();
        update.outer_middleware.register(UserContextMiddleware);
        update.outer_middleware.register_arc(Arc::clone(&fsm) as Arc<dyn Middleware<Update>>);

        let mut router = Router::new(self.name);
        let fsm_for_shutdown = Arc::clone(&fsm);
        router.shutdown.register(lifecycle_fn(move |_ctx| {
            let fsm = Arc::clone(&fsm_for_shutdown);
            async move { fsm.close().await }
        }));

        Dispatcher { router, update, fsm, workflow_data: self.workflow_data }
    }
}

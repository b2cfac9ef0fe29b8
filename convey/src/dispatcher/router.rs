//! The router tree.
//!
//! A [`Router`] bundles one [`EventObserver`] per update category, an error
//! observer, and startup/shutdown lifecycle observers. Routers nest:
//! [`include_router`](Router::include_router) moves a child in, so a router
//! has exactly one parent for life and cycles cannot be built at all.
//!
//! Propagation is depth-first, first-match-wins: a router runs its own
//! observer's outer middleware and root filters, tries its handlers, and
//! only if the event is still unclaimed offers it to each child in
//! attachment order. Inner middleware accumulates down the tree, so an
//! ancestor's inner chain wraps every handler in its subtree.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use convey_core::{
    BoxError, Context, EventObserver, HandlerResult, Middleware, Next, Propagation,
    SimpleObserver, Terminal,
};

use crate::dispatcher::user_context::EVENT_ROUTER;
use crate::enums::UpdateType;
use crate::types::{ErrorEvent, UpdateEvent};

/// One node of the dispatch tree.
pub struct Router {
    name: String,
    /// Observer for `competence` updates.
    pub competence: EventObserver<UpdateEvent>,
    /// Observer for `line` updates.
    pub line: EventObserver<UpdateEvent>,
    /// Observer for `subscriber` updates.
    pub subscriber: EventObserver<UpdateEvent>,
    /// Observer for `subscription` updates.
    pub subscription: EventObserver<UpdateEvent>,
    /// Observer for `support_line` updates.
    pub support_line: EventObserver<UpdateEvent>,
    /// Observer for pipeline errors.
    pub errors: EventObserver<ErrorEvent>,
    /// Startup callbacks.
    pub startup: SimpleObserver,
    /// Shutdown callbacks.
    pub shutdown: SimpleObserver,
    children: Vec<Router>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new("router")
    }
}

impl Router {
    /// An empty router labelled `name` (surfaces in logs and in the
    /// [`EVENT_ROUTER`] context entry).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            competence: EventObserver::new("competence"),
            line: EventObserver::new("line"),
            subscriber: EventObserver::new("subscriber"),
            subscription: EventObserver::new("subscription"),
            support_line: EventObserver::new("support_line"),
            errors: EventObserver::new("error"),
            startup: SimpleObserver::new(),
            shutdown: SimpleObserver::new(),
            children: Vec::new(),
        }
    }

    /// The router's label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The observer for `update_type`.
    pub fn observer(&self, update_type: UpdateType) -> &EventObserver<UpdateEvent> {
        match update_type {
            UpdateType::Competence => &self.competence,
            UpdateType::Line => &self.line,
            UpdateType::Subscriber => &self.subscriber,
            UpdateType::Subscription => &self.subscription,
            UpdateType::SupportLine => &self.support_line,
        }
    }

    /// Mutable access to the observer for `update_type`.
    pub fn observer_mut(&mut self, update_type: UpdateType) -> &mut EventObserver<UpdateEvent> {
        match update_type {
            UpdateType::Competence => &mut self.competence,
            UpdateType::Line => &mut self.line,
            UpdateType::Subscriber => &mut self.subscriber,
            UpdateType::Subscription => &mut self.subscription,
            UpdateType::SupportLine => &mut self.support_line,
        }
    }

    /// Attaches `router` as the last child, consuming it.
    ///
    /// Moving the child in makes double attachment, self attachment, and
    /// cycles unrepresentable. Returns a mutable borrow of the attached
    /// child for further configuration.
    pub fn include_router(&mut self, router: Router) -> &mut Router {
        self.children.push(router);
        self.children.last_mut().expect("children is non-empty after push")
    }

    /// The attached children, in attachment order.
    pub fn sub_routers(&self) -> &[Router] {
        &self.children
    }

    /// The update categories this subtree has handlers for.
    pub fn resolve_used_update_types(&self) -> BTreeSet<UpdateType> {
        let mut used = BTreeSet::new();
        self.collect_used_update_types(&mut used);
        used
    }

    fn collect_used_update_types(&self, used: &mut BTreeSet<UpdateType>) {
        for update_type in UpdateType::ALL {
            if self.observer(update_type).has_handlers() {
                used.insert(update_type);
            }
        }
        for child in &self.children {
            child.collect_used_update_types(used);
        }
    }

    /// Offers `event` to this subtree.
    ///
    /// `inherited` is the inner middleware accumulated from ancestors; this
    /// router's own observer chains are applied on top of it.
    pub fn propagate_event<'a>(
        &'a self,
        update_type: UpdateType,
        event: &'a UpdateEvent,
        ctx: &'a Context,
        inherited: &'a [Arc<dyn Middleware<UpdateEvent>>],
    ) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move {
            let observer = self.observer(update_type);
            let terminal = PropagateTerminal { router: self, update_type, inherited };
            let next = Next::new(observer.outer_middleware.as_slice(), &terminal);
            next.run(event, ctx.clone()).await
        })
    }

    /// Offers a pipeline error to this subtree's error observers.
    pub fn propagate_error<'a>(
        &'a self,
        event: &'a ErrorEvent,
        ctx: &'a Context,
        inherited: &'a [Arc<dyn Middleware<ErrorEvent>>],
    ) -> BoxFuture<'a, HandlerResult> {
        Box::pin(async move {
            let terminal = PropagateErrorTerminal { router: self, inherited };
            let next = Next::new(self.errors.outer_middleware.as_slice(), &terminal);
            next.run(event, ctx.clone()).await
        })
    }

    /// Runs startup callbacks, this router first, then children in order.
    pub fn emit_startup<'a>(&'a self, ctx: &'a Context) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(async move {
            self.startup.trigger(ctx).await?;
            for child in &self.children {
                child.emit_startup(ctx).await?;
            }
            Ok(())
        })
    }

    /// Runs shutdown callbacks, this router first, then children in order.
    pub fn emit_shutdown<'a>(&'a self, ctx: &'a Context) -> BoxFuture<'a, Result<(), BoxError>> {
        Box::pin(async move {
            self.shutdown.trigger(ctx).await?;
            for child in &self.children {
                child.emit_shutdown(ctx).await?;
            }
            Ok(())
        })
    }
}

struct PropagateTerminal<'r> {
    router: &'r Router,
    update_type: UpdateType,
    inherited: &'r [Arc<dyn Middleware<UpdateEvent>>],
}

#[async_trait]
impl Terminal<UpdateEvent> for PropagateTerminal<'_> {
    async fn call(&self, event: &UpdateEvent, mut ctx: Context) -> HandlerResult {
        ctx.insert(EVENT_ROUTER, self.router.name.clone());
        let observer = self.router.observer(self.update_type);

        // a root-filter rejection fences off the whole subtree
        if !observer.check_root_filters(event, &mut ctx).await? {
            return Ok(Propagation::Unhandled);
        }

        let mut chain = self.inherited.to_vec();
        chain.extend(observer.inner_middleware.iter().cloned());

        let verdict = observer.trigger(event, &ctx, &chain).await?;
        if !verdict.is_unhandled() {
            tracing::debug!(router = %self.router.name, event = %self.update_type, "event handled");
            return Ok(verdict);
        }

        for child in &self.router.children {
            let verdict = child.propagate_event(self.update_type, event, &ctx, &chain).await?;
            if !verdict.is_unhandled() {
                return Ok(verdict);
            }
        }
        Ok(Propagation::Unhandled)
    }
}

struct PropagateErrorTerminal<'r> {
    router: &'r Router,
    inherited: &'r [Arc<dyn Middleware<ErrorEvent>>],
}

#[async_trait]
impl Terminal<ErrorEvent> for PropagateErrorTerminal<'_> {
    async fn call(&self, event: &ErrorEvent, mut ctx: Context) -> HandlerResult {
        ctx.insert(EVENT_ROUTER, self.router.name.clone());
        let observer = &self.router.errors;

        if !observer.check_root_filters(event, &mut ctx).await? {
            return Ok(Propagation::Unhandled);
        }

        let mut chain = self.inherited.to_vec();
        chain.extend(observer.inner_middleware.iter().cloned());

        let verdict = observer.trigger(event, &ctx, &chain).await?;
        if !verdict.is_unhandled() {
            return Ok(verdict);
        }

        for child in &self.router.children {
            let verdict = child.propagate_error(event, &ctx, &chain).await?;
            if !verdict.is_unhandled() {
                return Ok(verdict);
            }
        }
        Ok(Propagation::Unhandled)
    }
}

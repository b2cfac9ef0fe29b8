//! # convey-core
//!
//! Core event dispatch traits for the Convey framework.
//!
//! This crate has minimal dependencies and holds the generic machinery that
//! the `convey` SDK builds its update pipeline on. Nothing here knows about
//! the Connect API: everything is parameterised over an event type `E`.
//!
//! # Pipeline Anatomy
//!
//! An event flows through four cooperating pieces:
//!
//! - [`Filter`] — a predicate evaluated before a handler runs. Filters may
//!   *inject* data into the shared [`Context`] when they accept, so later
//!   filters and the handler see what earlier filters computed.
//! - [`Handler`] — the terminal business logic. Its verdict is a
//!   [`Propagation`]: handled with a payload, skip to the next candidate,
//!   rejected, or unhandled.
//! - [`Middleware`] — wraps handler execution. Outer middleware runs once per
//!   observer trigger; inner middleware runs once per handler attempt. Chains
//!   compose via the [`Next`] continuation.
//! - [`EventObserver`] — owns the registered handlers for one event category
//!   together with their filters and middleware, and drives the
//!   first-match-wins trigger loop.
//!
//! [`SimpleObserver`] is the degenerate sibling used for lifecycle
//! notifications (startup/shutdown) where there is no event payload and no
//! short-circuiting.

#![warn(missing_docs)]

mod context;
mod error;
mod filter;
mod handler;
mod middleware;
mod observer;

pub use context::{Context, ContextData, ContextValue};
pub use error::{BoxError, EventError};
pub use filter::{Filter, FilterResult, FnFilter, filter_fn};
pub use handler::{FnHandler, Handler, HandlerResponse, HandlerResult, Propagation, handler_fn};
pub use middleware::{Middleware, MiddlewareManager, Next, Terminal};
pub use observer::{
    EventObserver, FnLifecycle, HandlerEntry, LifecycleHandler, SimpleObserver, lifecycle_fn,
};

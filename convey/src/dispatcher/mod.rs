//! Update routing: the [`Router`] tree and the [`Dispatcher`] entry point.

#[allow(clippy::module_inception)]
mod dispatcher;
mod router;
pub mod user_context;

pub use dispatcher::{Dispatcher, DispatcherBuilder, UpdateObserver, silent_call_request};
pub use router::Router;
pub use user_context::UserContextMiddleware;

//! # convey
//!
//! Async client and update dispatcher for the 1C-Connect support-platform
//! API.
//!
//! The crate splits into two halves that meet in the webhook loop:
//!
//! - **Client** ([`client::Bot`]): every API call is a [`methods::Method`]
//!   value carrying its own HTTP verb and path. Calls flow through a
//!   [`client::session::Session`] where request middleware, the transport,
//!   and the response/status classifier live.
//! - **Dispatcher** ([`dispatcher::Dispatcher`] over a tree of
//!   [`dispatcher::Router`]s): webhook [`types::Update`]s are classified
//!   into one of five event categories and propagated depth-first through
//!   the router tree. Handlers, filters, and middleware come from
//!   [`convey_core`], with per-conversation FSM state and locking provided
//!   by the [`fsm`] module.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use convey::client::Bot;
//! use convey::dispatcher::Dispatcher;
//! use convey::methods::{SendMessageLine, answer};
//! use convey::types::UpdateEvent;
//! use convey_core::handler_fn;
//!
//! # async fn run() -> Result<(), convey_core::BoxError> {
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.line.register(handler_fn(|event: UpdateEvent, _ctx| async move {
//!     let UpdateEvent::Line(line) = event else {
//!         return Ok(convey_core::Propagation::Skip);
//!     };
//!     Ok(answer(SendMessageLine::new(line.line_id, line.user_id, "pong")))
//! }));
//!
//! let bot = Arc::new(Bot::new("login", "password"));
//! # let raw = serde_json::json!({});
//! dispatcher.feed_raw_update(bot, raw).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod dispatcher;
pub mod enums;
pub mod errors;
pub mod fsm;
pub mod methods;
pub mod types;
pub mod webhook;

pub use client::Bot;
pub use dispatcher::{Dispatcher, Router};
pub use enums::{ContentType, EventSource, HookType, RequestType, UpdateType};
pub use errors::{ApiError, ApiErrorKind, ClientError};

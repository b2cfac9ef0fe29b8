//! Outbound request middleware.
//!
//! The same continuation pattern as the inbound event pipeline, applied to
//! API calls: each middleware sees the [`RequestPayload`] before the
//! transport does and the [`RawResponse`] after, and may rewrite either,
//! retry, or short-circuit.

use std::sync::Arc;

use async_trait::async_trait;

use crate::client::Bot;
use crate::client::session::transport::Transport;
use crate::client::session::{RawResponse, RequestPayload};
use crate::errors::ClientError;

/// A single link in the outbound chain.
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    /// Processes the request, usually delegating to `next.run(..)`.
    async fn handle(
        &self,
        bot: &Bot,
        payload: RequestPayload,
        next: NextRequest<'_>,
    ) -> Result<RawResponse, ClientError>;
}

/// Continuation over the not-yet-run tail of the chain plus the transport.
pub struct NextRequest<'a> {
    chain: &'a [Arc<dyn RequestMiddleware>],
    transport: &'a dyn Transport,
}

impl<'a> NextRequest<'a> {
    /// Builds a continuation over `chain` ending at `transport`.
    pub fn new(chain: &'a [Arc<dyn RequestMiddleware>], transport: &'a dyn Transport) -> Self {
        Self { chain, transport }
    }

    /// Runs the remaining middleware and then the transport.
    pub async fn run(self, bot: &Bot, payload: RequestPayload) -> Result<RawResponse, ClientError> {
        match self.chain.split_first() {
            Some((head, tail)) => {
                let next = NextRequest { chain: tail, transport: self.transport };
                head.handle(bot, payload, next).await
            }
            None => self.transport.make_request(bot, payload).await,
        }
    }
}

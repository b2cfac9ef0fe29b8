//! Framework-agnostic webhook plumbing.
//!
//! The platform POSTs a flat JSON object; [`reshape_update`] lifts it into
//! the nested [`Update`](crate::types::Update) envelope, and a
//! [`WebhookFeeder`] dispatches it on a background task so the HTTP
//! handler can acknowledge immediately. Any HTTP server can sit in front:
//! decode the body, call [`WebhookFeeder::feed`], return 200.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use convey_core::Propagation;

use crate::client::Bot;
use crate::dispatcher::{Dispatcher, silent_call_request};
use crate::methods::ReplyMethod;

/// Lifts a flat webhook payload into the nested update envelope.
///
/// `{"event_type": "line", "event_source": "bot", "message_id": ...}`
/// becomes `{"event_type": "line", "event_source": "bot", "line": {...}}`.
/// Payloads that already carry their branch key pass through unchanged.
pub fn reshape_update(payload: Value) -> Value {
    let Value::Object(map) = payload else {
        return payload;
    };
    let Some(Value::String(event_type)) = map.get("event_type") else {
        return Value::Object(map);
    };
    if map.contains_key(event_type.as_str()) {
        return Value::Object(map);
    }
    let event_type = event_type.clone();

    let mut outer = serde_json::Map::new();
    let mut inner = serde_json::Map::new();
    for (key, value) in map {
        if key == "event_type" || key == "event_source" {
            outer.insert(key, value);
        } else {
            inner.insert(key, value);
        }
    }
    outer.insert(event_type, Value::Object(inner));
    Value::Object(outer)
}

/// Feeds webhook payloads to a dispatcher on background tasks and fires
/// handler replies back at the API.
pub struct WebhookFeeder {
    dispatcher: Arc<Dispatcher>,
    bot: Arc<Bot>,
    tasks: Mutex<JoinSet<()>>,
}

impl WebhookFeeder {
    /// Pairs `dispatcher` with the `bot` replies are sent through.
    pub fn new(dispatcher: Arc<Dispatcher>, bot: Arc<Bot>) -> Self {
        Self { dispatcher, bot, tasks: Mutex::new(JoinSet::new()) }
    }

    /// Queues one raw payload for dispatch and returns immediately.
    ///
    /// Dispatch errors never surface here; they are logged, because by the
    /// time they happen the HTTP request that delivered the payload has
    /// already been acknowledged.
    pub async fn feed(&self, payload: Value) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let bot = Arc::clone(&self.bot);
        let mut tasks = self.tasks.lock().await;
        // reap finished tasks so the set does not grow unbounded
        while tasks.try_join_next().is_some() {}
        tasks.spawn(async move {
            let update = reshape_update(payload);
            match dispatcher.feed_raw_update(Arc::clone(&bot), update).await {
                Ok(Propagation::Handled(response)) => {
                    if let Ok(reply) = response.downcast::<ReplyMethod>() {
                        if let Err(err) = silent_call_request(&bot, reply).await {
                            tracing::error!(error = %err, "webhook reply failed");
                        }
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::error!(error = %err, "webhook update dispatch failed");
                }
            }
        });
    }

    /// Waits for every queued dispatch to finish.
    pub async fn close(&self) {
        let mut tasks = self.tasks.lock().await;
        while tasks.join_next().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_payload_is_lifted() {
        let flat = json!({
            "event_type": "subscriber",
            "event_source": "line",
            "action": "add",
            "user": {"user_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "name": "a",
                     "surname": "b", "patronymic": "c", "email": "e", "post": "p",
                     "phone": "7", "avatar_url": null, "avatar_small_url": null},
        });
        let nested = reshape_update(flat);
        assert_eq!(nested["event_type"], "subscriber");
        assert_eq!(nested["event_source"], "line");
        assert_eq!(nested["subscriber"]["action"], "add");
        assert!(nested.get("action").is_none());
    }

    #[test]
    fn nested_payload_passes_through() {
        let nested = json!({
            "event_type": "line",
            "event_source": "bot",
            "line": {"message_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6"},
        });
        assert_eq!(reshape_update(nested.clone()), nested);
    }
}

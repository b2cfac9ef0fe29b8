//! Context keys and the middleware that fills the id-related ones.

use async_trait::async_trait;
use uuid::Uuid;

use convey_core::{Context, HandlerResult, Middleware, Next};

use crate::types::{Update, UpdateEvent};

/// The shared [`Bot`](crate::client::Bot) handle (`Arc<Bot>`).
pub const BOT: &str = "bot";
/// The raw [`Update`] being dispatched (`Arc<Update>`).
pub const EVENT_UPDATE: &str = "event_update";
/// Name of the router currently propagating the event (`String`).
pub const EVENT_ROUTER: &str = "event_router";
/// Line id of a chat event (`Uuid`).
pub const EVENT_LINE_ID: &str = "event_line_id";
/// User id of a chat event (`Uuid`).
pub const EVENT_USER_ID: &str = "event_user_id";
/// Author id of a chat event (`Uuid`).
pub const EVENT_AUTHOR_ID: &str = "event_author_id";
/// Action tag of a non-chat event (`String`).
pub const EVENT_ACTION: &str = "event_action";
/// The FSM storage handle (`Arc<dyn Storage>`).
pub const FSM_STORAGE: &str = "fsm_storage";
/// The per-conversation [`FsmContext`](crate::fsm::FsmContext).
pub const FSM_CONTEXT: &str = "state";
/// The state label loaded before handlers ran (`Option<String>`).
pub const RAW_STATE: &str = "raw_state";

/// Extracts conversation ids (or the action tag) from the update and
/// seeds the context with them before dispatch.
///
/// Runs on the dispatcher's outer chain, ahead of the FSM middleware that
/// builds its storage key from these entries.
#[derive(Default)]
pub struct UserContextMiddleware;

/// Ids resolvable from one update.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EventContext {
    /// Line id, on chat events.
    pub line_id: Option<Uuid>,
    /// User id, on chat events.
    pub user_id: Option<Uuid>,
    /// Author id, on chat events.
    pub author_id: Option<Uuid>,
    /// Action tag, on the other four categories.
    pub action: Option<String>,
}

impl EventContext {
    /// Resolves ids from `update`, tolerating unclassifiable payloads.
    pub fn resolve(update: &Update) -> Self {
        match update.event() {
            Ok((_, UpdateEvent::Line(line))) => Self {
                line_id: Some(line.line_id),
                user_id: Some(line.user_id),
                author_id: line.author_id,
                action: None,
            },
            Ok((_, UpdateEvent::Competence(event))) => Self::action(event.action),
            Ok((_, UpdateEvent::Subscriber(event))) => Self::action(event.action),
            Ok((_, UpdateEvent::Subscription(event))) => Self::action(event.action),
            Ok((_, UpdateEvent::SupportLine(event))) => Self::action(event.action),
            Err(_) => Self::default(),
        }
    }

    fn action(action: String) -> Self {
        Self { action: Some(action), ..Self::default() }
    }
}

#[async_trait]
impl Middleware<Update> for UserContextMiddleware {
    async fn handle(
        &self,
        update: &Update,
        mut ctx: Context,
        next: Next<'_, Update>,
    ) -> HandlerResult {
        let resolved = EventContext::resolve(update);
        if let Some(line_id) = resolved.line_id {
            ctx.insert(EVENT_LINE_ID, line_id);
        }
        if let Some(user_id) = resolved.user_id {
            ctx.insert(EVENT_USER_ID, user_id);
        }
        if let Some(author_id) = resolved.author_id {
            ctx.insert(EVENT_AUTHOR_ID, author_id);
        }
        if let Some(action) = resolved.action {
            ctx.insert(EVENT_ACTION, action);
        }
        next.run(update, ctx).await
    }
}

//! The middleware that locks, loads, and exposes FSM state per update.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use convey_core::{Context, HandlerResult, Middleware, Next};

use crate::dispatcher::user_context::{
    EVENT_ACTION, EVENT_AUTHOR_ID, EVENT_LINE_ID, EVENT_USER_ID, FSM_CONTEXT, FSM_STORAGE,
    RAW_STATE,
};
use crate::fsm::context::FsmContext;
use crate::fsm::isolation::EventIsolation;
use crate::fsm::storage::{DEFAULT_DESTINY, Storage, StorageKey};
use crate::types::Update;

/// Binds storage and isolation into the dispatcher's outer chain.
///
/// For every keyed update it acquires the isolation guard, loads the
/// current state, and exposes an [`FsmContext`] plus the raw state label in
/// the event context. Updates without any key field pass through without
/// locking.
pub struct FsmMiddleware {
    storage: Arc<dyn Storage>,
    isolation: Arc<dyn EventIsolation>,
}

impl FsmMiddleware {
    /// Wires `storage` and `isolation` together.
    pub fn new(storage: Arc<dyn Storage>, isolation: Arc<dyn EventIsolation>) -> Self {
        Self { storage, isolation }
    }

    /// The storage handlers will see under [`FSM_STORAGE`].
    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Builds an [`FsmContext`] for an explicit key, outside any update.
    pub fn get_context(
        &self,
        line_id: Option<Uuid>,
        user_id: Option<Uuid>,
        author_id: Option<Uuid>,
        action: Option<String>,
        destiny: impl Into<String>,
    ) -> FsmContext {
        FsmContext::new(
            Arc::clone(&self.storage),
            StorageKey { line_id, user_id, author_id, action, destiny: destiny.into() },
        )
    }

    /// Shuts storage and isolation down, in that order.
    pub async fn close(&self) -> Result<(), convey_core::BoxError> {
        self.storage.close().await?;
        self.isolation.close().await;
        Ok(())
    }

    fn resolve_key(ctx: &Context) -> Option<StorageKey> {
        let key = StorageKey {
            line_id: ctx.get::<Uuid>(EVENT_LINE_ID).copied(),
            user_id: ctx.get::<Uuid>(EVENT_USER_ID).copied(),
            author_id: ctx.get::<Uuid>(EVENT_AUTHOR_ID).copied(),
            action: ctx.get::<String>(EVENT_ACTION).cloned(),
            destiny: DEFAULT_DESTINY.to_owned(),
        };
        if key.is_anonymous() { None } else { Some(key) }
    }
}

#[async_trait]
impl Middleware<Update> for FsmMiddleware {
    async fn handle(
        &self,
        update: &Update,
        mut ctx: Context,
        next: Next<'_, Update>,
    ) -> HandlerResult {
        ctx.insert(FSM_STORAGE, Arc::clone(&self.storage));
        let Some(key) = Self::resolve_key(&ctx) else {
            return next.run(update, ctx).await;
        };

        // held across the whole handler run for this key
        let _guard = self.isolation.lock(&key).await;

        let fsm = FsmContext::new(Arc::clone(&self.storage), key);
        let raw_state = fsm.get_state().await?;
        ctx.insert(FSM_CONTEXT, fsm);
        ctx.insert(RAW_STATE, raw_state);
        next.run(update, ctx).await
    }
}

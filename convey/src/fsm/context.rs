//! The handler-facing handle to one conversation's state.

use std::sync::Arc;

use convey_core::BoxError;

use crate::fsm::storage::{StateData, Storage, StorageKey};

/// A storage handle bound to one [`StorageKey`].
///
/// Handlers pull this out of the event [`Context`](convey_core::Context)
/// under the `state` key and use it to read and advance the conversation's
/// state machine.
#[derive(Clone)]
pub struct FsmContext {
    storage: Arc<dyn Storage>,
    key: StorageKey,
}

impl FsmContext {
    /// Binds `storage` to `key`.
    pub fn new(storage: Arc<dyn Storage>, key: StorageKey) -> Self {
        Self { storage, key }
    }

    /// The key this context operates on.
    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Reads the current state label.
    pub async fn get_state(&self) -> Result<Option<String>, BoxError> {
        self.storage.get_state(&self.key).await
    }

    /// Sets the state label; `None` clears it.
    pub async fn set_state(&self, state: Option<impl Into<String>>) -> Result<(), BoxError> {
        self.storage.set_state(&self.key, state.map(Into::into)).await
    }

    /// Reads the data bag.
    pub async fn get_data(&self) -> Result<StateData, BoxError> {
        self.storage.get_data(&self.key).await
    }

    /// Replaces the data bag.
    pub async fn set_data(&self, data: StateData) -> Result<(), BoxError> {
        self.storage.set_data(&self.key, data).await
    }

    /// Merges `patch` into the data bag and returns the merged bag.
    pub async fn update_data(&self, patch: StateData) -> Result<StateData, BoxError> {
        let mut data = self.storage.get_data(&self.key).await?;
        data.extend(patch);
        self.storage.set_data(&self.key, data.clone()).await?;
        Ok(data)
    }

    /// Clears both the state label and the data bag.
    pub async fn clear(&self) -> Result<(), BoxError> {
        self.storage.set_state(&self.key, None).await?;
        self.storage.set_data(&self.key, StateData::new()).await
    }
}

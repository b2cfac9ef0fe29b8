//! State storage: the key, the contract, and the in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use convey_core::BoxError;

/// Destiny used when the caller does not ask for a named one.
///
/// Destinies let several independent state machines coexist for the same
/// conversation.
pub const DEFAULT_DESTINY: &str = "default";

/// Identifies one conversation's state slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    /// Support line id.
    pub line_id: Option<Uuid>,
    /// User id.
    pub user_id: Option<Uuid>,
    /// Author id.
    pub author_id: Option<Uuid>,
    /// Action tag from non-chat events.
    pub action: Option<String>,
    /// Which state machine this slot belongs to.
    pub destiny: String,
}

impl StorageKey {
    /// Whether every identifying field is absent.
    pub fn is_anonymous(&self) -> bool {
        self.line_id.is_none()
            && self.user_id.is_none()
            && self.author_id.is_none()
            && self.action.is_none()
    }
}

/// Arbitrary JSON data attached to a state slot.
pub type StateData = HashMap<String, serde_json::Value>;

/// Persistence contract for FSM state.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stores the state label; `None` clears it.
    async fn set_state(&self, key: &StorageKey, state: Option<String>) -> Result<(), BoxError>;

    /// Reads the state label.
    async fn get_state(&self, key: &StorageKey) -> Result<Option<String>, BoxError>;

    /// Replaces the data bag.
    async fn set_data(&self, key: &StorageKey, data: StateData) -> Result<(), BoxError>;

    /// Reads the data bag; absent keys read as empty.
    async fn get_data(&self, key: &StorageKey) -> Result<StateData, BoxError>;

    /// Flushes and releases resources.
    async fn close(&self) -> Result<(), BoxError>;
}

#[derive(Default, Clone)]
struct MemoryRecord {
    state: Option<String>,
    data: StateData,
}

/// Process-local storage; state is lost on restart.
#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<StorageKey, MemoryRecord>>,
}

impl MemoryStorage {
    /// An empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn set_state(&self, key: &StorageKey, state: Option<String>) -> Result<(), BoxError> {
        let mut records = self.records.lock().await;
        records.entry(key.clone()).or_default().state = state;
        Ok(())
    }

    async fn get_state(&self, key: &StorageKey) -> Result<Option<String>, BoxError> {
        let records = self.records.lock().await;
        Ok(records.get(key).and_then(|record| record.state.clone()))
    }

    async fn set_data(&self, key: &StorageKey, data: StateData) -> Result<(), BoxError> {
        let mut records = self.records.lock().await;
        records.entry(key.clone()).or_default().data = data;
        Ok(())
    }

    async fn get_data(&self, key: &StorageKey) -> Result<StateData, BoxError> {
        let records = self.records.lock().await;
        Ok(records.get(key).map(|record| record.data.clone()).unwrap_or_default())
    }

    async fn close(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

//! Per-key event serialization.
//!
//! Handlers for the same conversation must not interleave, or two updates
//! could both read state, both act, and clobber each other's writes. An
//! [`EventIsolation`] hands out a guard per [`StorageKey`]; the FSM
//! middleware holds it for the full handler run.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::fsm::storage::StorageKey;

/// Held for the duration of one keyed event; dropping it releases the key.
pub struct IsolationGuard {
    _guard: Option<OwnedMutexGuard<()>>,
}

impl IsolationGuard {
    /// A guard backed by a real lock.
    pub fn locked(guard: OwnedMutexGuard<()>) -> Self {
        Self { _guard: Some(guard) }
    }

    /// A no-op guard.
    pub fn disabled() -> Self {
        Self { _guard: None }
    }
}

/// Hands out per-key guards.
#[async_trait]
pub trait EventIsolation: Send + Sync {
    /// Acquires the guard for `key`, waiting if another event holds it.
    async fn lock(&self, key: &StorageKey) -> IsolationGuard;

    /// Releases shared resources.
    async fn close(&self) {}
}

/// In-process isolation: one async mutex per key.
///
/// Locks are never evicted; key cardinality is bounded by active
/// conversations, which is acceptable for a single process.
#[derive(Default)]
pub struct KeyLockIsolation {
    locks: Mutex<HashMap<StorageKey, Arc<Mutex<()>>>>,
}

impl KeyLockIsolation {
    /// An isolation with no keys held.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventIsolation for KeyLockIsolation {
    async fn lock(&self, key: &StorageKey) -> IsolationGuard {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(locks.entry(key.clone()).or_default())
        };
        // the map lock is released before waiting on the key lock
        IsolationGuard::locked(lock.lock_owned().await)
    }
}

/// No isolation: events for the same key may run concurrently.
#[derive(Default)]
pub struct DisabledIsolation;

#[async_trait]
impl EventIsolation for DisabledIsolation {
    async fn lock(&self, _key: &StorageKey) -> IsolationGuard {
        IsolationGuard::disabled()
    }
}

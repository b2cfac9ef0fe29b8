//! Per-conversation finite-state machine support.
//!
//! State lives in a [`Storage`] keyed by [`StorageKey`] (the ids the
//! user-context middleware extracted from the update). While a keyed update
//! is being processed, an [`EventIsolation`] lock serializes handlers for
//! that key so concurrent updates from the same conversation cannot
//! interleave state reads and writes.

mod context;
mod isolation;
mod middleware;
mod storage;

pub use context::FsmContext;
pub use isolation::{DisabledIsolation, EventIsolation, IsolationGuard, KeyLockIsolation};
pub use middleware::FsmMiddleware;
pub use storage::{DEFAULT_DESTINY, MemoryStorage, StateData, Storage, StorageKey};

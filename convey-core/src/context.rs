//! The shared per-event data bag.
//!
//! Every stage of the pipeline (middleware, filters, handlers) reads and
//! writes the same [`Context`]: a string-keyed map of type-erased values.
//! Middleware seeds it, filters patch it on acceptance, handlers consume it.
//! Cloning a `Context` is cheap: values are stored behind `Arc`, so a clone
//! shares the payloads and only copies the key map.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A single type-erased, shareable context value.
pub type ContextValue = Arc<dyn Any + Send + Sync>;

/// A detached set of context entries, used for filter injection patches.
pub type ContextData = HashMap<String, ContextValue>;

/// String-keyed bag of typed values accompanying an event through the
/// pipeline.
#[derive(Clone, Default)]
pub struct Context {
    values: ContextData,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value under `key`, replacing any previous entry.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Arc::new(value));
    }

    /// Inserts an already-shared value under `key`.
    pub fn insert_arc(&mut self, key: impl Into<String>, value: ContextValue) {
        self.values.insert(key.into(), value);
    }

    /// Returns a reference to the value under `key` if it exists and has
    /// type `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref::<T>()
    }

    /// Returns a shared handle to the value under `key` if it exists and has
    /// type `T`.
    pub fn get_arc<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        Arc::clone(self.values.get(key)?).downcast::<T>().ok()
    }

    /// Whether a value is present under `key`, regardless of type.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes the value under `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.values.remove(key)
    }

    /// Applies a patch produced by a filter, overwriting colliding keys.
    pub fn merge(&mut self, patch: ContextData) {
        self.values.extend(patch);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the context holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_roundtrip() {
        let mut ctx = Context::new();
        ctx.insert("answer", 42u32);
        ctx.insert("name", String::from("specialist"));

        assert_eq!(ctx.get::<u32>("answer"), Some(&42));
        assert_eq!(ctx.get::<String>("name").map(String::as_str), Some("specialist"));
        assert!(ctx.get::<i64>("answer").is_none(), "wrong type must not downcast");
        assert!(ctx.get::<u32>("missing").is_none());
    }

    #[test]
    fn merge_overwrites_colliding_keys() {
        let mut ctx = Context::new();
        ctx.insert("foo", 1u32);

        let mut patch = ContextData::new();
        patch.insert("foo".into(), Arc::new(2u32));
        patch.insert("bar".into(), Arc::new(true));
        ctx.merge(patch);

        assert_eq!(ctx.get::<u32>("foo"), Some(&2));
        assert_eq!(ctx.get::<bool>("bar"), Some(&true));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn clone_shares_values() {
        let mut ctx = Context::new();
        ctx.insert("shared", String::from("payload"));
        let copy = ctx.clone();

        let a = ctx.get_arc::<String>("shared").unwrap();
        let b = copy.get_arc::<String>("shared").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}

use std::{collections::HashMap, sync::Arc};

use tokio::sync::Mutex;

use crate::prelude::*;

/// Read-through result cache, keyed by the serialized request inputs.
///
/// Each service client gets its own instance injected, so an address lookup
/// can never shadow a layer query. Shared by clone.
#[must_use]
pub struct Cache<V>(Arc<Mutex<HashMap<String, V>>>);

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V> Default for Cache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Cache<V> {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(HashMap::new())))
    }

    #[cfg_attr(not(test), expect(dead_code))]
    #[instrument(skip_all)]
    pub async fn clear(&self) {
        let mut entries = self.0.lock().await;
        debug!(n_entries = entries.len(), "🧹 Clearing…");
        entries.clear();
    }
}

impl<V: Clone> Cache<V> {
    pub async fn get(&self, key: &str) -> Option<V> {
        self.0.lock().await.get(key).cloned()
    }

    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.0.lock().await.insert(key.into(), value);
    }
}

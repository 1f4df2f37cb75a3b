use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::RwLock;

/// Serialized copy of cached values that outlives the cache itself.
#[async_trait::async_trait]
pub trait Mirror: Send + Sync {
    async fn set(&self, key: String, value: String);
    async fn remove(&self, key: &str);
    async fn entries(&self) -> Vec<(String, String)>;
}

/// Process-local mirror, shared between cache instances through `Clone`.
#[derive(Clone, Default)]
pub struct MemoryMirror {
    items: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryMirror {
    pub async fn get(&self, key: &str) -> Option<String> {
        self.items.read().await.get(key).cloned()
    }
}

#[async_trait::async_trait]
impl Mirror for MemoryMirror {
    async fn set(&self, key: String, value: String) {
        self.items.write().await.insert(key, value);
    }

    async fn remove(&self, key: &str) {
        self.items.write().await.remove(key);
    }

    async fn entries(&self) -> Vec<(String, String)> {
        self.items
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }
}

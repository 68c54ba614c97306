//! In-process document store.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rand::Rng;
use rand::distributions::Alphanumeric;

use super::{DocumentStore, Fields, StoreError};

/// Length of generated ids, matching Firestore's auto-ids.
const AUTO_ID_LEN: usize = 20;

type Collections = BTreeMap<String, BTreeMap<String, Fields>>;

/// Document store held in memory.
///
/// Clones share the same contents. Writes to paths registered with
/// [`MemoryStore::fail_on`] are rejected, which lets tests stop a seeding
/// run part way through.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<Mutex<Collections>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects future writes to `collection/id`, or to any new document in
    /// `collection` when `id` is `"*"`.
    pub fn fail_on(&self, collection: &str, id: &str) {
        self.failing().insert(format!("{collection}/{id}"));
    }

    /// Returns a copy of a stored document.
    pub fn get(&self, collection: &str, id: &str) -> Option<Fields> {
        self.collections()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections().get(collection).map_or(0, BTreeMap::len)
    }

    /// All documents in a collection, keyed by id.
    pub fn documents(&self, collection: &str) -> BTreeMap<String, Fields> {
        self.collections()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Total documents across all collections.
    pub fn total(&self) -> usize {
        self.collections().values().map(BTreeMap::len).sum()
    }

    // Recovers from poisoning so one panicking holder does not fail every clone.
    fn collections(&self) -> MutexGuard<'_, Collections> {
        self.collections.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn failing(&self) -> MutexGuard<'_, HashSet<String>> {
        self.failing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let failing = self.failing();
        let path = format!("{collection}/{id}");
        if failing.contains(&path) || failing.contains(&format!("{collection}/*")) {
            return Err(StoreError::Rejected(path));
        }
        Ok(())
    }
}

fn auto_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(AUTO_ID_LEN)
        .map(char::from)
        .collect()
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), StoreError> {
        self.check(collection, id)?;

        self.collections()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), fields.clone());
        Ok(())
    }

    async fn add(&self, collection: &str, fields: &Fields) -> Result<String, StoreError> {
        self.check(collection, "*")?;

        let mut collections = self.collections();
        let docs = collections.entry(collection.to_string()).or_default();

        let mut id = auto_id();
        while docs.contains_key(&id) {
            id = auto_id();
        }
        docs.insert(id.clone(), fields.clone());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields(value: Value) -> Fields {
        value.as_object().unwrap().clone()
    }

    #[tokio::test]
    async fn test_set_overwrites_whole_document() {
        let store = MemoryStore::new();
        store
            .set("users", "test-user", &fields(json!({ "city": "Paris", "email": "a@b" })))
            .await
            .unwrap();
        store
            .set("users", "test-user", &fields(json!({ "city": "Lyon" })))
            .await
            .unwrap();

        assert_eq!(store.count("users"), 1);
        assert_eq!(
            store.get("users", "test-user"),
            Some(fields(json!({ "city": "Lyon" })))
        );
    }

    #[tokio::test]
    async fn test_add_generates_distinct_ids() {
        let store = MemoryStore::new();
        let doc = fields(json!({ "read": false }));

        let a = store.add("notifications", &doc).await.unwrap();
        let b = store.add("notifications", &doc).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(a.len(), AUTO_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(store.count("notifications"), 2);
    }

    #[tokio::test]
    async fn test_fail_on() {
        let store = MemoryStore::new();
        store.fail_on("reels", "test-reel-1");
        store.fail_on("notifications", "*");
        let doc = fields(json!({}));

        assert!(matches!(
            store.set("reels", "test-reel-1", &doc).await,
            Err(StoreError::Rejected(path)) if path == "reels/test-reel-1"
        ));
        assert!(store.add("notifications", &doc).await.is_err());
        assert!(store.set("reels", "other", &doc).await.is_ok());
        assert_eq!(store.total(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_contents() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle
            .set("liveStreams", "main", &fields(json!({ "isActive": true })))
            .await
            .unwrap();

        assert_eq!(store.documents("liveStreams").len(), 1);
    }

    #[tokio::test]
    async fn test_survives_poisoned_lock() {
        let store = MemoryStore::new();
        let handle = store.clone();

        let panicked = std::thread::spawn(move || {
            let _guard = handle.collections.lock().unwrap();
            let _failing = handle.failing.lock().unwrap();
            panic!("writer panicked while holding the locks");
        })
        .join();
        assert!(panicked.is_err());
        assert!(store.collections.is_poisoned());

        store
            .set("users", "test-user", &fields(json!({ "city": "Paris" })))
            .await
            .unwrap();
        store.fail_on("reels", "test-reel-1");

        assert_eq!(store.count("users"), 1);
        assert!(store.set("reels", "test-reel-1", &fields(json!({}))).await.is_err());
    }
}

//! Draft persistence for entry forms
//!
//! Drafts are stored as JSON strings under a per-form key so a browser
//! client can back the store with local storage while native callers
//! and tests use an in-memory map.

use std::collections::HashMap;

/// Key-value store for form drafts
pub trait DraftStore {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory draft store
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: HashMap<String, String>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

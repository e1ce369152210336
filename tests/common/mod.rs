#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use musecli::{
    management::{Storage, StorageError},
    sink::{LikeAction, LikeSink},
    types::{CatalogRecord, LikeRequest},
};

// In-memory stand-in for the durable store
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_item(key: &str, value: &str) -> Arc<Self> {
        let storage = Self::default();
        storage
            .items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Arc::new(storage)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::IoError(std::io::Error::other("disk full")));
        }
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    calls: Mutex<Vec<(LikeAction, LikeRequest)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<(LikeAction, LikeRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

impl LikeSink for RecordingSink {
    fn dispatch(&self, action: LikeAction, request: LikeRequest) {
        self.calls.lock().unwrap().push((action, request));
    }
}

pub fn record(id: &str, name: &str) -> CatalogRecord {
    CatalogRecord {
        id: id.to_string(),
        name: name.to_string(),
        external_url: format!("https://open.spotify.com/artist/{}", id),
        image_url: None,
    }
}

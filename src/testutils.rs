use std::{
    collections::HashMap,
    io,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use crate::store::{KeyValueStore, StoreError};

pub struct MockStoreInner {
    pub success: AtomicBool,
    pub read_only: AtomicBool,
    pub calls_to_get: AtomicU64,
    pub calls_to_set: AtomicU64,
    pub calls_to_remove: AtomicU64,
    pub entries: Mutex<HashMap<String, String>>,
}

/// Counts calls and fails every operation once `success` is cleared.
/// With `read_only` set only writes fail.
#[derive(Clone)]
pub struct MockStore(pub Arc<MockStoreInner>);

impl MockStoreInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            read_only: AtomicBool::new(false),
            calls_to_get: AtomicU64::default(),
            calls_to_set: AtomicU64::default(),
            calls_to_remove: AtomicU64::default(),
            entries: Mutex::default(),
        }
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self(Arc::new(MockStoreInner::new()))
    }

    fn result(&self) -> Result<(), StoreError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(io::Error::new(io::ErrorKind::Other, "Supposed to fail").into()),
        }
    }

    fn write_result(&self) -> Result<(), StoreError> {
        self.result()?;
        match self.0.read_only.load(Ordering::SeqCst) {
            false => Ok(()),
            true => Err(io::Error::new(io::ErrorKind::PermissionDenied, "Read only").into()),
        }
    }
}

impl KeyValueStore for MockStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.calls_to_get.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.0.calls_to_set.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;
        self.0.entries.lock().unwrap().insert(key.into(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.0.calls_to_remove.fetch_add(1, Ordering::SeqCst);
        self.write_result()?;
        self.0.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Store lock was poisoned")]
    Poisoned,
}

/// Namespaced keys. Per-user lists are suffixed with the owner's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    User,
    Providers,
    Availability(Uuid),
    Events(Uuid),
    Services(Uuid),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::User => write!(f, "user"),
            StoreKey::Providers => write!(f, "providers"),
            StoreKey::Availability(user_id) => write!(f, "availability_{user_id}"),
            StoreKey::Events(user_id) => write!(f, "events_{user_id}"),
            StoreKey::Services(user_id) => write!(f, "services_{user_id}"),
        }
    }
}

/// String-valued storage. Every `set` replaces the whole value (last write wins).
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    fn read_json<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StoreError> {
        match self.get(&key.to_string())? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Missing lists read as empty.
    fn read_list<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Vec<T>, StoreError> {
        Ok(self.read_json(key)?.unwrap_or_default())
    }

    fn write_json<T: Serialize + ?Sized>(
        &self,
        key: StoreKey,
        value: &T,
    ) -> Result<(), StoreError> {
        self.set(&key.to_string(), serde_json::to_string(value)?)
    }

    fn delete(&self, key: StoreKey) -> Result<(), StoreError> {
        self.remove(&key.to_string())
    }
}

// Key-value storage backend. The stores are written against this trait
// only; whether the slots survive a restart is the backend's business.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;

/// Names of the persisted slots. JSON-encoded values, no schema versioning;
/// an unreadable value makes the owning store reseed from defaults.
pub mod keys {
    /// Array of `User` records, passwords included.
    pub const USERS: &str = "ticketapp_users";
    /// The single active `Session`, or absent.
    pub const SESSION: &str = "ticketapp_session";
    /// Array of `Ticket` records.
    pub const TICKETS: &str = "ticketapp_tickets";
    /// `"light"` or `"dark"`.
    pub const THEME: &str = "ticketapp_theme";
}

/// A key-value slot store, the localStorage analogue.
///
/// Injected into every store at construction. Implementations are either
/// durable (`FileBackend` in `ticketapp-fs`) or process-lifetime only
/// ([`MemoryBackend`]), which doubles as the fallback when no durable
/// storage is available and as the test fake.
#[async_trait]
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Read a slot. `None` when the slot was never written or was removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a slot, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Removing an absent slot is a no-op.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend. Contents live exactly as long as the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots, for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.slots.lock().unwrap().remove(key);
        Ok(())
    }
}

//! # Outbound Ports (Driven Ports)
//!
//! Dependencies the provenance service requires from its host.

use crate::domain::entities::{Item, ItemIndex};
use crate::domain::errors::{KVStoreError, SerializationError};

/// Point-access key-value store.
///
/// Writes to a single key are atomic. Nothing spans keys: creating an item
/// is two independent writes (record, then index).
///
/// Testing: `InMemoryKVStore`
/// Local persistence: `FileBackedKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Overwrite the value at `key`.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.get(key)?.is_some())
    }
}

/// Encoding of persisted records.
pub trait RecordSerializer: Send + Sync {
    fn serialize_item(&self, item: &Item) -> Result<Vec<u8>, SerializationError>;

    fn deserialize_item(&self, data: &[u8]) -> Result<Item, SerializationError>;

    fn serialize_index(&self, index: &ItemIndex) -> Result<Vec<u8>, SerializationError>;

    fn deserialize_index(&self, data: &[u8]) -> Result<ItemIndex, SerializationError>;
}

//! # Item Record Store and Item Index
//!
//! Typed access to the two kinds of stored values:
//!
//! - item records under their identifier
//! - the item index under `config.index_key`
//!
//! `register_item_id` is the only path that mutates the index after
//! initialization. The index is read, extended and written back whole.

use super::*;
use crate::domain::entities::{Item, ItemIndex};
use crate::domain::errors::ProvenanceError;

impl<KV, RS> ProvenanceService<KV, RS>
where
    KV: KeyValueStore,
    RS: RecordSerializer,
{
    // =========================================================================
    // ITEM INDEX
    // =========================================================================

    pub(crate) fn is_initialized(&self) -> Result<bool, ProvenanceError> {
        Ok(self.kv_store.exists(self.config.index_key.as_bytes())?)
    }

    pub(crate) fn ensure_initialized(&self) -> Result<(), ProvenanceError> {
        if self.is_initialized()? {
            Ok(())
        } else {
            Err(ProvenanceError::NotInitialized)
        }
    }

    pub(crate) fn load_index(&self) -> Result<ItemIndex, ProvenanceError> {
        let data = self
            .kv_store
            .get(self.config.index_key.as_bytes())?
            .ok_or(ProvenanceError::NotInitialized)?;
        Ok(self.serializer.deserialize_index(&data)?)
    }

    pub(crate) fn store_index(&mut self, index: &ItemIndex) -> Result<(), ProvenanceError> {
        let data = self.serializer.serialize_index(index)?;
        self.kv_store.put(self.config.index_key.as_bytes(), &data)?;
        Ok(())
    }

    /// Append `id` to the index. Already-registered ids cause no write.
    pub(crate) fn register_item_id(&mut self, id: &str) -> Result<(), ProvenanceError> {
        let mut index = self.load_index()?;
        if !index.register(id) {
            tracing::warn!("[pc-01] Item {} already indexed, skipping index write", id);
            return Ok(());
        }
        self.store_index(&index)
    }

    // =========================================================================
    // ITEM RECORDS
    // =========================================================================

    pub(crate) fn item_exists(&self, id: &str) -> Result<bool, ProvenanceError> {
        if self.config.is_reserved_key(id) {
            return Ok(false);
        }
        Ok(self.kv_store.exists(id.as_bytes())?)
    }

    /// Load a record. Reserved keys never name an item.
    pub(crate) fn load_item(&self, id: &str) -> Result<Item, ProvenanceError> {
        if self.config.is_reserved_key(id) {
            return Err(ProvenanceError::ItemNotFound { id: id.to_string() });
        }
        let data = self
            .kv_store
            .get(id.as_bytes())?
            .ok_or_else(|| ProvenanceError::ItemNotFound { id: id.to_string() })?;
        Ok(self.serializer.deserialize_item(&data)?)
    }

    /// Overwrite the full record for `item.id`.
    pub(crate) fn store_item(&mut self, item: &Item) -> Result<(), ProvenanceError> {
        let data = self.serializer.serialize_item(item)?;
        self.kv_store.put(item.id.as_bytes(), &data)?;
        Ok(())
    }

    /// Records for every indexed id, in index order.
    pub(crate) fn indexed_items(&self) -> Result<Vec<Item>, ProvenanceError> {
        let index = self.load_index()?;
        index.iter().map(|id| self.load_item(id)).collect()
    }
}

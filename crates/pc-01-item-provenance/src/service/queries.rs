//! # Query Engine
//!
//! Read-only projections over the record store and the index. No query
//! writes; list queries preserve index order and are not paginated.

use super::*;
use crate::domain::entities::Item;
use crate::domain::errors::ProvenanceError;
use crate::domain::value_objects::ItemStatus;
use crate::ports::inbound::ProvenanceQueryApi;

impl<KV, RS> ProvenanceQueryApi for ProvenanceService<KV, RS>
where
    KV: KeyValueStore,
    RS: RecordSerializer,
{
    fn item_details(&self, id: &str) -> Result<Item, ProvenanceError> {
        self.ensure_initialized()?;
        tracing::debug!("[pc-01] Looking up item {}", id);
        self.load_item(id)
    }

    fn item_by_barcode(&self, barcode: &str) -> Result<Item, ProvenanceError> {
        tracing::debug!("[pc-01] Looking up item with barcode {}", barcode);
        self.indexed_items()?
            .into_iter()
            .find(|item| item.barcode == barcode)
            .ok_or_else(|| ProvenanceError::BarcodeNotFound {
                barcode: barcode.to_string(),
            })
    }

    fn owner_items(&self, owner: &str) -> Result<Vec<Item>, ProvenanceError> {
        let items: Vec<Item> = self
            .indexed_items()?
            .iter()
            .filter(|item| item.involves(owner))
            .map(Item::without_history)
            .collect();
        tracing::debug!("[pc-01] {} items for {}", items.len(), owner);
        Ok(items)
    }

    fn owner_items_by_status(
        &self,
        owner: &str,
        status: ItemStatus,
    ) -> Result<Vec<Item>, ProvenanceError> {
        let items: Vec<Item> = self
            .indexed_items()?
            .iter()
            .filter(|item| item.is_owned_by(owner) && item.status == status)
            .map(Item::without_history)
            .collect();
        tracing::debug!(
            "[pc-01] {} items for {} with status {}",
            items.len(),
            owner,
            status
        );
        Ok(items)
    }

    fn owner_items_with_history(&self, owner: &str) -> Result<Vec<Item>, ProvenanceError> {
        let items: Vec<Item> = self
            .indexed_items()?
            .into_iter()
            .filter(|item| item.involves(owner))
            .collect();
        tracing::debug!("[pc-01] {} items with history for {}", items.len(), owner);
        Ok(items)
    }

    fn item_ids(&self) -> Result<Vec<String>, ProvenanceError> {
        Ok(self.load_index()?.all().to_vec())
    }
}

//! # Domain Entities
//!
//! The provenance record (`Item` plus its `Transaction` history) and the
//! `ItemIndex` that makes records enumerable.

use crate::domain::value_objects::{ItemStatus, TransactionType};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Immutable audit entry describing one custody event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "transactionType")]
    pub transaction_type: TransactionType,
    /// Owner after this event, or the unknown-owner sentinel.
    #[serde(rename = "newOwner")]
    pub new_owner: String,
    pub location: String,
    #[serde(rename = "vDate")]
    pub date: String,
}

/// Provenance record for one physical unit of goods.
///
/// `id`, `manufacturer` and `barcode` never change after creation.
/// `transactions` is oldest-first and only ever grows; list projections
/// clear it, in which case the field is omitted from the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub current_owner: String,
    pub manufacturer: String,
    pub barcode: String,
    pub status: ItemStatus,
    pub scan_count: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
}

impl Item {
    /// Whether `identity` is the current owner.
    pub fn is_owned_by(&self, identity: &str) -> bool {
        self.current_owner == identity
    }

    /// Whether `identity` currently owns or manufactured this item.
    pub fn involves(&self, identity: &str) -> bool {
        self.current_owner == identity || self.manufacturer == identity
    }

    /// Copy of this record with the history dropped.
    pub fn without_history(&self) -> Item {
        Item {
            transactions: Vec::new(),
            ..self.clone()
        }
    }

    /// Most recent custody event.
    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.transactions.last()
    }

    /// Append an audit entry.
    pub(crate) fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}

/// Ordered set of every item identifier ever created.
///
/// Insertion order is preserved and identifiers are unique. Persisted as
/// `{ "items": [...] }`; a `null` list (as written by older ledgers on
/// init) reads back as empty, and duplicates left by an interrupted create
/// are collapsed on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IndexRecord", into = "IndexRecord")]
pub struct ItemIndex {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ItemIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` unless already present. Returns whether it was added.
    pub fn register(&mut self, id: &str) -> bool {
        if !self.members.insert(id.to_string()) {
            return false;
        }
        self.order.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Identifiers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn all(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct IndexRecord {
    #[serde(default)]
    items: Option<Vec<String>>,
}

impl From<IndexRecord> for ItemIndex {
    fn from(record: IndexRecord) -> Self {
        let mut index = ItemIndex::new();
        for id in record.items.unwrap_or_default() {
            index.register(&id);
        }
        index
    }
}

impl From<ItemIndex> for IndexRecord {
    fn from(index: ItemIndex) -> Self {
        IndexRecord {
            items: Some(index.order),
        }
    }
}

/// Response wrapper for list queries: `{ "items": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    pub items: Vec<Item>,
}

impl From<Vec<Item>> for ItemList {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_item;

    #[test]
    fn test_index_preserves_order_and_dedups() {
        let mut index = ItemIndex::new();
        assert!(index.register("b"));
        assert!(index.register("a"));
        assert!(!index.register("b"));

        assert_eq!(index.all(), &["b".to_string(), "a".to_string()]);
        assert!(index.contains("a"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_index_wire_format() {
        let mut index = ItemIndex::new();
        index.register("I1");
        index.register("I2");

        let json = serde_json::to_string(&index).unwrap();
        assert_eq!(json, r#"{"items":["I1","I2"]}"#);
    }

    #[test]
    fn test_index_reads_null_and_duplicates() {
        let index: ItemIndex = serde_json::from_str(r#"{"items":null}"#).unwrap();
        assert!(index.is_empty());

        let index: ItemIndex = serde_json::from_str(r#"{"items":["I1","I2","I1"]}"#).unwrap();
        assert_eq!(index.all(), &["I1".to_string(), "I2".to_string()]);
    }

    #[test]
    fn test_item_wire_field_names() {
        let item = make_item("I1", "MANUFACTURER");
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], "I1");
        assert_eq!(value["currentOwner"], "MANUFACTURER");
        assert_eq!(value["scanCount"], 0);
        assert_eq!(value["status"], "VERIFIED");
        assert_eq!(value["transactions"][0]["transactionType"], "CREATE");
        assert_eq!(value["transactions"][0]["vDate"], "2016-05-01");
    }

    #[test]
    fn test_without_history_omits_transactions() {
        let item = make_item("I1", "MANUFACTURER").without_history();
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("transactions").is_none());
    }

    #[test]
    fn test_involves_matches_owner_or_manufacturer() {
        let mut item = make_item("I1", "MANUFACTURER");
        item.current_owner = "R1".to_string();

        assert!(item.involves("R1"));
        assert!(item.involves("MANUFACTURER"));
        assert!(!item.involves("X"));
        assert!(!item.is_owned_by("MANUFACTURER"));
    }
}

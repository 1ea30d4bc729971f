//! # Item Provenance Subsystem (pc-01)
//!
//! Authoritative chain-of-custody record for physical goods. Every item is
//! created by a manufacturer, handed from owner to owner, confirmed by each
//! recipient, and may finally be flagged as counterfeit, stolen or sold.
//! Retail scans are counted once an item has reached a retailer.
//!
//! ## Request Flow
//!
//! ```text
//! invoke(fn, args) ──→ [Request Decoding] ──→ [Authorization Rules]
//!                                                     │
//!                                                     ↓
//!                                        [Provenance State Machine]
//!                                                     │
//!                                                     ↓
//!                                 [Item Record Store] (+ [Item Index] on create)
//!
//! query(fn, args) ──→ [Query Engine] ──→ [Item Index] ──→ [Item Record Store]
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | 1 | Index/record correspondence | `register_item_id` is the only index writer |
//! | 2 | Append-only history | `invariants::verify_transition` before every commit |
//! | 3 | Closed status set | `ItemStatus` sum type |
//! | 4 | Monotonic scan count | `invariants::verify_transition` |
//! | 5 | Fail closed | All checks run before the first write |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Entities, value objects, authorization and transition rules
//! - `ports/` - Inbound API traits, outbound store/serializer traits
//! - `service/` - Application service implementing the API
//! - `adapters/` - Key-value stores, JSON serializer, function dispatcher
//!
//! ## Usage
//!
//! ```ignore
//! use pc_01_item_provenance::{ChaincodeDispatcher, LedgerConfig, ProvenanceService};
//!
//! let service = ProvenanceService::new_in_memory(LedgerConfig::default());
//! let mut ledger = ChaincodeDispatcher::new(service);
//!
//! ledger.invoke("init", &[])?;
//! ledger.invoke("createItem", &args(["I1", "MANUFACTURER", "0001", "2016-05-01", "Penang"]))?;
//! let item = ledger.query("getItemDetailsWithID", &args(["I1"]))?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use domain::entities::{Item, ItemIndex, ItemList, Transaction};
pub use domain::errors::{ErrorKind, KVStoreError, ProvenanceError, SerializationError};
pub use domain::requests::{
    ChangeStatusRequest, ConfirmOwnershipRequest, CreateItemRequest, EventStamp, ScanRequest,
    TransferOwnershipRequest,
};
pub use domain::value_objects::{
    ItemStatus, LedgerConfig, Role, TransactionType, INDEX_KEY, UNKNOWN_OWNER,
};
pub use ports::inbound::{ProvenanceApi, ProvenanceQueryApi};
pub use ports::outbound::{KeyValueStore, RecordSerializer};
pub use service::{ProvenanceDependencies, ProvenanceService};

pub use adapters::{
    ChaincodeDispatcher, DispatchError, FileBackedKVStore, InMemoryKVStore, JsonRecordSerializer,
};

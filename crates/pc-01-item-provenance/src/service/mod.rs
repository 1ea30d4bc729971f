//! # Provenance Service
//!
//! The application service implementing `ProvenanceApi` and
//! `ProvenanceQueryApi`.
//!
//! ## Architecture
//!
//! This service:
//! 1. Runs authorization before every mutation
//! 2. Delegates record changes to the state machine
//! 3. Verifies domain invariants before committing
//! 4. Owns the only code paths that write item records and the item index
//!
//! Store access goes through injected `KeyValueStore` and `RecordSerializer`
//! implementations.

mod mutations;
mod queries;
mod records;

use crate::adapters::{InMemoryKVStore, JsonRecordSerializer};
use crate::domain::value_objects::LedgerConfig;
use crate::ports::outbound::{KeyValueStore, RecordSerializer};

/// The Provenance Service.
pub struct ProvenanceService<KV, RS>
where
    KV: KeyValueStore,
    RS: RecordSerializer,
{
    /// Key-value store holding item records and the index.
    pub(crate) kv_store: KV,
    /// Record encoding.
    pub(crate) serializer: RS,
    /// Ledger configuration.
    pub(crate) config: LedgerConfig,
}

/// Dependencies for ProvenanceService
pub struct ProvenanceDependencies<KV, RS> {
    pub kv_store: KV,
    pub serializer: RS,
}

impl<KV, RS> ProvenanceService<KV, RS>
where
    KV: KeyValueStore,
    RS: RecordSerializer,
{
    /// Create a service over the given dependencies.
    ///
    /// Nothing is read at construction. A store that already holds an index
    /// is ready for use; a fresh store needs `initialize` first.
    pub fn new(deps: ProvenanceDependencies<KV, RS>, config: LedgerConfig) -> Self {
        Self {
            kv_store: deps.kv_store,
            serializer: deps.serializer,
            config,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &KV {
        &self.kv_store
    }

    /// Consume the service, returning its store.
    pub fn into_store(self) -> KV {
        self.kv_store
    }
}

impl ProvenanceService<InMemoryKVStore, JsonRecordSerializer> {
    /// Service over a fresh in-memory store.
    pub fn new_in_memory(config: LedgerConfig) -> Self {
        Self::new(
            ProvenanceDependencies {
                kv_store: InMemoryKVStore::new(),
                serializer: JsonRecordSerializer,
            },
            config,
        )
    }
}

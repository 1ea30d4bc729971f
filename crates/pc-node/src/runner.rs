//! # Ledger Runner
//!
//! Wires the file-backed store, the JSON serializer and the provenance
//! service behind a chaincode dispatcher, then runs one call.

use crate::config::NodeConfig;
use pc_01_item_provenance::{
    ChaincodeDispatcher, DispatchError, FileBackedKVStore, JsonRecordSerializer, KVStoreError,
    LedgerConfig, ProvenanceDependencies, ProvenanceService,
};
use thiserror::Error;

/// Dispatcher over the on-disk ledger.
pub type FileLedger =
    ChaincodeDispatcher<ProvenanceService<FileBackedKVStore, JsonRecordSerializer>>;

/// One call against the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    /// Mutation routed through `invoke`.
    Invoke { function: String, args: Vec<String> },
    /// Read routed through `query`.
    Query { function: String, args: Vec<String> },
}

impl LedgerCall {
    pub fn function(&self) -> &str {
        match self {
            LedgerCall::Invoke { function, .. } | LedgerCall::Query { function, .. } => function,
        }
    }
}

/// Failures while running a call.
#[derive(Debug, Error)]
pub enum RunError {
    /// The ledger file could not be opened.
    #[error("failed to open ledger: {0}")]
    Store(#[from] KVStoreError),
    /// The dispatcher rejected the call.
    #[error("{0}")]
    Dispatch(#[from] DispatchError),
}

/// Open the ledger named by `config`.
pub fn open_ledger(config: &NodeConfig) -> Result<FileLedger, KVStoreError> {
    let path = config.store_path();
    let kv_store = FileBackedKVStore::open(&path)?;
    tracing::info!("Opened ledger at {}", path.display());

    let service = ProvenanceService::new(
        ProvenanceDependencies {
            kv_store,
            serializer: JsonRecordSerializer,
        },
        LedgerConfig::default(),
    );
    Ok(ChaincodeDispatcher::new(service))
}

/// Run `call` against `ledger`, returning the response payload.
pub fn run_call(ledger: &mut FileLedger, call: &LedgerCall) -> Result<Vec<u8>, DispatchError> {
    match call {
        LedgerCall::Invoke { function, args } => ledger.invoke(function, args),
        LedgerCall::Query { function, args } => ledger.query(function, args),
    }
}

/// Open the ledger and run a single call.
pub fn execute(config: &NodeConfig, call: &LedgerCall) -> Result<Vec<u8>, RunError> {
    let mut ledger = open_ledger(config)?;
    let payload = run_call(&mut ledger, call)?;
    tracing::debug!("{} returned {} bytes", call.function(), payload.len());
    Ok(payload)
}

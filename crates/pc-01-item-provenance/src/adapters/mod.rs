//! # Adapters Module
//!
//! Adapter implementations for the Item Provenance subsystem.
//!
//! ## Modules
//!
//! - `storage`: `KeyValueStore` implementations (in-memory, file-backed)
//! - `serializer`: `RecordSerializer` implementations (JSON)
//! - `dispatch`: function-name router for invoke/query requests

pub mod dispatch;
pub mod serializer;
pub mod storage;

pub use dispatch::{ChaincodeDispatcher, DispatchError};
pub use serializer::JsonRecordSerializer;
pub use storage::{FileBackedKVStore, InMemoryKVStore};

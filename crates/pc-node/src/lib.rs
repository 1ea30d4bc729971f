//! # Provenance Node
//!
//! Command-line host for the item provenance ledger.
//!
//! ## Flow
//!
//! ```text
//! argv → NodeConfig (defaults → env → flags) → FileBackedKVStore
//!      → ProvenanceService → ChaincodeDispatcher → invoke/query → JSON on stdout
//! ```
//!
//! Each process runs exactly one call and exits. The ledger file is
//! rewritten on every committed mutation, and is locked while open, so an
//! overlapping call fails with `AlreadyLocked` instead of losing writes.

pub mod config;
pub mod runner;

pub use config::{load_config, ConfigError, NodeConfig};
pub use runner::{execute, open_ledger, run_call, FileLedger, LedgerCall, RunError};

//! # Domain Errors
//!
//! Error types for the Item Provenance subsystem.
//!
//! Every error is terminal for the request that raised it and is raised
//! before any store write. `ErrorKind` folds the concrete variants into the
//! categories callers branch on.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by provenance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvenanceError {
    /// Positional argument list has the wrong length.
    #[error("incorrect number of arguments for {operation}: expected {expected}, got {actual}")]
    WrongArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An argument is present but unusable.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// `createItem` for an identifier that already has a record.
    #[error("item {id} already exists")]
    ItemExists { id: String },

    /// Operation attempted before `init`.
    #[error("ledger is not initialized: run init first")]
    NotInitialized,

    /// `init` attempted on a ledger that already has an index.
    #[error("ledger is already initialized")]
    AlreadyInitialized,

    /// Dispatcher received a function name it does not route.
    #[error("received unknown function invocation: {name}")]
    UnknownFunction { name: String },

    /// No record for this identifier.
    #[error("item {id} not found")]
    ItemNotFound { id: String },

    /// No indexed item carries this barcode.
    #[error("no item with barcode {barcode}")]
    BarcodeNotFound { barcode: String },

    /// Declared role may not create items.
    #[error("role {role} is not allowed to create a new item")]
    RoleNotPermitted { role: String },

    /// Caller is not the item's current owner.
    #[error("{caller} is not allowed to {action} item {id}")]
    NotCurrentOwner {
        id: String,
        caller: String,
        action: &'static str,
    },

    /// Requested status is not counterfeit, stolen or sold.
    #[error("incorrect status change to {requested}: new status must be counterfeit, stolen or sold")]
    DisallowedStatus { requested: String },

    /// A computed record would break a history or counter invariant.
    #[error("invariant violated for item {id}: {reason}")]
    InvariantViolation { id: String, reason: &'static str },

    /// Store I/O failure.
    #[error("database error: {message}")]
    DatabaseError { message: String },

    /// Record could not be encoded or decoded.
    #[error("serialization error: {message}")]
    SerializationError { message: String },
}

impl ProvenanceError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProvenanceError::WrongArgumentCount { .. }
            | ProvenanceError::InvalidArgument { .. }
            | ProvenanceError::ItemExists { .. }
            | ProvenanceError::NotInitialized
            | ProvenanceError::AlreadyInitialized
            | ProvenanceError::UnknownFunction { .. } => ErrorKind::Validation,
            ProvenanceError::ItemNotFound { .. } | ProvenanceError::BarcodeNotFound { .. } => {
                ErrorKind::NotFound
            }
            ProvenanceError::RoleNotPermitted { .. } | ProvenanceError::NotCurrentOwner { .. } => {
                ErrorKind::Authorization
            }
            ProvenanceError::DisallowedStatus { .. }
            | ProvenanceError::InvariantViolation { .. } => ErrorKind::InvalidTransition,
            ProvenanceError::DatabaseError { .. } | ProvenanceError::SerializationError { .. } => {
                ErrorKind::Storage
            }
        }
    }

    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        ProvenanceError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Error categories exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "ValidationError")]
    Validation,
    #[serde(rename = "NotFoundError")]
    NotFound,
    #[serde(rename = "AuthorizationError")]
    Authorization,
    #[serde(rename = "InvalidTransitionError")]
    InvalidTransition,
    #[serde(rename = "StorageError")]
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::Authorization => "AuthorizationError",
            ErrorKind::InvalidTransition => "InvalidTransitionError",
            ErrorKind::Storage => "StorageError",
        };
        f.write_str(name)
    }
}

/// Key-value store errors.
#[derive(Debug, Clone, Error)]
pub enum KVStoreError {
    /// I/O error during read/write.
    #[error("KV store I/O error: {message}")]
    IOError { message: String },
    /// Persisted data could not be read back.
    #[error("KV store corruption: {message}")]
    CorruptionError { message: String },
    /// Another handle holds the store's exclusive lock.
    #[error("KV store already in use ({path})")]
    AlreadyLocked { path: String },
}

impl From<KVStoreError> for ProvenanceError {
    fn from(err: KVStoreError) -> Self {
        ProvenanceError::DatabaseError {
            message: err.to_string(),
        }
    }
}

/// Serialization errors.
#[derive(Debug, Clone, Error)]
#[error("serialization error: {message}")]
pub struct SerializationError {
    pub message: String,
}

impl From<SerializationError> for ProvenanceError {
    fn from(err: SerializationError) -> Self {
        ProvenanceError::SerializationError {
            message: err.message,
        }
    }
}

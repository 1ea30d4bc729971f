//! # Domain Layer
//!
//! Pure domain logic for the Item Provenance subsystem.
//! No I/O happens here; storage is reached through `ports`.
//!
//! ## Modules
//!
//! - `value_objects` - Roles, statuses, transaction types, configuration
//! - `entities` - `Item`, `Transaction`, `ItemIndex`
//! - `requests` - Positional argument decoding into typed requests
//! - `authorization` - Who may mutate what
//! - `state_machine` - Custody transitions
//! - `invariants` - Checks run before every commit
//! - `errors` - Domain error types

pub mod authorization;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod requests;
pub mod state_machine;
pub mod value_objects;

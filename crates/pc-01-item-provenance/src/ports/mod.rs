//! # Ports Layer
//!
//! Hexagonal architecture ports for the Item Provenance subsystem.
//!
//! - **Driving Ports (Inbound)**: mutation and query APIs consumed by the
//!   dispatcher and embedding applications
//! - **Driven Ports (Outbound)**: key-value store and record serializer
//!   implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

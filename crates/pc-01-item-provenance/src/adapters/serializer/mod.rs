//! Serializer Adapters
//!
//! Implementations of the `RecordSerializer` trait.

mod json;

pub use self::json::JsonRecordSerializer;

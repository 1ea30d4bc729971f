//! # Requests
//!
//! Typed forms of the positional mutation requests.
//!
//! | Function | Arguments |
//! |----------|-----------|
//! | `createItem` | id, manufacturerIdentity, barcode, date, location |
//! | `transferOwnership` | id, callerIdentity, date, location, newOwner |
//! | `confirmOwnership` | id, callerIdentity, date, location, isRetailer (`TRUE`/`FALSE`) |
//! | `changeStatus` | id, callerIdentity, date, location, newStatus |
//! | `addScanCount` | id |
//!
//! Decoding checks argument count and shape only. Authorization and
//! existence checks belong to the service.

use crate::domain::errors::ProvenanceError;
use crate::domain::value_objects::ItemStatus;

/// Where and when a custody event happened. Free-form, not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStamp {
    pub date: String,
    pub location: String,
}

impl EventStamp {
    pub fn new(date: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            location: location.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    pub id: String,
    /// Declared role; also recorded as manufacturer and first owner.
    pub manufacturer: String,
    pub barcode: String,
    pub stamp: EventStamp,
}

impl CreateItemRequest {
    pub const OPERATION: &'static str = "createItem";

    pub fn from_args(args: &[String]) -> Result<Self, ProvenanceError> {
        let [id, manufacturer, barcode, date, location] = positional::<5>(Self::OPERATION, args)?;
        Ok(Self {
            id: identifier(id)?,
            manufacturer: manufacturer.clone(),
            barcode: barcode.clone(),
            stamp: EventStamp::new(date.as_str(), location.as_str()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOwnershipRequest {
    pub id: String,
    pub caller: String,
    pub new_owner: String,
    pub stamp: EventStamp,
}

impl TransferOwnershipRequest {
    pub const OPERATION: &'static str = "transferOwnership";

    pub fn from_args(args: &[String]) -> Result<Self, ProvenanceError> {
        let [id, caller, date, location, new_owner] = positional::<5>(Self::OPERATION, args)?;
        if new_owner.is_empty() {
            return Err(ProvenanceError::invalid_argument(
                "newOwner",
                "must not be empty",
            ));
        }
        Ok(Self {
            id: identifier(id)?,
            caller: caller.clone(),
            new_owner: new_owner.clone(),
            stamp: EventStamp::new(date.as_str(), location.as_str()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOwnershipRequest {
    pub id: String,
    pub caller: String,
    /// Caller confirms as a retailer (`TRUE`) rather than an end holder.
    pub as_retailer: bool,
    pub stamp: EventStamp,
}

impl ConfirmOwnershipRequest {
    pub const OPERATION: &'static str = "confirmOwnership";

    pub fn from_args(args: &[String]) -> Result<Self, ProvenanceError> {
        let [id, caller, date, location, flag] = positional::<5>(Self::OPERATION, args)?;
        let as_retailer = match flag.as_str() {
            "TRUE" => true,
            "FALSE" => false,
            other => {
                return Err(ProvenanceError::invalid_argument(
                    "isRetailer",
                    format!("expected TRUE or FALSE, got {:?}", other),
                ))
            }
        };
        Ok(Self {
            id: identifier(id)?,
            caller: caller.clone(),
            as_retailer,
            stamp: EventStamp::new(date.as_str(), location.as_str()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStatusRequest {
    pub id: String,
    pub caller: String,
    /// Requested status as sent. Checked against the flag set only after
    /// the caller is authorized, so every bad status fails the same way.
    pub new_status: String,
    pub stamp: EventStamp,
}

impl ChangeStatusRequest {
    pub const OPERATION: &'static str = "changeStatus";

    pub fn from_args(args: &[String]) -> Result<Self, ProvenanceError> {
        let [id, caller, date, location, status] = positional::<5>(Self::OPERATION, args)?;
        Ok(Self {
            id: identifier(id)?,
            caller: caller.clone(),
            new_status: status.clone(),
            stamp: EventStamp::new(date.as_str(), location.as_str()),
        })
    }

    /// The requested status, if it names one. Unknown names are
    /// `DisallowedStatus`, the same as a known non-flag status.
    pub fn parsed_status(&self) -> Result<ItemStatus, ProvenanceError> {
        self.new_status
            .parse::<ItemStatus>()
            .map_err(|_| ProvenanceError::DisallowedStatus {
                requested: self.new_status.clone(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub id: String,
}

impl ScanRequest {
    pub const OPERATION: &'static str = "addScanCount";

    pub fn from_args(args: &[String]) -> Result<Self, ProvenanceError> {
        let [id] = positional::<1>(Self::OPERATION, args)?;
        Ok(Self { id: identifier(id)? })
    }
}

/// Borrow exactly `N` positional arguments.
pub(crate) fn positional<'a, const N: usize>(
    operation: &'static str,
    args: &'a [String],
) -> Result<[&'a String; N], ProvenanceError> {
    if args.len() != N {
        return Err(ProvenanceError::WrongArgumentCount {
            operation,
            expected: N,
            actual: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| &args[i]))
}

fn identifier(id: &str) -> Result<String, ProvenanceError> {
    if id.is_empty() {
        return Err(ProvenanceError::invalid_argument("id", "must not be empty"));
    }
    Ok(id.to_string())
}

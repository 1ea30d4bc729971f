//! # Inbound Ports (Driving Ports)
//!
//! The public APIs of the Item Provenance subsystem.

use crate::domain::entities::Item;
use crate::domain::errors::ProvenanceError;
use crate::domain::requests::{
    ChangeStatusRequest, ConfirmOwnershipRequest, CreateItemRequest, ScanRequest,
    TransferOwnershipRequest,
};
use crate::domain::value_objects::ItemStatus;

/// Custody mutations.
///
/// Every operation either commits exactly the documented change or fails
/// without writing anything. All but `initialize` fail with
/// `NotInitialized` until `initialize` has run.
pub trait ProvenanceApi {
    /// Create the empty item index.
    ///
    /// ## Errors
    ///
    /// - `AlreadyInitialized`: an index already exists
    fn initialize(&mut self) -> Result<(), ProvenanceError>;

    /// Create a new item owned by its manufacturer.
    ///
    /// ## Errors
    ///
    /// - `RoleNotPermitted`: declared role is not the manufacturer role
    /// - `ItemExists`: identifier already has a record
    /// - `InvalidArgument`: identifier collides with a reserved key
    fn create_item(&mut self, request: CreateItemRequest) -> Result<Item, ProvenanceError>;

    /// Hand an item to a new, unconfirmed owner.
    ///
    /// ## Errors
    ///
    /// - `ItemNotFound`
    /// - `NotCurrentOwner`
    fn transfer_ownership(
        &mut self,
        request: TransferOwnershipRequest,
    ) -> Result<Item, ProvenanceError>;

    /// Acknowledge custody as retailer or end holder.
    ///
    /// ## Errors
    ///
    /// - `ItemNotFound`
    /// - `NotCurrentOwner`
    fn confirm_ownership(
        &mut self,
        request: ConfirmOwnershipRequest,
    ) -> Result<Item, ProvenanceError>;

    /// Flag an item as counterfeit, stolen or sold.
    ///
    /// ## Errors
    ///
    /// - `ItemNotFound`
    /// - `NotCurrentOwner`
    /// - `DisallowedStatus`: target is not a flag status
    fn change_status(&mut self, request: ChangeStatusRequest) -> Result<Item, ProvenanceError>;

    /// Count a retail scan. Items not at a retailer are returned unchanged.
    ///
    /// ## Errors
    ///
    /// - `ItemNotFound`
    fn add_scan_count(&mut self, request: ScanRequest) -> Result<Item, ProvenanceError>;
}

/// Read-only projections.
///
/// List queries walk the whole index in insertion order.
pub trait ProvenanceQueryApi {
    /// Full record including history.
    fn item_details(&self, id: &str) -> Result<Item, ProvenanceError>;

    /// First indexed item with this barcode, full record.
    fn item_by_barcode(&self, barcode: &str) -> Result<Item, ProvenanceError>;

    /// Items `owner` currently holds or manufactured, without history.
    fn owner_items(&self, owner: &str) -> Result<Vec<Item>, ProvenanceError>;

    /// Items `owner` currently holds in `status`, without history.
    ///
    /// Manufacturer identity alone does not match here.
    fn owner_items_by_status(
        &self,
        owner: &str,
        status: ItemStatus,
    ) -> Result<Vec<Item>, ProvenanceError>;

    /// Items `owner` currently holds or manufactured, with history.
    fn owner_items_with_history(&self, owner: &str) -> Result<Vec<Item>, ProvenanceError>;

    /// Every registered identifier in insertion order.
    fn item_ids(&self) -> Result<Vec<String>, ProvenanceError>;
}

//! # Provenance API Implementation
//!
//! Implements the `ProvenanceApi` trait. Each operation performs all of its
//! reads and checks first and writes last.

use super::*;
use crate::domain::authorization::{self, OwnerAction};
use crate::domain::entities::{Item, ItemIndex};
use crate::domain::errors::ProvenanceError;
use crate::domain::invariants;
use crate::domain::requests::{
    ChangeStatusRequest, ConfirmOwnershipRequest, CreateItemRequest, ScanRequest,
    TransferOwnershipRequest,
};
use crate::domain::state_machine::{self, Outcome, Transition};
use crate::ports::inbound::ProvenanceApi;

impl<KV, RS> ProvenanceService<KV, RS>
where
    KV: KeyValueStore,
    RS: RecordSerializer,
{
    /// Authorize, compute and commit an owner-gated transition.
    ///
    /// `transition` is built only once the caller is authorized, so request
    /// checks it performs never take precedence over ownership.
    fn apply_owner_transition<F>(
        &mut self,
        id: &str,
        caller: &str,
        action: OwnerAction,
        transition: F,
    ) -> Result<Item, ProvenanceError>
    where
        F: FnOnce() -> Result<Transition, ProvenanceError>,
    {
        self.ensure_initialized()?;
        let item = self.load_item(id)?;

        if let Err(e) =
            authorization::authorize_owner_action(&item, caller, action, &self.config.unknown_owner)
        {
            tracing::warn!("[pc-01] Rejected {:?} on item {}: {}", action, id, e);
            return Err(e);
        }

        let transition = transition()?;
        self.commit_transition(item, &transition)
    }

    fn commit_transition(
        &mut self,
        item: Item,
        transition: &Transition,
    ) -> Result<Item, ProvenanceError> {
        match state_machine::apply(&item, transition)? {
            Outcome::Updated(next) => {
                invariants::verify_transition(&item, &next)?;
                self.store_item(&next)?;
                Ok(next)
            }
            Outcome::Unchanged => Ok(item),
        }
    }
}

impl<KV, RS> ProvenanceApi for ProvenanceService<KV, RS>
where
    KV: KeyValueStore,
    RS: RecordSerializer,
{
    fn initialize(&mut self) -> Result<(), ProvenanceError> {
        if self.is_initialized()? {
            return Err(ProvenanceError::AlreadyInitialized);
        }
        self.store_index(&ItemIndex::new())?;
        tracing::info!(
            "[pc-01] Ledger initialized (index key {:?})",
            self.config.index_key
        );
        Ok(())
    }

    fn create_item(&mut self, request: CreateItemRequest) -> Result<Item, ProvenanceError> {
        self.ensure_initialized()?;

        if let Err(e) = authorization::authorize_create(&request.manufacturer) {
            tracing::warn!("[pc-01] Rejected create of item {}: {}", request.id, e);
            return Err(e);
        }
        if self.config.is_reserved_key(&request.id) {
            return Err(ProvenanceError::invalid_argument(
                "id",
                format!("{:?} is a reserved key", request.id),
            ));
        }
        if self.item_exists(&request.id)? {
            return Err(ProvenanceError::ItemExists { id: request.id });
        }

        let item = state_machine::create(&request);
        invariants::verify_creation(&item)?;

        // Record first, then index. A failure in between leaves a record
        // reachable by id only; a retried create then reports ItemExists.
        self.store_item(&item)?;
        self.register_item_id(&item.id)?;

        tracing::info!(
            "[pc-01] 📦 Created item {} (manufacturer {}, barcode {})",
            item.id,
            item.manufacturer,
            item.barcode
        );
        Ok(item)
    }

    fn transfer_ownership(
        &mut self,
        request: TransferOwnershipRequest,
    ) -> Result<Item, ProvenanceError> {
        if request.new_owner == self.config.unknown_owner {
            return Err(ProvenanceError::invalid_argument(
                "newOwner",
                "cannot transfer to the unknown-owner sentinel",
            ));
        }
        let item = self.apply_owner_transition(
            &request.id,
            &request.caller,
            OwnerAction::Transfer,
            || {
                Ok(Transition::Transfer {
                    new_owner: request.new_owner,
                    stamp: request.stamp,
                })
            },
        )?;
        tracing::info!(
            "[pc-01] Item {} in transit: {} → {} (unconfirmed)",
            item.id,
            request.caller,
            item.current_owner
        );
        Ok(item)
    }

    fn confirm_ownership(
        &mut self,
        request: ConfirmOwnershipRequest,
    ) -> Result<Item, ProvenanceError> {
        let item = self.apply_owner_transition(
            &request.id,
            &request.caller,
            OwnerAction::Confirm,
            || {
                Ok(Transition::Confirm {
                    as_retailer: request.as_retailer,
                    stamp: request.stamp,
                })
            },
        )?;
        tracing::info!(
            "[pc-01] ✓ Item {} confirmed by {} ({})",
            item.id,
            item.current_owner,
            item.status
        );
        Ok(item)
    }

    fn change_status(&mut self, request: ChangeStatusRequest) -> Result<Item, ProvenanceError> {
        let unknown_owner = self.config.unknown_owner.clone();
        let item = self.apply_owner_transition(
            &request.id,
            &request.caller,
            OwnerAction::ChangeStatus,
            || {
                Ok(Transition::ChangeStatus {
                    new_status: request.parsed_status()?,
                    unknown_owner,
                    stamp: request.stamp.clone(),
                })
            },
        )?;
        tracing::info!(
            "[pc-01] ⚠ Item {} flagged {} by {}",
            item.id,
            item.status,
            request.caller
        );
        Ok(item)
    }

    fn add_scan_count(&mut self, request: ScanRequest) -> Result<Item, ProvenanceError> {
        self.ensure_initialized()?;
        let item = self.load_item(&request.id)?;
        let before = item.scan_count;

        let item = self.commit_transition(item, &Transition::Scan)?;
        if item.scan_count == before {
            tracing::debug!(
                "[pc-01] Scan of item {} ignored (status {})",
                item.id,
                item.status
            );
        } else {
            tracing::debug!("[pc-01] Item {} scan count {}", item.id, item.scan_count);
        }
        Ok(item)
    }
}

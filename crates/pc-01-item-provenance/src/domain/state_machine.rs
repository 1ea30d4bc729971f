//! # Provenance State Machine
//!
//! Computes the next record for a custody transition. Callers run the
//! authorization rules first; this module never reads or writes storage.
//!
//! | Transition | New owner | New status | Appends |
//! |------------|-----------|------------|---------|
//! | create | manufacturer | VERIFIED | CREATE |
//! | transfer | target | IN OWNERSHIP TRANSIT | TRANSFER |
//! | confirm | unchanged | RETAILER if retailer else VERIFIED | CONFIRM |
//! | change status | unknown-owner sentinel | flag | CHANGE STATUS |
//! | scan | unchanged | unchanged | nothing |
//!
//! The input record is never mutated; a copy is returned.

use crate::domain::entities::{Item, Transaction};
use crate::domain::errors::ProvenanceError;
use crate::domain::requests::{CreateItemRequest, EventStamp};
use crate::domain::value_objects::{ItemStatus, TransactionType};

/// A requested change to an existing item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Transfer {
        new_owner: String,
        stamp: EventStamp,
    },
    Confirm {
        as_retailer: bool,
        stamp: EventStamp,
    },
    ChangeStatus {
        new_status: ItemStatus,
        unknown_owner: String,
        stamp: EventStamp,
    },
    Scan,
}

/// Result of applying a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Record changed and must be committed.
    Updated(Item),
    /// Nothing to commit.
    Unchanged,
}

/// Build the initial record for a new item.
pub fn create(request: &CreateItemRequest) -> Item {
    let mut item = Item {
        id: request.id.clone(),
        current_owner: request.manufacturer.clone(),
        manufacturer: request.manufacturer.clone(),
        barcode: request.barcode.clone(),
        status: ItemStatus::Verified,
        scan_count: 0,
        transactions: Vec::with_capacity(1),
    };
    item.record(entry(
        TransactionType::Create,
        &request.manufacturer,
        &request.stamp,
    ));
    item
}

/// Apply `transition` to `item`.
pub fn apply(item: &Item, transition: &Transition) -> Result<Outcome, ProvenanceError> {
    match transition {
        Transition::Transfer { new_owner, stamp } => {
            let mut next = item.clone();
            next.current_owner = new_owner.clone();
            next.status = ItemStatus::InOwnershipTransit;
            next.record(entry(TransactionType::Transfer, new_owner, stamp));
            Ok(Outcome::Updated(next))
        }
        Transition::Confirm { as_retailer, stamp } => {
            let mut next = item.clone();
            next.status = if *as_retailer {
                ItemStatus::Retailer
            } else {
                ItemStatus::Verified
            };
            let owner = next.current_owner.clone();
            next.record(entry(TransactionType::Confirm, &owner, stamp));
            Ok(Outcome::Updated(next))
        }
        Transition::ChangeStatus {
            new_status,
            unknown_owner,
            stamp,
        } => {
            if !new_status.is_flag() {
                return Err(ProvenanceError::DisallowedStatus {
                    requested: new_status.to_string(),
                });
            }
            let mut next = item.clone();
            next.status = *new_status;
            next.current_owner = unknown_owner.clone();
            next.record(entry(TransactionType::ChangeStatus, unknown_owner, stamp));
            Ok(Outcome::Updated(next))
        }
        Transition::Scan => {
            if item.status != ItemStatus::Retailer {
                return Ok(Outcome::Unchanged);
            }
            let mut next = item.clone();
            next.scan_count = next.scan_count.saturating_add(1);
            Ok(Outcome::Updated(next))
        }
    }
}

fn entry(transaction_type: TransactionType, new_owner: &str, stamp: &EventStamp) -> Transaction {
    Transaction {
        transaction_type,
        new_owner: new_owner.to_string(),
        location: stamp.location.clone(),
        date: stamp.date.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::UNKNOWN_OWNER;
    use crate::test_utils::{make_item, stamp};

    fn updated(outcome: Outcome) -> Item {
        match outcome {
            Outcome::Updated(item) => item,
            Outcome::Unchanged => panic!("Expected Updated"),
        }
    }

    #[test]
    fn test_create_starts_verified_with_one_entry() {
        let item = make_item("I1", "MANUFACTURER");

        assert_eq!(item.status, ItemStatus::Verified);
        assert_eq!(item.current_owner, "MANUFACTURER");
        assert_eq!(item.manufacturer, "MANUFACTURER");
        assert_eq!(item.scan_count, 0);
        assert_eq!(item.transactions.len(), 1);
        assert_eq!(
            item.transactions[0].transaction_type,
            TransactionType::Create
        );
        assert_eq!(item.transactions[0].new_owner, "MANUFACTURER");
    }

    #[test]
    fn test_transfer_sets_transit() {
        let item = make_item("I1", "MANUFACTURER");
        let next = updated(
            apply(
                &item,
                &Transition::Transfer {
                    new_owner: "R1".into(),
                    stamp: stamp(),
                },
            )
            .unwrap(),
        );

        assert_eq!(next.current_owner, "R1");
        assert_eq!(next.status, ItemStatus::InOwnershipTransit);
        assert_eq!(next.transactions.len(), 2);
        assert_eq!(next.transactions[1].new_owner, "R1");

        // Input untouched
        assert_eq!(item.transactions.len(), 1);
    }

    #[test]
    fn test_confirm_status_follows_retailer_flag() {
        let item = make_item("I1", "MANUFACTURER");

        let as_retailer = updated(
            apply(
                &item,
                &Transition::Confirm {
                    as_retailer: true,
                    stamp: stamp(),
                },
            )
            .unwrap(),
        );
        assert_eq!(as_retailer.status, ItemStatus::Retailer);

        let as_holder = updated(
            apply(
                &item,
                &Transition::Confirm {
                    as_retailer: false,
                    stamp: stamp(),
                },
            )
            .unwrap(),
        );
        assert_eq!(as_holder.status, ItemStatus::Verified);
        assert_eq!(
            as_holder.last_transaction().unwrap().transaction_type,
            TransactionType::Confirm
        );
        assert_eq!(as_holder.last_transaction().unwrap().new_owner, "MANUFACTURER");
    }

    #[test]
    fn test_change_status_requires_flag() {
        let item = make_item("I1", "MANUFACTURER");

        for status in [
            ItemStatus::Verified,
            ItemStatus::Retailer,
            ItemStatus::InOwnershipTransit,
        ] {
            let result = apply(
                &item,
                &Transition::ChangeStatus {
                    new_status: status,
                    unknown_owner: UNKNOWN_OWNER.into(),
                    stamp: stamp(),
                },
            );
            assert!(matches!(
                result,
                Err(ProvenanceError::DisallowedStatus { .. })
            ));
        }
    }

    #[test]
    fn test_change_status_clears_owner() {
        let item = make_item("I1", "MANUFACTURER");

        for status in ItemStatus::FLAGS {
            let next = updated(
                apply(
                    &item,
                    &Transition::ChangeStatus {
                        new_status: status,
                        unknown_owner: UNKNOWN_OWNER.into(),
                        stamp: stamp(),
                    },
                )
                .unwrap(),
            );
            assert_eq!(next.status, status);
            assert_eq!(next.current_owner, UNKNOWN_OWNER);
            assert_eq!(next.last_transaction().unwrap().new_owner, UNKNOWN_OWNER);
        }
    }

    #[test]
    fn test_scan_only_counts_at_retailer() {
        let mut item = make_item("I1", "MANUFACTURER");
        assert_eq!(apply(&item, &Transition::Scan).unwrap(), Outcome::Unchanged);

        item.status = ItemStatus::Retailer;
        let next = updated(apply(&item, &Transition::Scan).unwrap());
        assert_eq!(next.scan_count, 1);
        assert_eq!(next.transactions.len(), item.transactions.len());
    }
}

//! # Domain Invariants
//!
//! Checked on every computed record before it is committed.
//!
//! - Identity fields (`id`, `manufacturer`, `barcode`) never change
//! - History is non-empty and append-only
//! - Scan count never decreases

use crate::domain::entities::Item;
use crate::domain::errors::ProvenanceError;

/// Identity fields are unchanged.
#[must_use]
pub fn check_identity_fixed(before: &Item, after: &Item) -> bool {
    before.id == after.id
        && before.manufacturer == after.manufacturer
        && before.barcode == after.barcode
}

/// `after` history extends `before` history without rewriting it.
#[must_use]
pub fn check_history_append_only(before: &Item, after: &Item) -> bool {
    after.transactions.len() >= before.transactions.len()
        && after.transactions.starts_with(&before.transactions)
}

#[must_use]
pub fn check_history_non_empty(item: &Item) -> bool {
    !item.transactions.is_empty()
}

#[must_use]
pub fn check_scan_count_monotonic(before: &Item, after: &Item) -> bool {
    after.scan_count >= before.scan_count
}

/// Verify a transition from `before` to `after`.
pub fn verify_transition(before: &Item, after: &Item) -> Result<(), ProvenanceError> {
    let violation = if !check_identity_fixed(before, after) {
        Some("identity fields changed")
    } else if !check_history_append_only(before, after) {
        Some("transaction history rewritten")
    } else if !check_history_non_empty(after) {
        Some("transaction history empty")
    } else if !check_scan_count_monotonic(before, after) {
        Some("scan count decreased")
    } else {
        None
    };

    match violation {
        Some(reason) => Err(ProvenanceError::InvariantViolation {
            id: before.id.clone(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Verify a freshly created record.
pub fn verify_creation(item: &Item) -> Result<(), ProvenanceError> {
    if item.transactions.len() != 1 {
        return Err(ProvenanceError::InvariantViolation {
            id: item.id.clone(),
            reason: "new item must carry exactly one entry",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::make_item;

    #[test]
    fn test_valid_append_passes() {
        let before = make_item("I1", "MANUFACTURER");
        let mut after = before.clone();
        after.transactions.push(before.transactions[0].clone());

        assert!(verify_transition(&before, &after).is_ok());
    }

    #[test]
    fn test_truncated_history_rejected() {
        let before = make_item("I1", "MANUFACTURER");
        let mut after = before.clone();
        after.transactions.clear();

        let err = verify_transition(&before, &after).unwrap_err();
        assert_eq!(
            err,
            ProvenanceError::InvariantViolation {
                id: "I1".into(),
                reason: "transaction history rewritten",
            }
        );
    }

    #[test]
    fn test_reordered_history_rejected() {
        let mut before = make_item("I1", "MANUFACTURER");
        let mut second = before.transactions[0].clone();
        second.location = "elsewhere".into();
        before.transactions.push(second);

        let mut after = before.clone();
        after.transactions.reverse();

        assert!(!check_history_append_only(&before, &after));
    }

    #[test]
    fn test_identity_and_counter_checks() {
        let before = make_item("I1", "MANUFACTURER");

        let mut after = before.clone();
        after.barcode = "tampered".into();
        assert!(verify_transition(&before, &after).is_err());

        let mut before = before;
        before.scan_count = 3;
        let mut after = before.clone();
        after.scan_count = 2;
        assert!(verify_transition(&before, &after).is_err());
    }

    #[test]
    fn test_creation_check() {
        let item = make_item("I1", "MANUFACTURER");
        assert!(verify_creation(&item).is_ok());

        let empty = item.without_history();
        assert!(verify_creation(&empty).is_err());
    }
}

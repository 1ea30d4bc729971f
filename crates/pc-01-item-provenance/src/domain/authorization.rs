//! # Authorization Rules
//!
//! Pure predicates evaluated before any mutation.
//!
//! - Only the manufacturer role may create items.
//! - Only the current owner may transfer, confirm or flag an item.
//! - Nobody owns a flagged item: the unknown-owner sentinel is never a
//!   valid caller, even if presented verbatim.

use crate::domain::entities::Item;
use crate::domain::errors::ProvenanceError;
use crate::domain::value_objects::Role;

/// Owner-gated mutations, named for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerAction {
    Transfer,
    Confirm,
    ChangeStatus,
}

impl OwnerAction {
    pub const fn describe(&self) -> &'static str {
        match self {
            OwnerAction::Transfer => "transfer",
            OwnerAction::Confirm => "confirm ownership of",
            OwnerAction::ChangeStatus => "mark a new status on",
        }
    }
}

/// Check the declared role of a creating caller.
pub fn authorize_create(declared_role: &str) -> Result<Role, ProvenanceError> {
    match declared_role.parse::<Role>() {
        Ok(Role::Manufacturer) => Ok(Role::Manufacturer),
        _ => Err(ProvenanceError::RoleNotPermitted {
            role: declared_role.to_string(),
        }),
    }
}

/// Check that `caller` currently owns `item`.
pub fn authorize_owner_action(
    item: &Item,
    caller: &str,
    action: OwnerAction,
    unknown_owner: &str,
) -> Result<(), ProvenanceError> {
    if item.is_owned_by(caller) && caller != unknown_owner {
        return Ok(());
    }
    Err(ProvenanceError::NotCurrentOwner {
        id: item.id.clone(),
        caller: caller.to_string(),
        action: action.describe(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::UNKNOWN_OWNER;
    use crate::test_utils::make_item;

    #[test]
    fn test_only_manufacturer_creates() {
        assert_eq!(authorize_create("MANUFACTURER").unwrap(), Role::Manufacturer);

        for role in ["RETAILER", "CONSUMER", "M", ""] {
            let err = authorize_create(role).unwrap_err();
            assert!(matches!(err, ProvenanceError::RoleNotPermitted { .. }));
        }
    }

    #[test]
    fn test_owner_action_requires_current_owner() {
        let item = make_item("I1", "MANUFACTURER");

        assert!(
            authorize_owner_action(&item, "MANUFACTURER", OwnerAction::Transfer, UNKNOWN_OWNER)
                .is_ok()
        );

        let err = authorize_owner_action(&item, "X", OwnerAction::Transfer, UNKNOWN_OWNER)
            .unwrap_err();
        assert_eq!(
            err,
            ProvenanceError::NotCurrentOwner {
                id: "I1".into(),
                caller: "X".into(),
                action: "transfer",
            }
        );
    }

    #[test]
    fn test_sentinel_never_authorizes() {
        let mut item = make_item("I1", "MANUFACTURER");
        item.current_owner = UNKNOWN_OWNER.to_string();

        let result =
            authorize_owner_action(&item, UNKNOWN_OWNER, OwnerAction::Confirm, UNKNOWN_OWNER);
        assert!(result.is_err());
    }
}

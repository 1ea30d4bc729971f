//! # Value Objects
//!
//! Closed enumerations and configuration for the Item Provenance subsystem.
//!
//! Wire spellings match the ledger format already in use (`IN OWNERSHIP
//! TRANSIT`, `CHANGE STATUS`, ...). Parsing also accepts the underscore
//! spellings so callers may use either form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key under which the item index is persisted.
pub const INDEX_KEY: &str = "allItems";

/// Owner placeholder once an item has been flagged.
pub const UNKNOWN_OWNER: &str = "OWNER IS CURRENTLY UNKNOWN";

// =============================================================================
// ROLES
// =============================================================================

/// Participant roles known to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Manufacturer,
    Retailer,
    Consumer,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Manufacturer => "MANUFACTURER",
            Role::Retailer => "RETAILER",
            Role::Consumer => "CONSUMER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUFACTURER" => Ok(Role::Manufacturer),
            "RETAILER" => Ok(Role::Retailer),
            "CONSUMER" => Ok(Role::Consumer),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

// =============================================================================
// ITEM STATUS
// =============================================================================

/// Custody status of an item.
///
/// ```text
///            create
///              │
///              ↓
///          VERIFIED ←──confirm(FALSE)──┐
///              │                        │
///          transfer               IN OWNERSHIP TRANSIT ──confirm(TRUE)──→ RETAILER
///              └──────────────────────→ ↑                                    │
///                                       └──────────────transfer──────────────┘
///
///   any custody status ──change_status──→ POTENTIAL COUNTERFEIT | STOLEN | SOLD
/// ```
///
/// Flagged statuses have no way back: their owner is the unknown-owner
/// sentinel, which no caller can present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "VERIFIED")]
    Verified,
    #[serde(rename = "RETAILER")]
    Retailer,
    #[serde(rename = "IN OWNERSHIP TRANSIT", alias = "IN_OWNERSHIP_TRANSIT")]
    InOwnershipTransit,
    #[serde(rename = "POTENTIAL COUNTERFEIT", alias = "POTENTIAL_COUNTERFEIT")]
    PotentialCounterfeit,
    #[serde(rename = "STOLEN")]
    Stolen,
    #[serde(rename = "SOLD")]
    Sold,
}

impl ItemStatus {
    /// Statuses reachable through `changeStatus`.
    pub const FLAGS: [ItemStatus; 3] = [
        ItemStatus::PotentialCounterfeit,
        ItemStatus::Stolen,
        ItemStatus::Sold,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Verified => "VERIFIED",
            ItemStatus::Retailer => "RETAILER",
            ItemStatus::InOwnershipTransit => "IN OWNERSHIP TRANSIT",
            ItemStatus::PotentialCounterfeit => "POTENTIAL COUNTERFEIT",
            ItemStatus::Stolen => "STOLEN",
            ItemStatus::Sold => "SOLD",
        }
    }

    /// True for counterfeit/stolen/sold.
    pub const fn is_flag(&self) -> bool {
        matches!(
            self,
            ItemStatus::PotentialCounterfeit | ItemStatus::Stolen | ItemStatus::Sold
        )
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VERIFIED" => Ok(ItemStatus::Verified),
            "RETAILER" => Ok(ItemStatus::Retailer),
            "IN OWNERSHIP TRANSIT" | "IN_OWNERSHIP_TRANSIT" => Ok(ItemStatus::InOwnershipTransit),
            "POTENTIAL COUNTERFEIT" | "POTENTIAL_COUNTERFEIT" => {
                Ok(ItemStatus::PotentialCounterfeit)
            }
            "STOLEN" => Ok(ItemStatus::Stolen),
            "SOLD" => Ok(ItemStatus::Sold),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

// =============================================================================
// TRANSACTION TYPE
// =============================================================================

/// Kind of audit entry appended to an item's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    #[serde(rename = "CREATE")]
    Create,
    #[serde(rename = "TRANSFER")]
    Transfer,
    #[serde(rename = "CONFIRM")]
    Confirm,
    #[serde(rename = "CHANGE STATUS", alias = "CHANGE_STATUS")]
    ChangeStatus,
}

impl TransactionType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Create => "CREATE",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Confirm => "CONFIRM",
            TransactionType::ChangeStatus => "CHANGE STATUS",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names no variant of the target enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized value {:?}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Configuration for the provenance ledger.
///
/// Defaults reproduce the keys and sentinel of the existing ledger data, so
/// changing them only makes sense for a fresh store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Store key holding the item index (default: `allItems`).
    ///
    /// Item identifiers equal to this key are rejected.
    pub index_key: String,

    /// Owner recorded once an item is flagged.
    pub unknown_owner: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            index_key: INDEX_KEY.to_string(),
            unknown_owner: UNKNOWN_OWNER.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Set the store key for the item index.
    pub fn with_index_key(mut self, key: impl Into<String>) -> Self {
        self.index_key = key.into();
        self
    }

    /// Set the unknown-owner sentinel.
    pub fn with_unknown_owner(mut self, owner: impl Into<String>) -> Self {
        self.unknown_owner = owner.into();
        self
    }

    /// Whether `id` can never name an item: empty, or the index key.
    pub fn is_reserved_key(&self, id: &str) -> bool {
        id.is_empty() || id == self.index_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_both_spellings() {
        assert_eq!(
            "IN OWNERSHIP TRANSIT".parse::<ItemStatus>().unwrap(),
            ItemStatus::InOwnershipTransit
        );
        assert_eq!(
            "POTENTIAL_COUNTERFEIT".parse::<ItemStatus>().unwrap(),
            ItemStatus::PotentialCounterfeit
        );
        assert!("LOST".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ItemStatus::InOwnershipTransit).unwrap();
        assert_eq!(json, "\"IN OWNERSHIP TRANSIT\"");

        let parsed: ItemStatus = serde_json::from_str("\"IN_OWNERSHIP_TRANSIT\"").unwrap();
        assert_eq!(parsed, ItemStatus::InOwnershipTransit);
    }

    #[test]
    fn test_flag_set() {
        for status in ItemStatus::FLAGS {
            assert!(status.is_flag());
        }
        assert!(!ItemStatus::Verified.is_flag());
        assert!(!ItemStatus::Retailer.is_flag());
        assert!(!ItemStatus::InOwnershipTransit.is_flag());
    }

    #[test]
    fn test_transaction_type_wire_format() {
        let json = serde_json::to_string(&TransactionType::ChangeStatus).unwrap();
        assert_eq!(json, "\"CHANGE STATUS\"");
    }

    #[test]
    fn test_role_parsing_is_exact() {
        assert_eq!("MANUFACTURER".parse::<Role>().unwrap(), Role::Manufacturer);
        assert!("manufacturer".parse::<Role>().is_err());
    }

    #[test]
    fn test_reserved_key() {
        let config = LedgerConfig::default();
        assert!(config.is_reserved_key("allItems"));
        assert!(!config.is_reserved_key("I1"));
    }
}

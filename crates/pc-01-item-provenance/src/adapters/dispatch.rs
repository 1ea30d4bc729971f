//! # Chaincode Dispatcher
//!
//! Routes `(function, args)` pairs to the provenance service.
//!
//! ```text
//! caller → invoke/query(function, [String]) → ChaincodeDispatcher → ProvenanceApi / ProvenanceQueryApi
//! ```
//!
//! Mutations answer with an empty payload. Queries answer with the JSON
//! shapes the records are stored in; lists are wrapped as `{"items": [...]}`.
//! Every failure becomes a [`DispatchError`] carrying its category.

use crate::domain::entities::{Item, ItemList};
use crate::domain::errors::{ErrorKind, ProvenanceError};
use crate::domain::requests::{
    positional, ChangeStatusRequest, ConfirmOwnershipRequest, CreateItemRequest, ScanRequest,
    TransferOwnershipRequest,
};
use crate::domain::value_objects::ItemStatus;
use crate::ports::inbound::{ProvenanceApi, ProvenanceQueryApi};
use serde::{Deserialize, Serialize};

/// Error returned to the caller of `invoke` or `query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl DispatchError {
    pub fn unknown_function(name: &str) -> Self {
        ProvenanceError::UnknownFunction {
            name: name.to_string(),
        }
        .into()
    }
}

impl From<ProvenanceError> for DispatchError {
    fn from(err: ProvenanceError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for DispatchError {}

/// Function-name router over a provenance service.
pub struct ChaincodeDispatcher<S> {
    service: S,
}

impl<S> ChaincodeDispatcher<S>
where
    S: ProvenanceApi + ProvenanceQueryApi,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Run a mutating function.
    pub fn invoke(&mut self, function: &str, args: &[String]) -> Result<Vec<u8>, DispatchError> {
        tracing::debug!("[pc-01] invoke {} ({} args)", function, args.len());
        let result = self.route_invoke(function, args);
        if let Err(e) = &result {
            tracing::warn!("[pc-01] invoke {} failed: {}", function, e);
        }
        result.map_err(DispatchError::from)
    }

    /// Run a read-only function.
    pub fn query(&self, function: &str, args: &[String]) -> Result<Vec<u8>, DispatchError> {
        tracing::debug!("[pc-01] query {} ({} args)", function, args.len());
        let result = self.route_query(function, args);
        if let Err(e) = &result {
            tracing::debug!("[pc-01] query {} failed: {}", function, e);
        }
        result.map_err(DispatchError::from)
    }

    fn route_invoke(
        &mut self,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, ProvenanceError> {
        match function {
            "init" => {
                positional::<0>("init", args)?;
                self.service.initialize()?;
            }
            CreateItemRequest::OPERATION => {
                self.service.create_item(CreateItemRequest::from_args(args)?)?;
            }
            TransferOwnershipRequest::OPERATION => {
                self.service.transfer_ownership(TransferOwnershipRequest::from_args(args)?)?;
            }
            ConfirmOwnershipRequest::OPERATION => {
                self.service.confirm_ownership(ConfirmOwnershipRequest::from_args(args)?)?;
            }
            ChangeStatusRequest::OPERATION => {
                self.service.change_status(ChangeStatusRequest::from_args(args)?)?;
            }
            ScanRequest::OPERATION => {
                self.service.add_scan_count(ScanRequest::from_args(args)?)?;
            }
            other => {
                return Err(ProvenanceError::UnknownFunction {
                    name: other.to_string(),
                })
            }
        }
        Ok(Vec::new())
    }

    fn route_query(&self, function: &str, args: &[String]) -> Result<Vec<u8>, ProvenanceError> {
        match function {
            "getItemDetailsWithID" => {
                let [id] = positional::<1>("getItemDetailsWithID", args)?;
                to_json(&self.service.item_details(id)?)
            }
            "getItemDetailsWithBarcode" => {
                let [barcode] = positional::<1>("getItemDetailsWithBarcode", args)?;
                to_json(&self.service.item_by_barcode(barcode)?)
            }
            "getCurrentOwnerItems" => {
                let [owner] = positional::<1>("getCurrentOwnerItems", args)?;
                list_json(self.service.owner_items(owner)?)
            }
            "getCurrentOwnerItemsByStatus" => {
                let [owner, status] = positional::<2>("getCurrentOwnerItemsByStatus", args)?;
                let status = status.parse::<ItemStatus>().map_err(|e| {
                    ProvenanceError::invalid_argument("status", e.to_string())
                })?;
                list_json(self.service.owner_items_by_status(owner, status)?)
            }
            "getCurrentOwnerItemsWithTxs" => {
                let [owner] = positional::<1>("getCurrentOwnerItemsWithTxs", args)?;
                list_json(self.service.owner_items_with_history(owner)?)
            }
            other => Err(ProvenanceError::UnknownFunction {
                name: other.to_string(),
            }),
        }
    }
}

fn to_json(item: &Item) -> Result<Vec<u8>, ProvenanceError> {
    serde_json::to_vec(item).map_err(|e| ProvenanceError::SerializationError {
        message: e.to_string(),
    })
}

fn list_json(items: Vec<Item>) -> Result<Vec<u8>, ProvenanceError> {
    serde_json::to_vec(&ItemList::from(items)).map_err(|e| ProvenanceError::SerializationError {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, make_test_service, TestService};
    use serde_json::Value;

    fn dispatcher() -> ChaincodeDispatcher<TestService> {
        ChaincodeDispatcher::new(make_test_service())
    }

    fn create(d: &mut ChaincodeDispatcher<TestService>, id: &str) {
        d.invoke(
            "createItem",
            &args([id, "MANUFACTURER", "0001", "2016-05-01", "Penang"]),
        )
        .unwrap();
    }

    fn query_json(d: &ChaincodeDispatcher<TestService>, function: &str, a: &[String]) -> Value {
        serde_json::from_slice(&d.query(function, a).unwrap()).unwrap()
    }

    #[test]
    fn test_mutations_return_empty_payload() {
        let mut d = dispatcher();
        let payload = d
            .invoke(
                "createItem",
                &args(["I1", "MANUFACTURER", "0001", "2016-05-01", "Penang"]),
            )
            .unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn test_init_through_dispatcher() {
        let mut d = ChaincodeDispatcher::new(TestService::new_in_memory(Default::default()));

        let err = d.query("getCurrentOwnerItems", &args(["M"])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        d.invoke("init", &[]).unwrap();
        let v = query_json(&d, "getCurrentOwnerItems", &args(["M"]));
        assert_eq!(v, serde_json::json!({ "items": [] }));

        let err = d.invoke("init", &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_unknown_function() {
        let mut d = dispatcher();

        let err = d.invoke("deleteItem", &args(["I1"])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("deleteItem"));

        // Queries are not routed through invoke and vice versa
        assert!(d.invoke("getItemDetailsWithID", &args(["I1"])).is_err());
        assert_eq!(
            d.query("createItem", &args(["I1"])).unwrap_err(),
            DispatchError::unknown_function("createItem")
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        let mut d = dispatcher();

        let err = d.invoke("createItem", &args(["I1", "MANUFACTURER"])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = d.query("getItemDetailsWithID", &[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = d
            .query("getCurrentOwnerItemsByStatus", &args(["M"]))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_item_details_json_shape() {
        let mut d = dispatcher();
        create(&mut d, "I1");

        let v = query_json(&d, "getItemDetailsWithID", &args(["I1"]));
        assert_eq!(v["id"], "I1");
        assert_eq!(v["currentOwner"], "MANUFACTURER");
        assert_eq!(v["status"], "VERIFIED");
        assert_eq!(v["scanCount"], 0);
        assert_eq!(v["transactions"][0]["transactionType"], "CREATE");
        assert_eq!(v["transactions"][0]["vDate"], "2016-05-01");
    }

    #[test]
    fn test_list_queries_strip_history() {
        let mut d = dispatcher();
        create(&mut d, "I1");
        create(&mut d, "I2");

        let v = query_json(&d, "getCurrentOwnerItems", &args(["MANUFACTURER"]));
        let items = v["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.get("transactions").is_none()));

        let v = query_json(&d, "getCurrentOwnerItemsWithTxs", &args(["MANUFACTURER"]));
        assert_eq!(v["items"][1]["transactions"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_status_query_accepts_both_spellings() {
        let mut d = dispatcher();
        create(&mut d, "I1");
        d.invoke(
            "transferOwnership",
            &args(["I1", "MANUFACTURER", "d", "l", "R1"]),
        )
        .unwrap();

        for status in ["IN OWNERSHIP TRANSIT", "IN_OWNERSHIP_TRANSIT"] {
            let v = query_json(&d, "getCurrentOwnerItemsByStatus", &args(["R1", status]));
            assert_eq!(v["items"][0]["id"], "I1");
        }

        let err = d
            .query("getCurrentOwnerItemsByStatus", &args(["R1", "LOST"]))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_error_categories() {
        let mut d = dispatcher();
        create(&mut d, "I1");

        let err = d.query("getItemDetailsWithID", &args(["nope"])).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = d
            .invoke("transferOwnership", &args(["I1", "X", "d", "l", "X"]))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let err = d
            .invoke("changeStatus", &args(["I1", "MANUFACTURER", "d", "l", "VERIFIED"]))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition);
    }

    #[test]
    fn test_dispatch_error_serializes_kind() {
        let err = DispatchError::unknown_function("nope");
        let v: Value = serde_json::to_value(&err).unwrap();
        assert_eq!(v["kind"], "ValidationError");
        assert_eq!(err.to_string(), format!("[ValidationError] {}", err.message));
    }
}

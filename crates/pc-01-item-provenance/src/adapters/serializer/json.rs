use crate::domain::entities::{Item, ItemIndex};
use crate::domain::errors::SerializationError;
use crate::ports::outbound::RecordSerializer;

/// Record serializer producing the ledger's JSON shapes.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRecordSerializer;

fn to_error(e: serde_json::Error) -> SerializationError {
    SerializationError {
        message: e.to_string(),
    }
}

impl RecordSerializer for JsonRecordSerializer {
    fn serialize_item(&self, item: &Item) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(item).map_err(to_error)
    }

    fn deserialize_item(&self, data: &[u8]) -> Result<Item, SerializationError> {
        serde_json::from_slice(data).map_err(to_error)
    }

    fn serialize_index(&self, index: &ItemIndex) -> Result<Vec<u8>, SerializationError> {
        serde_json::to_vec(index).map_err(to_error)
    }

    fn deserialize_index(&self, data: &[u8]) -> Result<ItemIndex, SerializationError> {
        serde_json::from_slice(data).map_err(to_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ItemStatus, TransactionType};

    #[test]
    fn test_reads_existing_ledger_record() {
        let raw = br#"{
            "id": "I1",
            "currentOwner": "R1",
            "manufacturer": "MANUFACTURER",
            "barcode": "0001",
            "status": "IN OWNERSHIP TRANSIT",
            "scanCount": 0,
            "transactions": [
                {"transactionType": "CREATE", "newOwner": "MANUFACTURER", "location": "Penang", "vDate": "2016-05-01"},
                {"transactionType": "TRANSFER", "newOwner": "R1", "location": "KL", "vDate": "2016-05-02"}
            ]
        }"#;

        let item = JsonRecordSerializer.deserialize_item(raw).unwrap();
        assert_eq!(item.status, ItemStatus::InOwnershipTransit);
        assert_eq!(item.transactions.len(), 2);
        assert_eq!(
            item.transactions[1].transaction_type,
            TransactionType::Transfer
        );
    }

    #[test]
    fn test_rejects_unknown_status() {
        let raw = br#"{"id":"I1","currentOwner":"M","manufacturer":"M","barcode":"b","status":"MISPLACED","scanCount":0,"transactions":[]}"#;
        assert!(JsonRecordSerializer.deserialize_item(raw).is_err());
    }

    #[test]
    fn test_garbage_is_error() {
        assert!(JsonRecordSerializer.deserialize_index(b"not json").is_err());
    }
}

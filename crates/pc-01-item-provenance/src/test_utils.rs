use crate::adapters::{InMemoryKVStore, JsonRecordSerializer};
use crate::domain::entities::Item;
use crate::domain::requests::{CreateItemRequest, EventStamp};
use crate::domain::state_machine;
use crate::domain::value_objects::LedgerConfig;
use crate::ports::inbound::ProvenanceApi;
use crate::service::ProvenanceService;

pub type TestService = ProvenanceService<InMemoryKVStore, JsonRecordSerializer>;

pub fn stamp() -> EventStamp {
    EventStamp::new("2016-05-01", "Penang")
}

pub fn args<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn create_request(id: &str, manufacturer: &str) -> CreateItemRequest {
    CreateItemRequest {
        id: id.to_string(),
        manufacturer: manufacturer.to_string(),
        barcode: format!("BC-{}", id),
        stamp: stamp(),
    }
}

pub fn make_item(id: &str, manufacturer: &str) -> Item {
    state_machine::create(&create_request(id, manufacturer))
}

/// Service over an empty in-memory store, already initialized.
pub fn make_test_service() -> TestService {
    let mut service = ProvenanceService::new_in_memory(LedgerConfig::default());
    service.initialize().unwrap();
    service
}

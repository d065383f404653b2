use bondline_common::{Address, Bytes32};
use serde::{Deserialize, Serialize};

use crate::identity::EntityId;

/// Chain context of one emitted log, as delivered by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
    /// Contract that emitted the log
    pub address: Address,
    pub block_number: u64,
    /// Block timestamp in seconds
    pub block_timestamp: u64,
    pub transaction_hash: Bytes32,
    /// Sender of the transaction
    pub transaction_from: Address,
    pub log_index: u64,
}

impl EventContext {
    /// Key of the entity tracking the emitting contract.
    pub fn contract_id(&self) -> EntityId {
        EntityId::contract(&self.address)
    }

    /// Key of a log record for this event.
    pub fn log_id(&self) -> EntityId {
        EntityId::log(&self.transaction_hash, self.log_index)
    }
}

//! JSON-lines input records

use bondline::governance::MediatorAdminEvent;
use bondline::{Envelope, EventContext, TypedBody};
use bondline_bond::{BondEvent, BondFactoryEvent, BondMediatorEvent};
use bondline_staking::{StakingPoolEvent, StakingPoolFactoryEvent, StakingPoolMediatorEvent};
use serde::Deserialize;

/// One decoded log, as written by the host runtime.
#[derive(Debug, Deserialize)]
pub struct Record {
    pub context: EventContext,
    pub event: ContractEvent,
}

/// Decoded event, tagged with the contract family that emitted it.
#[derive(Debug, Deserialize)]
#[serde(tag = "source", content = "payload", rename_all = "snake_case")]
pub enum ContractEvent {
    Bond(BondEvent),
    BondFactory(BondFactoryEvent),
    BondMediator(BondMediatorEvent),
    StakingPool(StakingPoolEvent),
    StakingPoolFactory(StakingPoolFactoryEvent),
    StakingPoolMediator(StakingPoolMediatorEvent),
}

impl ContractEvent {
    /// Whether this is a mediator's `Initialized`, whose factory read must not be
    /// skipped: without it the factory is never bound or streamed.
    pub fn is_mediator_initialization(&self) -> bool {
        matches!(
            self,
            Self::BondMediator(BondMediatorEvent::Admin(MediatorAdminEvent::Initialized(_)))
                | Self::StakingPoolMediator(StakingPoolMediatorEvent::Admin(
                    MediatorAdminEvent::Initialized(_)
                ))
        )
    }

    fn into_body(self) -> Box<dyn TypedBody> {
        match self {
            Self::Bond(event) => Box::new(event),
            Self::BondFactory(event) => Box::new(event),
            Self::BondMediator(event) => Box::new(event),
            Self::StakingPool(event) => Box::new(event),
            Self::StakingPoolFactory(event) => Box::new(event),
            Self::StakingPoolMediator(event) => Box::new(event),
        }
    }
}

impl Record {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    pub fn into_envelope(self) -> Envelope {
        Envelope::new(self.context, self.event.into_body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = r#"{
        "address": "0x00000000000000000000000000000000000000aa",
        "blockNumber": 12,
        "blockTimestamp": 1650000000,
        "transactionHash": "0x00000000000000000000000000000000000000000000000000000000000000ff",
        "transactionFrom": "0x00000000000000000000000000000000000000bb",
        "logIndex": 3
    }"#;

    #[test]
    fn test_record_routes_to_family_body() {
        let line = format!(
            r#"{{"context": {CONTEXT}, "event": {{"source": "staking_pool", "payload": {{"EmergencyMode": {{"admin": "0x00000000000000000000000000000000000000cc"}}}}}}}}"#
        );

        let envelope = Record::parse(&line).unwrap().into_envelope();

        assert_eq!(envelope.type_id, StakingPoolEvent::type_id());
        assert_eq!(envelope.event_name(), "EmergencyMode");
        assert_eq!(envelope.context.block_number, 12);
        assert_eq!(envelope.context.log_index, 3);
    }

    #[test]
    fn test_mediator_initialization_is_recognised() {
        let initialized = format!(
            r#"{{"context": {CONTEXT}, "event": {{"source": "staking_pool_mediator", "payload": {{"Initialized": {{"version": 1}}}}}}}}"#
        );
        let paused = format!(
            r#"{{"context": {CONTEXT}, "event": {{"source": "bond_mediator", "payload": {{"Paused": {{"account": "0x00000000000000000000000000000000000000cc"}}}}}}}}"#
        );

        assert!(Record::parse(&initialized).unwrap().event.is_mediator_initialization());
        assert!(!Record::parse(&paused).unwrap().event.is_mediator_initialization());
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let line = format!(
            r#"{{"context": {CONTEXT}, "event": {{"source": "vault", "payload": {{}}}}}}"#
        );
        assert!(Record::parse(&line).is_err());
    }
}

use bondline_common::{u256_to_amount, Address};

use super::entities::{Factory, FactorySweep};
use super::events::FactoryAdminEvent;
use super::Scope;
use crate::entity::Entity;
use crate::error::StoreError;
use crate::etl::event::EventContext;
use crate::etl::store::Changeset;
use crate::identity::EntityId;

/// Load-or-create the factory at `address`.
pub fn load_factory<S: Scope>(
    changes: &Changeset<'_>,
    address: &Address,
) -> Result<Factory<S>, StoreError> {
    changes.load_or_create(EntityId::contract(address))
}

/// Apply an administrative event emitted by the factory at `context.address`.
pub fn apply_factory_admin<S: Scope>(
    context: &EventContext,
    event: &FactoryAdminEvent,
    changes: &mut Changeset<'_>,
) -> Result<(), StoreError> {
    let mut factory = load_factory::<S>(changes, &context.address)?;

    match event {
        FactoryAdminEvent::BeneficiaryUpdate(update) => {
            factory.beneficiary = Some(update.beneficiary);
        }
        FactoryAdminEvent::OwnershipTransferred(transfer) => {
            factory.owner = Some(transfer.new_owner);
        }
        FactoryAdminEvent::Paused(_) => factory.paused = true,
        FactoryAdminEvent::Unpaused(_) => factory.paused = false,
        FactoryAdminEvent::Erc20Sweep(sweep) => {
            let mut record = FactorySweep::<S>::with_id(context.log_id());
            record.factory = Some(factory.id.clone());
            record.token = Some(sweep.tokens);
            record.amount = u256_to_amount(sweep.amount);
            record.beneficiary = Some(sweep.beneficiary);
            record.created_at_timestamp = context.block_timestamp;
            changes.save(&record)?;
        }
    }

    factory.timestamps.touch(context.block_timestamp);
    changes.save(&factory)
}

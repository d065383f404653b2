//! Bond factory projector

use anyhow::Result;
use async_trait::async_trait;
use bondline::governance::{apply_factory_admin, load_factory};
use bondline::{Changeset, EntityId, Envelope, EventContext, Projector, SourceTemplate, TypeId};
use bondline_common::u256_to_amount;

use crate::entities::{Bond, BondConfiguration, BondMetadata, BondRewardPool};
use crate::events::{BondFactoryEvent, CreateBond};
use crate::BondScope;

const TARGET: &str = "bondline_bond::factory";

/// Projects [`BondFactoryEvent`]s, spawning a bond stream for each created bond.
#[derive(Debug, Default)]
pub struct BondFactoryProjector;

impl BondFactoryProjector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Projector for BondFactoryProjector {
    fn name(&self) -> &str {
        "bond_factory"
    }

    fn interested_types(&self) -> Vec<TypeId> {
        vec![BondFactoryEvent::type_id()]
    }

    async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> Result<()> {
        let Some(event) = envelope.downcast_ref::<BondFactoryEvent>() else {
            anyhow::bail!(
                "unexpected body {} for bond factory projector",
                envelope.event_name()
            );
        };

        tracing::debug!(
            target: TARGET,
            factory = %envelope.context.contract_id(),
            event = event.name(),
            block = envelope.context.block_number,
            "Projecting bond factory event"
        );

        match event {
            BondFactoryEvent::CreateBond(create) | BondFactoryEvent::CreatePerformanceBond(create) => {
                create_bond(&envelope.context, create, changes)?;
            }
            BondFactoryEvent::Admin(admin) => {
                apply_factory_admin::<BondScope>(&envelope.context, admin, changes)?;
            }
        }
        Ok(())
    }
}

fn create_bond(context: &EventContext, create: &CreateBond, changes: &mut Changeset<'_>) -> Result<()> {
    let ts = context.block_timestamp;

    let mut factory = load_factory::<BondScope>(changes, &context.address)?;
    factory.factory = Some(context.address);
    factory.timestamps.touch(ts);
    changes.save(&factory)?;

    let bond_id = EntityId::contract(&create.bond);
    let mut bond: Bond = changes.load_or_create(bond_id.clone())?;
    bond.bond = Some(create.bond);
    bond.factory = Some(factory.id.clone());
    bond.owner = Some(context.transaction_from);
    bond.treasury = Some(create.treasury);
    bond.collateral_tokens = Some(create.configuration.collateral_tokens);
    bond.paused = false;
    bond.timestamps.created(ts);
    changes.save(&bond)?;

    let mut metadata: BondMetadata = changes.load_or_create(bond_id.clone())?;
    metadata.bond = Some(bond_id.clone());
    metadata.name = create.metadata.name.clone();
    metadata.symbol = create.metadata.symbol.clone();
    metadata.data = create.metadata.data.clone();
    metadata.timestamps.created(ts);
    changes.save(&metadata)?;

    let config = &create.configuration;
    let mut configuration: BondConfiguration = changes.load_or_create(bond_id.clone())?;
    configuration.bond = Some(bond_id.clone());
    configuration.debt_token_amount = u256_to_amount(config.debt_token_amount);
    configuration.collateral_tokens = Some(config.collateral_tokens);
    configuration.expiry_timestamp = u256_to_amount(config.expiry_timestamp);
    configuration.minimum_deposit = u256_to_amount(config.minimum_deposit);
    configuration.timestamps.created(ts);
    changes.save(&configuration)?;

    for reward in &create.rewards {
        let mut pool: BondRewardPool =
            changes.load_or_create(EntityId::keyed(&create.bond, &reward.tokens))?;
        pool.bond = Some(bond_id.clone());
        pool.tokens = Some(reward.tokens);
        pool.amount = u256_to_amount(reward.amount);
        pool.time_lock = u256_to_amount(reward.time_lock);
        pool.timestamps.created(ts);
        changes.save(&pool)?;
    }

    changes.register_source(SourceTemplate::PerformanceBond, create.bond);

    tracing::debug!(
        target: TARGET,
        factory = %factory.id,
        bond = %bond_id,
        rewards = create.rewards.len(),
        "Created bond"
    );
    Ok(())
}

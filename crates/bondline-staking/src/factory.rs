//! Staking pool factory projector

use anyhow::Result;
use async_trait::async_trait;
use bondline::governance::{apply_factory_admin, load_factory};
use bondline::{Changeset, EntityId, Envelope, EventContext, Projector, SourceTemplate, TypeId};
use bondline_common::{u256_to_amount, Amount};

use crate::entities::{StakingPool, StakingPoolReward};
use crate::events::{StakingPoolCreated, StakingPoolFactoryEvent};
use crate::StakingScope;

const TARGET: &str = "bondline_staking::factory";

/// Projects [`StakingPoolFactoryEvent`]s, spawning a pool stream for each created pool.
#[derive(Debug, Default)]
pub struct StakingPoolFactoryProjector;

impl StakingPoolFactoryProjector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Projector for StakingPoolFactoryProjector {
    fn name(&self) -> &str {
        "staking_pool_factory"
    }

    fn interested_types(&self) -> Vec<TypeId> {
        vec![StakingPoolFactoryEvent::type_id()]
    }

    async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> Result<()> {
        let Some(event) = envelope.downcast_ref::<StakingPoolFactoryEvent>() else {
            anyhow::bail!(
                "unexpected body {} for staking pool factory projector",
                envelope.event_name()
            );
        };

        tracing::debug!(
            target: TARGET,
            factory = %envelope.context.contract_id(),
            event = event.name(),
            block = envelope.context.block_number,
            "Projecting staking pool factory event"
        );

        match event {
            StakingPoolFactoryEvent::StakingPoolCreated(created) => {
                create_pool(&envelope.context, created, changes)?;
            }
            StakingPoolFactoryEvent::Admin(admin) => {
                apply_factory_admin::<StakingScope>(&envelope.context, admin, changes)?;
            }
        }
        Ok(())
    }
}

fn create_pool(
    context: &EventContext,
    created: &StakingPoolCreated,
    changes: &mut Changeset<'_>,
) -> Result<()> {
    let ts = context.block_timestamp;
    let config = &created.config;

    let mut factory = load_factory::<StakingScope>(changes, &context.address)?;
    factory.factory = Some(context.address);
    factory.timestamps.touch(ts);
    changes.save(&factory)?;

    let pool_id = EntityId::contract(&created.staking_pool);
    let mut pool: StakingPool = changes.load_or_create(pool_id.clone())?;
    pool.pool = Some(created.staking_pool);
    pool.factory = Some(factory.id.clone());
    pool.creator = Some(created.creator);
    pool.stake_token = Some(config.stake_token);
    pool.treasury = Some(config.treasury);
    pool.epoch_start_timestamp = u256_to_amount(config.epoch_start_timestamp);
    pool.epoch_duration = u256_to_amount(config.epoch_duration);
    pool.min_total_pool_stake = u256_to_amount(config.min_total_pool_stake);
    pool.max_total_pool_stake = u256_to_amount(config.max_total_pool_stake);
    pool.minimum_contribution = u256_to_amount(config.minimum_contribution);
    pool.reward_type = config.reward_type;
    pool.timestamps.touch(ts);
    changes.save(&pool)?;

    for reward_config in &config.reward_tokens {
        let id = EntityId::keyed(&created.staking_pool, &reward_config.tokens);
        let mut reward: StakingPoolReward = changes.load_or_create(id)?;
        reward.pool = Some(pool_id.clone());
        reward.token = Some(reward_config.tokens);
        reward.amount = Amount::from(0);
        reward.max_amount = u256_to_amount(reward_config.max_amount);
        reward.ratio = u256_to_amount(reward_config.ratio);
        reward.timestamps.touch(ts);
        changes.save(&reward)?;
    }

    changes.register_source(SourceTemplate::StakingPool, created.staking_pool);

    tracing::debug!(
        target: TARGET,
        factory = %factory.id,
        pool = %pool_id,
        rewards = config.reward_tokens.len(),
        "Created staking pool"
    );
    Ok(())
}

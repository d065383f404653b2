//! Staking pool projector

use anyhow::Result;
use async_trait::async_trait;
use bondline::{Changeset, Entity, EntityId, Envelope, EventContext, Projector, TypeId};
use bondline_common::u256_to_amount;

use crate::entities::{
    StakingPool, StakingPoolDeposit, StakingPoolReward, StakingPoolRewardWithdrawal,
    StakingPoolSweep, StakingPoolWithdrawal,
};
use crate::events::StakingPoolEvent;

const TARGET: &str = "bondline_staking::pool";

/// Projects [`StakingPoolEvent`]s.
#[derive(Debug, Default)]
pub struct StakingPoolProjector;

impl StakingPoolProjector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Projector for StakingPoolProjector {
    fn name(&self) -> &str {
        "staking_pool"
    }

    fn interested_types(&self) -> Vec<TypeId> {
        vec![StakingPoolEvent::type_id()]
    }

    async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> Result<()> {
        let Some(event) = envelope.downcast_ref::<StakingPoolEvent>() else {
            anyhow::bail!(
                "unexpected body {} for staking pool projector",
                envelope.event_name()
            );
        };

        tracing::debug!(
            target: TARGET,
            pool = %envelope.context.contract_id(),
            event = event.name(),
            block = envelope.context.block_number,
            "Projecting staking pool event"
        );

        apply(&envelope.context, event, changes)
    }
}

fn apply(
    context: &EventContext,
    event: &StakingPoolEvent,
    changes: &mut Changeset<'_>,
) -> Result<()> {
    let ts = context.block_timestamp;
    let mut pool: StakingPool = changes.load_or_create(context.contract_id())?;

    match event {
        StakingPoolEvent::BeneficiaryUpdate(update) => pool.beneficiary = Some(update.beneficiary),
        StakingPoolEvent::OwnershipTransferred(transfer) => pool.owner = Some(transfer.new_owner),
        StakingPoolEvent::Paused(_) => pool.paused = true,
        StakingPoolEvent::Unpaused(_) => pool.paused = false,
        StakingPoolEvent::EmergencyMode(_) => pool.emergency_mode = true,
        StakingPoolEvent::RewardsAvailableTimestamp(available) => {
            pool.rewards_available = true;
            pool.rewards_available_timestamp =
                u256_to_amount(available.rewards_available_timestamp);
        }
        StakingPoolEvent::Deposit(deposit) => {
            let amount = u256_to_amount(deposit.deposit_amount);
            pool.amount += &amount;

            let id = EntityId::accumulator(&context.address, &deposit.user, None);
            let mut record: StakingPoolDeposit = changes.load_or_create(id)?;
            record.pool = Some(pool.id.clone());
            record.user = Some(deposit.user);
            record.amount += amount;
            record.timestamps.touch(ts);
            changes.save(&record)?;
        }
        StakingPoolEvent::WithdrawStake(withdraw) => {
            let stake = u256_to_amount(withdraw.stake);
            pool.amount -= &stake;

            let id = EntityId::accumulator(&context.address, &withdraw.user, None);
            let mut record: StakingPoolWithdrawal = changes.load_or_create(id)?;
            record.pool = Some(pool.id.clone());
            record.user = Some(withdraw.user);
            record.amount += stake;
            record.timestamps.touch(ts);
            changes.save(&record)?;
        }
        StakingPoolEvent::InitializeRewards(initialize) => {
            let id = EntityId::keyed(&context.address, &initialize.reward_tokens);
            let mut reward: StakingPoolReward = changes.load_or_create(id)?;
            reward.pool = Some(pool.id.clone());
            reward.token = Some(initialize.reward_tokens);
            reward.amount = u256_to_amount(initialize.amount);
            reward.timestamps.touch(ts);
            changes.save(&reward)?;
        }
        StakingPoolEvent::WithdrawRewards(withdraw) => {
            let rewards = u256_to_amount(withdraw.rewards);

            let id = EntityId::keyed(&context.address, &withdraw.reward_token);
            let mut reward: StakingPoolReward = changes.load_or_create(id)?;
            reward.pool = Some(pool.id.clone());
            reward.token = Some(withdraw.reward_token);
            reward.amount -= &rewards;
            reward.timestamps.touch(ts);
            changes.save(&reward)?;

            // Latest withdrawal only; the amount is replaced, not summed
            let id = EntityId::accumulator(
                &context.address,
                &withdraw.user,
                Some(&withdraw.reward_token),
            );
            let mut record: StakingPoolRewardWithdrawal = changes.load_or_create(id)?;
            record.pool = Some(pool.id.clone());
            record.reward = Some(reward.id.clone());
            record.token = Some(withdraw.reward_token);
            record.user = Some(withdraw.user);
            record.amount = rewards;
            record.timestamps.touch(ts);
            changes.save(&record)?;
        }
        StakingPoolEvent::Erc20Sweep(sweep) => {
            let mut record = StakingPoolSweep::with_id(context.log_id());
            record.pool = Some(pool.id.clone());
            record.token = Some(sweep.tokens);
            record.amount = u256_to_amount(sweep.amount);
            record.beneficiary = Some(sweep.beneficiary);
            record.created_at_timestamp = ts;
            changes.save(&record)?;
        }
    }

    pool.pool = Some(context.address);
    pool.timestamps.touch(ts);
    changes.save(&pool)?;
    Ok(())
}

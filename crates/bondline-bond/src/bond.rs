//! Bond projector
//!
//! Maintains a [`Bond`] and its children from one bond contract's event stream.
//! Every event touches the bond; deposits and redemptions accumulate per
//! counterparty, while sweeps, claims, debts, slashes and transfers are
//! written once per log.

use anyhow::Result;
use async_trait::async_trait;
use bondline::{Changeset, Entity, EntityId, Envelope, EventContext, Projector, TypeId};
use bondline_common::{u256_to_amount, Address};
use num_traits::Signed;

use crate::entities::{
    Bond, BondDeposit, BondMetadata, BondRedemption, BondRewardClaimed, BondRewardDebt,
    BondRewardPool, BondSlashDeposit, BondSweep, BondTransfer,
};
use crate::events::BondEvent;

const TARGET: &str = "bondline_bond::bond";

/// Projects [`BondEvent`]s.
#[derive(Debug, Default)]
pub struct BondProjector;

impl BondProjector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Projector for BondProjector {
    fn name(&self) -> &str {
        "bond"
    }

    fn interested_types(&self) -> Vec<TypeId> {
        vec![BondEvent::type_id()]
    }

    async fn project(&self, envelope: &Envelope, changes: &mut Changeset<'_>) -> Result<()> {
        let Some(event) = envelope.downcast_ref::<BondEvent>() else {
            anyhow::bail!(
                "unexpected body {} for bond projector",
                envelope.event_name()
            );
        };

        tracing::debug!(
            target: TARGET,
            bond = %envelope.context.contract_id(),
            event = event.name(),
            block = envelope.context.block_number,
            "Projecting bond event"
        );

        apply(&envelope.context, event, changes)?;
        Ok(())
    }
}

fn apply(context: &EventContext, event: &BondEvent, changes: &mut Changeset<'_>) -> Result<()> {
    let ts = context.block_timestamp;
    let mut bond: Bond = changes.load_or_create(context.contract_id())?;

    match event {
        BondEvent::AllowRedemption(allow) => {
            bond.is_redeemable = true;
            bond.redeemable_reason = Some(allow.reason.clone());
            bond.redeemable_authorizer = Some(allow.authorizer);
        }
        BondEvent::RedeemableUpdate(update) => {
            bond.is_redeemable = update.is_redeemable;
            bond.redeemable_reason = Some(update.reason.clone());
            bond.redeemable_authorizer = Some(update.instigator);
        }
        BondEvent::BeneficiaryUpdate(update) => bond.beneficiary = Some(update.beneficiary),
        BondEvent::OwnershipTransferred(transfer) => bond.owner = Some(transfer.new_owner),
        BondEvent::Paused(_) => bond.paused = true,
        BondEvent::Unpaused(_) => bond.paused = false,
        BondEvent::RedemptionTimestampUpdate(update) => {
            bond.redeemable_timestamp = u256_to_amount(update.timestamp);
        }
        BondEvent::Deposit(deposit) => {
            let amount = u256_to_amount(deposit.collateral_amount);
            bond.collateral_amount += &amount;

            let id = EntityId::accumulator(
                &context.address,
                &deposit.depositor,
                Some(&deposit.collateral_tokens),
            );
            let mut record: BondDeposit = changes.load_or_create(id)?;
            record.bond = Some(bond.id.clone());
            record.depositor = Some(deposit.depositor);
            record.collateral_tokens = Some(deposit.collateral_tokens);
            record.collateral_amount += amount;
            record.timestamps.touch(ts);
            changes.save(&record)?;
        }
        BondEvent::Redemption(redemption) => {
            let collateral = u256_to_amount(redemption.collateral_amount);
            bond.collateral_amount -= &collateral;

            let id = EntityId::accumulator(
                &context.address,
                &redemption.redeemer,
                Some(&redemption.debt_tokens),
            );
            let mut record: BondRedemption = changes.load_or_create(id)?;
            record.bond = Some(bond.id.clone());
            record.redeemer = Some(redemption.redeemer);
            record.collateral_tokens = Some(redemption.collateral_tokens);
            record.collateral_amount += collateral;
            record.debt_tokens = Some(redemption.debt_tokens);
            record.debt_amount += u256_to_amount(redemption.debt_amount);
            record.timestamps.touch(ts);
            changes.save(&record)?;
        }
        BondEvent::Erc20Sweep(sweep) => {
            let amount = u256_to_amount(sweep.amount);
            if bond.collateral_tokens == Some(sweep.tokens) {
                bond.collateral_amount -= &amount;
            }

            let mut record = BondSweep::with_id(context.log_id());
            record.bond = Some(bond.id.clone());
            record.token = Some(sweep.tokens);
            record.amount = amount;
            record.beneficiary = Some(sweep.beneficiary);
            record.created_at_timestamp = ts;
            changes.save(&record)?;
        }
        BondEvent::WithdrawCollateral(withdraw) => {
            bond.collateral_amount -= u256_to_amount(withdraw.collateral_amount);
            if !bond.collateral_amount.is_positive() {
                bond.collateral_withdrawn = true;
            }
        }
        BondEvent::Expire(expire) => {
            bond.collateral_amount -= u256_to_amount(expire.collateral_amount);
            bond.expired = true;
        }
        BondEvent::SlashDeposits(slash) => {
            let amount = u256_to_amount(slash.collateral_amount);
            bond.collateral_slashed += &amount;
            bond.collateral_amount -= &amount;

            let mut record = BondSlashDeposit::with_id(context.log_id());
            record.bond = Some(bond.id.clone());
            record.collateral_tokens = Some(slash.collateral_tokens);
            record.collateral_amount = amount;
            record.reason = slash.reason.clone();
            record.created_at_timestamp = ts;
            changes.save(&record)?;
        }
        BondEvent::PartialCollateral(partial) => {
            bond.redemption_excess = u256_to_amount(partial.debt_remaining);
            bond.collateral_amount = u256_to_amount(partial.collateral_amount);
        }
        BondEvent::FullCollateral(full) => {
            bond.collateral_full = true;
            bond.collateral_amount = u256_to_amount(full.collateral_amount);
        }
        BondEvent::MetaDataUpdate(update) => {
            let mut metadata: BondMetadata = changes.load_or_create(bond.id.clone())?;
            metadata.bond = Some(bond.id.clone());
            metadata.data = update.data.clone();
            metadata.timestamps.touch(ts);
            changes.save(&metadata)?;
        }
        BondEvent::RegisterReward(register) => {
            let mut pool = load_reward_pool(changes, context, &register.tokens)?;
            pool.amount = u256_to_amount(register.amount);
            pool.time_lock = u256_to_amount(register.time_lock);
            pool.timestamps.touch(ts);
            changes.save(&pool)?;
        }
        BondEvent::RewardTimeLockUpdate(update) => {
            let mut pool = load_reward_pool(changes, context, &update.tokens)?;
            pool.time_lock = u256_to_amount(update.time_lock);
            pool.timestamps.touch(ts);
            changes.save(&pool)?;
        }
        BondEvent::ClaimReward(claim) => {
            let mut record = BondRewardClaimed::with_id(context.log_id());
            record.bond = Some(bond.id.clone());
            record.claimant = Some(claim.instigator);
            record.tokens = Some(claim.tokens);
            record.amount = u256_to_amount(claim.amount);
            record.created_at_timestamp = ts;
            changes.save(&record)?;
        }
        BondEvent::RewardDebt(debt) => {
            let mut record = BondRewardDebt::with_id(context.log_id());
            record.bond = Some(bond.id.clone());
            record.claimant = Some(debt.claimant);
            record.tokens = Some(debt.tokens);
            record.reward_debt = u256_to_amount(debt.reward_debt);
            record.created_at_timestamp = ts;
            changes.save(&record)?;
        }
        BondEvent::Transfer(transfer) => {
            let mut record = BondTransfer::with_id(context.log_id());
            record.bond = Some(bond.id.clone());
            record.from = Some(transfer.from);
            record.to = Some(transfer.to);
            record.value = u256_to_amount(transfer.value);
            record.created_at_timestamp = ts;
            changes.save(&record)?;
        }
    }

    bond.bond = Some(context.address);
    bond.timestamps.touch(ts);
    changes.save(&bond)?;
    Ok(())
}

fn load_reward_pool(
    changes: &Changeset<'_>,
    context: &EventContext,
    token: &Address,
) -> Result<BondRewardPool> {
    let mut pool: BondRewardPool = changes.load_or_create(EntityId::keyed(&context.address, token))?;
    pool.bond = Some(context.contract_id());
    pool.tokens = Some(*token);
    Ok(pool)
}

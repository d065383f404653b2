//! Staking pool family entities

use bondline::entity;
use bondline::governance::{
    Dao, DaoMetadata, DaoRole, DaoWhitelist, Factory, FactorySweep, GlobalRole, Mediator,
    MediatorSweep,
};
use bondline::{EntityId, Timestamps};
use bondline_common::{Address, Amount};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::StakingScope;

pub type StakingPoolFactory = Factory<StakingScope>;
pub type StakingPoolFactorySweep = FactorySweep<StakingScope>;
pub type StakingPoolMediator = Mediator<StakingScope>;
pub type StakingPoolMediatorSweep = MediatorSweep<StakingScope>;
pub type StakingPoolDao = Dao<StakingScope>;
pub type StakingPoolDaoWhitelist = DaoWhitelist<StakingScope>;
pub type StakingPoolDaoMetadata = DaoMetadata<StakingScope>;
pub type StakingPoolDaoRole = DaoRole<StakingScope>;
pub type StakingPoolRole = GlobalRole<StakingScope>;

/// One deployed staking pool, keyed by its address.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPool {
    pub id: EntityId,
    pub pool: Option<Address>,
    pub factory: Option<EntityId>,
    pub mediator: Option<EntityId>,
    pub dao: Option<EntityId>,
    pub stake_token: Option<Address>,
    pub creator: Option<Address>,
    pub treasury: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub epoch_start_timestamp: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub epoch_duration: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub min_total_pool_stake: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub max_total_pool_stake: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub minimum_contribution: Amount,
    pub reward_type: u8,
    pub owner: Option<Address>,
    pub beneficiary: Option<Address>,
    pub paused: bool,
    pub emergency_mode: bool,
    pub rewards_available: bool,
    #[serde_as(as = "DisplayFromStr")]
    pub rewards_available_timestamp: Amount,
    /// Total currently staked
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(StakingPool, "StakingPool");

/// Running stake deposited by one user.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPoolDeposit {
    pub id: EntityId,
    pub pool: Option<EntityId>,
    pub user: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(StakingPoolDeposit, "StakingPool__Deposit");

/// Running stake withdrawn by one user.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPoolWithdrawal {
    pub id: EntityId,
    pub pool: Option<EntityId>,
    pub user: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(StakingPoolWithdrawal, "StakingPool__Withdrawal");

/// Reward token of a pool: capacity, distribution ratio and remaining amount.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPoolReward {
    pub id: EntityId,
    pub pool: Option<EntityId>,
    pub token: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub max_amount: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub ratio: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(StakingPoolReward, "StakingPool__Reward");

/// Latest reward withdrawal of one user in one token.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPoolRewardWithdrawal {
    pub id: EntityId,
    pub pool: Option<EntityId>,
    pub reward: Option<EntityId>,
    pub token: Option<Address>,
    pub user: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(StakingPoolRewardWithdrawal, "StakingPool__RewardWithdrawal");

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPoolSweep {
    pub id: EntityId,
    pub pool: Option<EntityId>,
    pub token: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    pub beneficiary: Option<Address>,
    pub created_at_timestamp: u64,
}

entity!(StakingPoolSweep, "StakingPool__Sweep");

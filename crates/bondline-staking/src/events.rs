//! Decoded staking pool family events

use std::any::Any;

use bondline::governance::events::{
    BeneficiaryUpdate, CreatorUpdate, Erc20Sweep, OwnershipTransferred, PauseToggle,
};
use bondline::governance::{FactoryAdminEvent, MediatorAdminEvent};
use bondline::{TypeId, TypedBody};
use bondline_common::primitive_types::U256;
use bondline_common::Address;
use serde::{Deserialize, Serialize};

// ===== Staking pool =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub user: Address,
    #[serde(alias = "amount")]
    pub deposit_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawStake {
    pub user: Address,
    pub stake: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRewards {
    pub user: Address,
    pub reward_token: Address,
    pub rewards: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRewards {
    pub reward_tokens: Address,
    pub amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyMode {
    pub admin: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsAvailableTimestamp {
    pub rewards_available_timestamp: U256,
}

/// Events emitted by a staking pool contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingPoolEvent {
    BeneficiaryUpdate(BeneficiaryUpdate),
    Deposit(Deposit),
    EmergencyMode(EmergencyMode),
    #[serde(rename = "ERC20Sweep")]
    Erc20Sweep(Erc20Sweep),
    InitializeRewards(InitializeRewards),
    OwnershipTransferred(OwnershipTransferred),
    Paused(PauseToggle),
    RewardsAvailableTimestamp(RewardsAvailableTimestamp),
    Unpaused(PauseToggle),
    WithdrawRewards(WithdrawRewards),
    WithdrawStake(WithdrawStake),
}

impl StakingPoolEvent {
    pub fn type_id() -> TypeId {
        TypeId::new("staking_pool")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BeneficiaryUpdate(_) => "BeneficiaryUpdate",
            Self::Deposit(_) => "Deposit",
            Self::EmergencyMode(_) => "EmergencyMode",
            Self::Erc20Sweep(_) => "ERC20Sweep",
            Self::InitializeRewards(_) => "InitializeRewards",
            Self::OwnershipTransferred(_) => "OwnershipTransferred",
            Self::Paused(_) => "Paused",
            Self::RewardsAvailableTimestamp(_) => "RewardsAvailableTimestamp",
            Self::Unpaused(_) => "Unpaused",
            Self::WithdrawRewards(_) => "WithdrawRewards",
            Self::WithdrawStake(_) => "WithdrawStake",
        }
    }
}

impl TypedBody for StakingPoolEvent {
    fn envelope_type_id(&self) -> TypeId {
        Self::type_id()
    }

    fn event_name(&self) -> &'static str {
        self.name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===== Staking pool factory =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTokenConfig {
    pub tokens: Address,
    pub max_amount: U256,
    pub ratio: U256,
}

/// Pool configuration carried by `StakingPoolCreated`, in ABI tuple order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolConfig {
    pub dao_id: U256,
    pub min_total_pool_stake: U256,
    pub max_total_pool_stake: U256,
    pub minimum_contribution: U256,
    pub epoch_duration: U256,
    pub epoch_start_timestamp: U256,
    pub treasury: Address,
    pub stake_token: Address,
    #[serde(default)]
    pub reward_tokens: Vec<RewardTokenConfig>,
    pub reward_type: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingPoolCreated {
    pub staking_pool: Address,
    pub config: PoolConfig,
    pub creator: Address,
}

/// Events emitted by a staking pool factory contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingPoolFactoryEvent {
    StakingPoolCreated(StakingPoolCreated),
    #[serde(untagged)]
    Admin(FactoryAdminEvent),
}

impl StakingPoolFactoryEvent {
    pub fn type_id() -> TypeId {
        TypeId::new("staking_pool_factory")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::StakingPoolCreated(_) => "StakingPoolCreated",
            Self::Admin(event) => event.name(),
        }
    }
}

impl TypedBody for StakingPoolFactoryEvent {
    fn envelope_type_id(&self) -> TypeId {
        Self::type_id()
    }

    fn event_name(&self) -> &'static str {
        self.name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ===== Staking pool mediator =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStakingPool {
    pub dao_id: U256,
    pub staking_pool: Address,
    pub instigator: Address,
}

/// Events emitted by a staking pool mediator contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakingPoolMediatorEvent {
    AddStakingPool(AddStakingPool),
    StakingPoolCreatorUpdate(CreatorUpdate),
    #[serde(untagged)]
    Admin(MediatorAdminEvent),
}

impl StakingPoolMediatorEvent {
    pub fn type_id() -> TypeId {
        TypeId::new("staking_pool_mediator")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddStakingPool(_) => "AddStakingPool",
            Self::StakingPoolCreatorUpdate(_) => "StakingPoolCreatorUpdate",
            Self::Admin(event) => event.name(),
        }
    }
}

impl TypedBody for StakingPoolMediatorEvent {
    fn envelope_type_id(&self) -> TypeId {
        Self::type_id()
    }

    fn event_name(&self) -> &'static str {
        self.name()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

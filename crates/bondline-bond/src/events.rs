//! Decoded bond family events
//!
//! One enum per contract. Variant names are the ABI event names and payload
//! fields the ABI parameter names, so a decoded log maps onto them directly.

use std::any::Any;

use bondline::governance::events::{
    BeneficiaryUpdate, CreatorUpdate, Erc20Sweep, OwnershipTransferred, PauseToggle,
};
use bondline::governance::{FactoryAdminEvent, MediatorAdminEvent};
use bondline::{TypeId, TypedBody};
use bondline_common::primitive_types::U256;
use bondline_common::Address;
use serde::{Deserialize, Serialize};

// ===== Bond =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowRedemption {
    pub authorizer: Address,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReward {
    pub tokens: Address,
    pub amount: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub depositor: Address,
    pub collateral_tokens: Address,
    pub collateral_amount: U256,
}

/// Payload of `Expire` and `WithdrawCollateral`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralRelease {
    pub treasury: Address,
    pub collateral_tokens: Address,
    pub collateral_amount: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullCollateral {
    pub collateral_tokens: Address,
    pub collateral_amount: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDataUpdate {
    pub data: String,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCollateral {
    pub collateral_tokens: Address,
    pub collateral_amount: U256,
    pub debt_tokens: Address,
    pub debt_remaining: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemableUpdate {
    pub is_redeemable: bool,
    pub reason: String,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub redeemer: Address,
    pub debt_tokens: Address,
    pub debt_amount: U256,
    pub collateral_tokens: Address,
    pub collateral_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionTimestampUpdate {
    pub timestamp: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReward {
    pub tokens: Address,
    pub amount: U256,
    pub time_lock: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDebt {
    pub tokens: Address,
    pub claimant: Address,
    pub reward_debt: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardTimeLockUpdate {
    pub tokens: Address,
    pub time_lock: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashDeposits {
    pub collateral_tokens: Address,
    pub collateral_amount: U256,
    pub reason: String,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

/// Events emitted by a bond contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondEvent {
    AllowRedemption(AllowRedemption),
    BeneficiaryUpdate(BeneficiaryUpdate),
    ClaimReward(ClaimReward),
    Deposit(Deposit),
    #[serde(rename = "ERC20Sweep")]
    Erc20Sweep(Erc20Sweep),
    Expire(CollateralRelease),
    FullCollateral(FullCollateral),
    MetaDataUpdate(MetaDataUpdate),
    OwnershipTransferred(OwnershipTransferred),
    PartialCollateral(PartialCollateral),
    Paused(PauseToggle),
    RedeemableUpdate(RedeemableUpdate),
    Redemption(Redemption),
    RedemptionTimestampUpdate(RedemptionTimestampUpdate),
    RegisterReward(RegisterReward),
    RewardDebt(RewardDebt),
    RewardTimeLockUpdate(RewardTimeLockUpdate),
    SlashDeposits(SlashDeposits),
    Transfer(Transfer),
    Unpaused(PauseToggle),
    WithdrawCollateral(CollateralRelease),
}

impl BondEvent {
    pub fn type_id() -> TypeId {
        TypeId::new("bond")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AllowRedemption(_) => "AllowRedemption",
            Self::BeneficiaryUpdate(_) => "BeneficiaryUpdate",
            Self::ClaimReward(_) => "ClaimReward",
            Self::Deposit(_) => "Deposit",
            Self::Erc20Sweep(_) => "ERC20Sweep",
            Self::Expire(_) => "Expire",
            Self::FullCollateral(_) => "FullCollateral",
            Self::MetaDataUpdate(_) => "MetaDataUpdate",
            Self::OwnershipTransferred(_) => "OwnershipTransferred",
            Self::PartialCollateral(_) => "PartialCollateral",
            Self::Paused(_) => "Paused",
            Self::RedeemableUpdate(_) => "RedeemableUpdate",
            Self::Redemption(_) => "Redemption",
            Self::RedemptionTimestampUpdate(_) => "RedemptionTimestampUpdate",
            Self::RegisterReward(_) => "RegisterReward",
            Self::RewardDebt(_) => "RewardDebt",
            Self::RewardTimeLockUpdate(_) => "RewardTimeLockUpdate",
            Self::SlashDeposits(_) => "SlashDeposits",
            Self::Transfer(_) => "Transfer",
            Self::Unpaused(_) => "Unpaused",
            Self::WithdrawCollateral(_) => "WithdrawCollateral",
        }
    }
}

impl TypedBody for BondEvent {
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

// ===== Bond factory =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataParams {
    pub name: String,
    pub symbol: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationParams {
    pub debt_token_amount: U256,
    pub collateral_tokens: Address,
    pub expiry_timestamp: U256,
    pub minimum_deposit: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardParams {
    pub tokens: Address,
    pub amount: U256,
    pub time_lock: U256,
}

/// Payload of `CreatePerformanceBond` and its legacy name `CreateBond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBond {
    pub bond: Address,
    pub metadata: MetadataParams,
    pub configuration: ConfigurationParams,
    #[serde(default)]
    pub rewards: Vec<RewardParams>,
    pub treasury: Address,
    pub instigator: Address,
}

/// Events emitted by a bond factory contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondFactoryEvent {
    CreateBond(CreateBond),
    CreatePerformanceBond(CreateBond),
    #[serde(untagged)]
    Admin(FactoryAdminEvent),
}

impl BondFactoryEvent {
    pub fn type_id() -> TypeId {
        TypeId::new("bond_factory")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateBond(_) => "CreateBond",
            Self::CreatePerformanceBond(_) => "CreatePerformanceBond",
            Self::Admin(event) => event.name(),
        }
    }
}

impl TypedBody for BondFactoryEvent {
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

// ===== Bond mediator =====

/// Payload of `AddPerformanceBond` and its legacy name `AddBond`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBond {
    pub dao_id: U256,
    pub bond: Address,
    pub instigator: Address,
}

/// Events emitted by a bond mediator contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BondMediatorEvent {
    AddBond(AddBond),
    AddPerformanceBond(AddBond),
    BondCreatorUpdate(CreatorUpdate),
    PerformanceBondCreatorUpdate(CreatorUpdate),
    #[serde(untagged)]
    Admin(MediatorAdminEvent),
}

impl BondMediatorEvent {
    pub fn type_id() -> TypeId {
        TypeId::new("bond_mediator")
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AddBond(_) => "AddBond",
            Self::AddPerformanceBond(_) => "AddPerformanceBond",
            Self::BondCreatorUpdate(_) => "BondCreatorUpdate",
            Self::PerformanceBondCreatorUpdate(_) => "PerformanceBondCreatorUpdate",
            Self::Admin(event) => event.name(),
        }
    }
}

impl TypedBody for BondMediatorEvent {
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

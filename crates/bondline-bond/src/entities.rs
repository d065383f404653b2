//! Bond family entities
//!
//! Amounts are signed and serialized as decimal strings. Child records point at
//! their bond through the `bond` field; the bond's collections (deposits, sweeps,
//! reward pools, ...) are derived from it by the store.

use bondline::entity;
use bondline::governance::{
    Dao, DaoMetadata, DaoRole, DaoWhitelist, Factory, FactorySweep, GlobalRole, Mediator,
    MediatorSweep,
};
use bondline::{EntityId, Timestamps};
use bondline_common::{Address, Amount};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::BondScope;

pub type BondFactory = Factory<BondScope>;
pub type BondFactorySweep = FactorySweep<BondScope>;
pub type BondMediator = Mediator<BondScope>;
pub type BondMediatorSweep = MediatorSweep<BondScope>;
pub type BondDao = Dao<BondScope>;
pub type BondDaoWhitelist = DaoWhitelist<BondScope>;
pub type BondDaoMetadata = DaoMetadata<BondScope>;
pub type BondDaoRole = DaoRole<BondScope>;
pub type BondRole = GlobalRole<BondScope>;

/// One deployed bond contract, keyed by its address.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub id: EntityId,
    pub bond: Option<Address>,
    pub factory: Option<EntityId>,
    pub mediator: Option<EntityId>,
    pub dao: Option<EntityId>,
    pub owner: Option<Address>,
    pub beneficiary: Option<Address>,
    pub treasury: Option<Address>,
    pub collateral_tokens: Option<Address>,
    /// Collateral currently held by the bond
    #[serde_as(as = "DisplayFromStr")]
    pub collateral_amount: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub collateral_slashed: Amount,
    pub is_redeemable: bool,
    pub paused: bool,
    pub expired: bool,
    pub collateral_full: bool,
    pub collateral_withdrawn: bool,
    pub redeemable_reason: Option<String>,
    pub redeemable_authorizer: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub redeemable_timestamp: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub redemption_excess: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(Bond, "Bond");

/// Running deposit total of one depositor in one collateral token.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondDeposit {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub depositor: Option<Address>,
    pub collateral_tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub collateral_amount: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(BondDeposit, "Bond__Deposit");

/// Running redemption totals of one redeemer for one debt token.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondRedemption {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub redeemer: Option<Address>,
    pub collateral_tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub collateral_amount: Amount,
    pub debt_tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub debt_amount: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(BondRedemption, "Bond__Redemption");

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondSweep {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub token: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    pub beneficiary: Option<Address>,
    pub created_at_timestamp: u64,
}

entity!(BondSweep, "Bond__Sweep");

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondRewardClaimed {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub claimant: Option<Address>,
    pub tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    pub created_at_timestamp: u64,
}

entity!(BondRewardClaimed, "Bond__RewardClaimed");

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondRewardDebt {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub claimant: Option<Address>,
    pub tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub reward_debt: Amount,
    pub created_at_timestamp: u64,
}

entity!(BondRewardDebt, "Bond__RewardDebt");

/// Reward registered on a bond for one token, updated in place.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondRewardPool {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub time_lock: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(BondRewardPool, "Bond__RewardPool");

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondSlashDeposit {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub collateral_tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub collateral_amount: Amount,
    pub reason: String,
    pub created_at_timestamp: u64,
}

entity!(BondSlashDeposit, "Bond__SlashDeposit");

/// Transfer of the bond's debt token.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondTransfer {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub from: Option<Address>,
    pub to: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub value: Amount,
    pub created_at_timestamp: u64,
}

entity!(BondTransfer, "Bond__Transfer");

/// Keyed by the bond address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondMetadata {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    pub name: String,
    pub symbol: String,
    pub data: String,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(BondMetadata, "Bond__Metadata");

/// Keyed by the bond address.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondConfiguration {
    pub id: EntityId,
    pub bond: Option<EntityId>,
    #[serde_as(as = "DisplayFromStr")]
    pub debt_token_amount: Amount,
    pub collateral_tokens: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub expiry_timestamp: Amount,
    #[serde_as(as = "DisplayFromStr")]
    pub minimum_deposit: Amount,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

entity!(BondConfiguration, "Bond__Configuration");

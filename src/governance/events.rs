//! Administrative events emitted by both factory and mediator contracts
//!
//! Payload field names follow the contract ABI parameter names.

use bondline_common::primitive_types::U256;
use bondline_common::{Address, Bytes32};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryUpdate {
    pub beneficiary: Address,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Erc20Sweep {
    pub beneficiary: Address,
    pub tokens: Address,
    pub amount: U256,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

/// Payload of both `Paused` and `Unpaused`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PauseToggle {
    pub account: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDao {
    pub id: U256,
    pub treasury: Address,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoMetaDataUpdate {
    pub dao_id: U256,
    pub data: String,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoTreasuryUpdate {
    pub dao_id: U256,
    pub treasury: Address,
    pub instigator: Address,
}

/// Payload of both `AddCollateralWhitelist` and `RemoveCollateralWhitelist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollateralWhitelistUpdate {
    pub dao_id: U256,
    pub collateral_tokens: Address,
    pub instigator: Address,
}

/// Payload of both `GrantDaoRole` and `RevokeDaoRole`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaoRoleUpdate {
    pub dao_id: U256,
    pub role: Bytes32,
    pub account: Address,
    pub instigator: Address,
}

/// Payload of both `GrantGlobalRole` and `RevokeGlobalRole`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRoleUpdate {
    // GrantGlobalRole names this parameter `indexedrole`
    #[serde(alias = "indexedrole")]
    pub role: Bytes32,
    pub account: Address,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminChanged {
    pub previous_admin: Address,
    pub new_admin: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconUpgraded {
    pub beacon: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgraded {
    pub implementation: Address,
}

/// Payload of the mediator's creator update (bond or staking-pool factory swap).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorUpdate {
    pub previous_creator: Address,
    pub update_creator: Address,
    pub instigator: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Initialized {
    pub version: u8,
}

/// Events every factory contract emits besides its child-creation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryAdminEvent {
    BeneficiaryUpdate(BeneficiaryUpdate),
    #[serde(rename = "ERC20Sweep")]
    Erc20Sweep(Erc20Sweep),
    OwnershipTransferred(OwnershipTransferred),
    Paused(PauseToggle),
    Unpaused(PauseToggle),
}

impl FactoryAdminEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeneficiaryUpdate(_) => "BeneficiaryUpdate",
            Self::Erc20Sweep(_) => "ERC20Sweep",
            Self::OwnershipTransferred(_) => "OwnershipTransferred",
            Self::Paused(_) => "Paused",
            Self::Unpaused(_) => "Unpaused",
        }
    }
}

/// Events every mediator contract emits besides linking its children to DAOs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediatorAdminEvent {
    AddCollateralWhitelist(CollateralWhitelistUpdate),
    AdminChanged(AdminChanged),
    BeaconUpgraded(BeaconUpgraded),
    BeneficiaryUpdate(BeneficiaryUpdate),
    CreateDao(CreateDao),
    DaoMetaDataUpdate(DaoMetaDataUpdate),
    DaoTreasuryUpdate(DaoTreasuryUpdate),
    #[serde(rename = "ERC20Sweep")]
    Erc20Sweep(Erc20Sweep),
    GrantDaoRole(DaoRoleUpdate),
    GrantGlobalRole(GlobalRoleUpdate),
    Initialized(Initialized),
    Paused(PauseToggle),
    RemoveCollateralWhitelist(CollateralWhitelistUpdate),
    RevokeDaoRole(DaoRoleUpdate),
    RevokeGlobalRole(GlobalRoleUpdate),
    Unpaused(PauseToggle),
    Upgraded(Upgraded),
}

impl MediatorAdminEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddCollateralWhitelist(_) => "AddCollateralWhitelist",
            Self::AdminChanged(_) => "AdminChanged",
            Self::BeaconUpgraded(_) => "BeaconUpgraded",
            Self::BeneficiaryUpdate(_) => "BeneficiaryUpdate",
            Self::CreateDao(_) => "CreateDao",
            Self::DaoMetaDataUpdate(_) => "DaoMetaDataUpdate",
            Self::DaoTreasuryUpdate(_) => "DaoTreasuryUpdate",
            Self::Erc20Sweep(_) => "ERC20Sweep",
            Self::GrantDaoRole(_) => "GrantDaoRole",
            Self::GrantGlobalRole(_) => "GrantGlobalRole",
            Self::Initialized(_) => "Initialized",
            Self::Paused(_) => "Paused",
            Self::RemoveCollateralWhitelist(_) => "RemoveCollateralWhitelist",
            Self::RevokeDaoRole(_) => "RevokeDaoRole",
            Self::RevokeGlobalRole(_) => "RevokeGlobalRole",
            Self::Unpaused(_) => "Unpaused",
            Self::Upgraded(_) => "Upgraded",
        }
    }
}

//! Staking pool projectors for bondline
//!
//! The staking family mirrors the bond family: a pool contract, the factory that
//! deploys pools, and a mediator grouping pools into DAOs. Pools track a single
//! stake token, so deposits and withdrawals accumulate per user only.
//!
//! - [`StakingPoolProjector`]: stake, rewards, emergency mode
//! - [`StakingPoolFactoryProjector`]: pool creation and factory administration
//! - [`StakingPoolMediatorProjector`]: DAOs, whitelists, roles, factory binding

pub mod entities;
pub mod events;
pub mod factory;
pub mod mediator;
pub mod pool;

use bondline::governance::Scope;
use bondline::SourceTemplate;

pub use entities::{
    StakingPool, StakingPoolDao, StakingPoolDaoMetadata, StakingPoolDaoRole,
    StakingPoolDaoWhitelist, StakingPoolDeposit, StakingPoolFactory, StakingPoolFactorySweep,
    StakingPoolMediator, StakingPoolMediatorSweep, StakingPoolReward, StakingPoolRewardWithdrawal,
    StakingPoolRole, StakingPoolSweep, StakingPoolWithdrawal,
};
pub use events::{StakingPoolEvent, StakingPoolFactoryEvent, StakingPoolMediatorEvent};
pub use factory::StakingPoolFactoryProjector;
pub use mediator::StakingPoolMediatorProjector;
pub use pool::StakingPoolProjector;

/// Governance scope of the staking pool family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StakingScope;

impl Scope for StakingScope {
    const FACTORY: &'static str = "StakingPoolFactory";
    const FACTORY_SWEEP: &'static str = "StakingPoolFactory__Sweep";
    const MEDIATOR: &'static str = "StakingPoolMediator";
    const MEDIATOR_SWEEP: &'static str = "StakingPoolMediator__Sweep";
    const DAO: &'static str = "StakingPool__DAO";
    const DAO_WHITELIST: &'static str = "StakingPool__DAO__CollateralWhitelist";
    const DAO_METADATA: &'static str = "StakingPool__DAO__Metadata";
    const DAO_ROLE: &'static str = "StakingPool__DAO__Role";
    const ROLE: &'static str = "StakingPool__Role";
    const FACTORY_TEMPLATE: SourceTemplate = SourceTemplate::StakingPoolFactory;
    const CREATOR_GETTER: &'static str = "stakingPoolCreator";
}

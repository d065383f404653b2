//! Performance bond projectors for bondline
//!
//! Three contracts make up a bond deployment, each with its own event stream:
//!
//! - [`BondProjector`]: one bond contract (collateral, redemption, rewards, slashing)
//! - [`BondFactoryProjector`]: the factory that deploys bonds and starts their streams
//! - [`BondMediatorProjector`]: the mediator grouping bonds into DAOs, with
//!   whitelists, roles and the current factory binding
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use bondline::{ContractRegistry, Engine, SqliteStore};
//! use bondline_bond::{BondFactoryProjector, BondMediatorProjector, BondProjector};
//!
//! let store = Arc::new(SqliteStore::open("./bondline.db")?);
//! let engine = Engine::new(store, Arc::new(ContractRegistry::new()))
//!     .with_projector(Arc::new(BondProjector::new()))
//!     .with_projector(Arc::new(BondFactoryProjector::new()))
//!     .with_projector(Arc::new(BondMediatorProjector::new(reader)));
//! ```

pub mod bond;
pub mod entities;
pub mod events;
pub mod factory;
pub mod mediator;

use bondline::governance::Scope;
use bondline::SourceTemplate;

pub use bond::BondProjector;
pub use entities::{
    Bond, BondConfiguration, BondDao, BondDaoMetadata, BondDaoRole, BondDaoWhitelist, BondDeposit,
    BondFactory, BondFactorySweep, BondMediator, BondMediatorSweep, BondMetadata, BondRedemption,
    BondRewardClaimed, BondRewardDebt, BondRewardPool, BondRole, BondSlashDeposit, BondSweep,
    BondTransfer,
};
pub use events::{BondEvent, BondFactoryEvent, BondMediatorEvent};
pub use factory::BondFactoryProjector;
pub use mediator::BondMediatorProjector;

/// Governance scope of the bond family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BondScope;

impl Scope for BondScope {
    const FACTORY: &'static str = "BondFactory";
    const FACTORY_SWEEP: &'static str = "BondFactory__Sweep";
    const MEDIATOR: &'static str = "BondMediator";
    const MEDIATOR_SWEEP: &'static str = "BondMediator__Sweep";
    const DAO: &'static str = "Bond__DAO";
    const DAO_WHITELIST: &'static str = "Bond__DAO__CollateralWhitelist";
    const DAO_METADATA: &'static str = "Bond__DAO__Metadata";
    const DAO_ROLE: &'static str = "Bond__DAO__Role";
    const ROLE: &'static str = "Bond__Role";
    const FACTORY_TEMPLATE: SourceTemplate = SourceTemplate::PerformanceBondFactory;
    const CREATOR_GETTER: &'static str = "bondCreator";
}

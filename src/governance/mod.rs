//! Factory, mediator, DAO and role model shared by both contract families
//!
//! Bond and staking-pool deployments are administered the same way: a factory
//! spawns children, a mediator groups them into DAOs, and the mediator records
//! whitelists and role grants. The two families only differ in entity kind names,
//! the factory template and the getter used to read the current factory, which
//! a [`Scope`] supplies.

pub mod entities;
pub mod events;
pub mod factory;
pub mod mediator;

use std::fmt::Debug;

use crate::etl::source::SourceTemplate;

pub use entities::{
    Dao, DaoMetadata, DaoRole, DaoWhitelist, Factory, FactorySweep, GlobalRole, Mediator,
    MediatorSweep,
};
pub use events::{FactoryAdminEvent, MediatorAdminEvent};
pub use factory::{apply_factory_admin, load_factory};
pub use mediator::{apply_mediator_admin, bind_factory, load_mediator, FactoryBinding};

/// Contract family the governance entities belong to.
pub trait Scope: Debug + Clone + Copy + Default + PartialEq + Send + Sync + 'static {
    const FACTORY: &'static str;
    const FACTORY_SWEEP: &'static str;
    const MEDIATOR: &'static str;
    const MEDIATOR_SWEEP: &'static str;
    const DAO: &'static str;
    const DAO_WHITELIST: &'static str;
    const DAO_METADATA: &'static str;
    const DAO_ROLE: &'static str;
    const ROLE: &'static str;

    /// Template started for a factory bound to a mediator
    const FACTORY_TEMPLATE: SourceTemplate;

    /// Mediator getter returning the current factory
    const CREATOR_GETTER: &'static str;
}

use std::marker::PhantomData;

use bondline_common::primitive_types::U256;
use bondline_common::{Address, Amount, Bytes32};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use super::Scope;
use crate::entity::{Entity, Timestamps};
use crate::identity::EntityId;

macro_rules! scoped_entity {
    ($ty:ident, $kind:ident) => {
        impl<S: Scope> Entity for $ty<S> {
            const KIND: &'static str = S::$kind;

            fn with_id(id: EntityId) -> Self {
                Self {
                    id,
                    ..Default::default()
                }
            }

            fn id(&self) -> &EntityId {
                &self.id
            }
        }
    };
}

/// Factory contract, keyed by its address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Factory<S> {
    pub id: EntityId,
    pub factory: Option<Address>,
    /// Mediator this factory was last bound to
    pub mediator: Option<EntityId>,
    pub owner: Option<Address>,
    pub beneficiary: Option<Address>,
    pub paused: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(Factory, FACTORY);

/// Mediator contract, keyed by its address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Mediator<S> {
    pub id: EntityId,
    /// Current factory; earlier factories keep their `mediator` back-reference
    pub factory: Option<EntityId>,
    pub admin: Option<Address>,
    pub beacon: Option<Address>,
    pub implementation: Option<Address>,
    pub beneficiary: Option<Address>,
    pub paused: bool,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(Mediator, MEDIATOR);

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct FactorySweep<S> {
    pub id: EntityId,
    pub factory: Option<EntityId>,
    pub token: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    pub beneficiary: Option<Address>,
    pub created_at_timestamp: u64,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(FactorySweep, FACTORY_SWEEP);

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct MediatorSweep<S> {
    pub id: EntityId,
    pub mediator: Option<EntityId>,
    pub token: Option<Address>,
    #[serde_as(as = "DisplayFromStr")]
    pub amount: Amount,
    pub beneficiary: Option<Address>,
    pub created_at_timestamp: u64,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(MediatorSweep, MEDIATOR_SWEEP);

/// DAO, keyed by [`EntityId::dao`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Dao<S> {
    pub id: EntityId,
    pub dao_id: U256,
    pub mediator: Option<EntityId>,
    pub treasury: Option<Address>,
    pub owner: Option<Address>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(Dao, DAO);

/// Whitelisted collateral token of a DAO. Exists only while whitelisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct DaoWhitelist<S> {
    pub id: EntityId,
    pub dao: Option<EntityId>,
    pub token: Option<Address>,
    pub mediator: Option<EntityId>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(DaoWhitelist, DAO_WHITELIST);

/// Metadata blob of a DAO, keyed like the DAO itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct DaoMetadata<S> {
    pub id: EntityId,
    pub data: String,
    pub dao: Option<EntityId>,
    pub mediator: Option<EntityId>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(DaoMetadata, DAO_METADATA);

/// Role granted to an account within one DAO. Exists only while granted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct DaoRole<S> {
    pub id: EntityId,
    pub dao: Option<EntityId>,
    pub mediator: Option<EntityId>,
    pub role: Bytes32,
    pub account: Option<Address>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(DaoRole, DAO_ROLE);

/// Role granted to an account across every DAO of a mediator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct GlobalRole<S> {
    pub id: EntityId,
    pub mediator: Option<EntityId>,
    pub role: Bytes32,
    pub account: Option<Address>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
    #[serde(skip)]
    scope: PhantomData<S>,
}

scoped_entity!(GlobalRole, ROLE);

//! Bondline - entity materialization for performance bond and staking pool contracts.
//!
//! Decoded contract events arrive one at a time, wrapped in an [`etl::Envelope`]
//! with their chain context. The [`etl::Engine`] hands each envelope to every
//! interested [`etl::Projector`], which load-or-creates the entities it needs,
//! applies the event and writes them back through a per-event
//! [`etl::Changeset`]. The change set is committed atomically, then any
//! dynamic sources it discovered are registered with the host.
//!
//! Contract families live in their own crates (`bondline-bond`,
//! `bondline-staking`); this crate holds the engine, the store contract, the
//! identity scheme and the factory/mediator/DAO model both families share.

pub mod entity;
pub mod error;
pub mod etl;
pub mod governance;
pub mod identity;

// Re-export commonly used types for projector authors
pub use async_trait::async_trait;
pub use bondline_common as common;

pub use entity::{Entity, Timestamps};
pub use error::{EngineError, StoreError};
pub use etl::{
    BatchSummary, Changeset, ContractReader, ContractRegistry, Engine, EntityStore,
    EntityStoreExt, Envelope, EventContext, MemoryStore, ProcessOutcome, Projector,
    SourceRegistry, SourceTemplate, SqliteStore, StaticReader, TypeId, TypedBody,
};
pub use identity::EntityId;

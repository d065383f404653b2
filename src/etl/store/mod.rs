//! Entity store contract
//!
//! Entities are persisted as JSON documents keyed by `(kind, id)`. Reverse
//! relationships are never stored: they are answered by [`EntityStore::find_by_field`]
//! from the foreign-key field of the child.

pub mod changeset;
pub mod memory;
pub mod sqlite;

use serde_json::Value;

use crate::entity::Entity;
use crate::error::StoreError;
use crate::identity::EntityId;

pub use changeset::Changeset;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// One write produced by a projected event.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Insert or fully replace the document at `(kind, id)`.
    Upsert {
        kind: &'static str,
        id: EntityId,
        body: Value,
    },
    /// Delete the document at `(kind, id)`. Deleting an absent key is a no-op.
    Remove { kind: &'static str, id: EntityId },
}

impl WriteOp {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upsert { kind, .. } | Self::Remove { kind, .. } => kind,
        }
    }

    pub fn id(&self) -> &EntityId {
        match self {
            Self::Upsert { id, .. } | Self::Remove { id, .. } => id,
        }
    }

    /// Label used in metrics and logs.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::Upsert { .. } => "upsert",
            Self::Remove { .. } => "remove",
        }
    }
}

/// Keyed document store backing the projectors.
pub trait EntityStore: Send + Sync {
    /// Load the document at `(kind, id)`.
    fn get(&self, kind: &str, id: &EntityId) -> Result<Option<Value>, StoreError>;

    /// All documents of `kind` whose top-level `field` equals the string `value`,
    /// ordered by id.
    fn find_by_field(&self, kind: &str, field: &str, value: &str)
        -> Result<Vec<Value>, StoreError>;

    /// Number of documents of `kind`.
    fn count(&self, kind: &str) -> Result<usize, StoreError>;

    /// Apply all writes atomically, in order.
    fn apply(&self, ops: &[WriteOp]) -> Result<(), StoreError>;
}

/// Typed access on top of any [`EntityStore`].
pub trait EntityStoreExt: EntityStore {
    fn load<E: Entity>(&self, id: &EntityId) -> Result<Option<E>, StoreError> {
        self.get(E::KIND, id)?
            .map(|body| decode::<E>(id.as_str(), body))
            .transpose()
    }

    /// Children of `parent` reached through their `field` foreign key.
    fn derived<E: Entity>(&self, field: &str, parent: &EntityId) -> Result<Vec<E>, StoreError> {
        self.find_by_field(E::KIND, field, parent.as_str())?
            .into_iter()
            .map(|body| {
                let id = body
                    .get("id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                decode::<E>(&id, body)
            })
            .collect()
    }

    fn count_of<E: Entity>(&self) -> Result<usize, StoreError> {
        self.count(E::KIND)
    }
}

impl<S: EntityStore + ?Sized> EntityStoreExt for S {}

pub(crate) fn decode<E: Entity>(id: &str, body: Value) -> Result<E, StoreError> {
    serde_json::from_value(body).map_err(|source| StoreError::Decode {
        kind: E::KIND.to_string(),
        id: id.to_string(),
        source,
    })
}

pub(crate) fn encode<E: Entity>(entity: &E) -> Result<Value, StoreError> {
    serde_json::to_value(entity).map_err(|source| StoreError::Encode {
        kind: E::KIND,
        id: entity.id().clone(),
        source,
    })
}

//! Entity model shared by every projector
//!
//! An entity is a typed record with an immutable [`EntityId`] and mutable
//! fields, persisted as JSON under its [`Entity::KIND`]. Relationship fields
//! hold the id of the parent; reverse collections are never stored and are
//! computed by the store from those fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::identity::EntityId;

/// Typed record stored under `(KIND, id)`.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Store name of this entity type (e.g. `Bond__Deposit`).
    const KIND: &'static str;

    /// Zero-valued instance with the given key, used by load-or-create.
    fn with_id(id: EntityId) -> Self;

    fn id(&self) -> &EntityId;
}

/// Creation and last-update block timestamps (seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timestamps {
    pub created_at_timestamp: u64,
    pub last_updated_timestamp: u64,
}

impl Timestamps {
    /// Record an update at `timestamp`, stamping creation on first touch.
    pub fn touch(&mut self, timestamp: u64) {
        if self.created_at_timestamp == 0 {
            self.created_at_timestamp = timestamp;
        }
        self.last_updated_timestamp = timestamp;
    }

    /// Record a canonical creation at `timestamp`, overriding any earlier stamp.
    pub fn created(&mut self, timestamp: u64) {
        self.created_at_timestamp = timestamp;
        self.last_updated_timestamp = timestamp;
    }
}

/// Implements [`Entity`] for a struct with an `id: EntityId` field and a `Default` impl.
#[macro_export]
macro_rules! entity {
    ($ty:ty, $kind:expr) => {
        impl $crate::entity::Entity for $ty {
            const KIND: &'static str = $kind;

            fn with_id(id: $crate::identity::EntityId) -> Self {
                Self {
                    id,
                    ..Default::default()
                }
            }

            fn id(&self) -> &$crate::identity::EntityId {
                &self.id
            }
        }
    };
}

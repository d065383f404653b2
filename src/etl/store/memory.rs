//! In-memory entity store, used by tests and short replays.

use std::collections::BTreeMap;
use std::sync::RwLock;

use serde_json::Value;

use super::{EntityStore, WriteOp};
use crate::error::StoreError;
use crate::identity::EntityId;

type Key = (String, String);

#[derive(Debug, Default)]
pub struct MemoryStore {
    entities: RwLock<BTreeMap<Key, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of documents across all kinds.
    pub fn len(&self) -> usize {
        self.entities.read().map(|entities| entities.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::LockPoisoned("memory store".to_string())
}

impl EntityStore for MemoryStore {
    fn get(&self, kind: &str, id: &EntityId) -> Result<Option<Value>, StoreError> {
        let entities = self.entities.read().map_err(poisoned)?;
        Ok(entities
            .get(&(kind.to_string(), id.as_str().to_string()))
            .cloned())
    }

    fn find_by_field(
        &self,
        kind: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, StoreError> {
        let entities = self.entities.read().map_err(poisoned)?;
        Ok(entities
            .iter()
            .filter(|((entity_kind, _), body)| {
                entity_kind == kind && body.get(field).and_then(Value::as_str) == Some(value)
            })
            .map(|(_, body)| body.clone())
            .collect())
    }

    fn count(&self, kind: &str) -> Result<usize, StoreError> {
        let entities = self.entities.read().map_err(poisoned)?;
        Ok(entities.keys().filter(|(entity_kind, _)| entity_kind == kind).count())
    }

    fn apply(&self, ops: &[WriteOp]) -> Result<(), StoreError> {
        let mut entities = self.entities.write().map_err(poisoned)?;
        for op in ops {
            let key = (op.kind().to_string(), op.id().as_str().to_string());
            match op {
                WriteOp::Upsert { body, .. } => {
                    entities.insert(key, body.clone());
                }
                WriteOp::Remove { .. } => {
                    entities.remove(&key);
                }
            }
        }
        Ok(())
    }
}

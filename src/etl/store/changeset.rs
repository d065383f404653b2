//! Per-event write overlay
//!
//! A [`Changeset`] reads through to the committed store and buffers every write
//! a projector makes while handling one event. Nothing reaches the store until
//! the engine commits the whole set, so a failing handler leaves no partial
//! state behind.

use std::collections::BTreeMap;

use bondline_common::Address;
use serde_json::Value;

use super::{decode, encode, EntityStore, EntityStoreExt, WriteOp};
use crate::entity::Entity;
use crate::error::StoreError;
use crate::etl::source::{SourceRegistration, SourceTemplate};
use crate::identity::EntityId;

pub struct Changeset<'a> {
    base: &'a dyn EntityStore,
    /// `None` marks a pending removal.
    pending: BTreeMap<(&'static str, EntityId), Option<Value>>,
    /// Insertion order of `pending` keys, so writes are applied as issued.
    order: Vec<(&'static str, EntityId)>,
    sources: Vec<SourceRegistration>,
}

impl<'a> Changeset<'a> {
    pub fn new(base: &'a dyn EntityStore) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
            order: Vec::new(),
            sources: Vec::new(),
        }
    }

    /// Load an entity, seeing this event's own pending writes first.
    pub fn load<E: Entity>(&self, id: &EntityId) -> Result<Option<E>, StoreError> {
        match self.pending.get(&(E::KIND, id.clone())) {
            Some(Some(body)) => decode::<E>(id.as_str(), body.clone()).map(Some),
            Some(None) => Ok(None),
            None => self.base.load::<E>(id),
        }
    }

    /// Load an entity, or synthesize a zero-valued one with that key.
    pub fn load_or_create<E: Entity>(&self, id: EntityId) -> Result<E, StoreError> {
        Ok(match self.load::<E>(&id)? {
            Some(entity) => entity,
            None => E::with_id(id),
        })
    }

    /// Buffer a full-replace upsert.
    pub fn save<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError> {
        let body = encode(entity)?;
        self.stage((E::KIND, entity.id().clone()), Some(body));
        Ok(())
    }

    /// Buffer a removal. Removing a key that does not exist is a no-op.
    pub fn remove<E: Entity>(&mut self, id: &EntityId) {
        self.stage((E::KIND, id.clone()), None);
    }

    /// Queue a dynamic source registration, issued after the writes commit.
    pub fn register_source(&mut self, template: SourceTemplate, address: Address) {
        let registration = SourceRegistration { template, address };
        if !self.sources.contains(&registration) {
            self.sources.push(registration);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.sources.is_empty()
    }

    pub fn sources(&self) -> &[SourceRegistration] {
        &self.sources
    }

    /// Final writes (one per touched key) and queued registrations.
    pub fn into_parts(mut self) -> (Vec<WriteOp>, Vec<SourceRegistration>) {
        let ops = self
            .order
            .into_iter()
            .filter_map(|key| {
                let body = self.pending.remove(&key)?;
                let (kind, id) = key;
                Some(match body {
                    Some(body) => WriteOp::Upsert { kind, id, body },
                    None => WriteOp::Remove { kind, id },
                })
            })
            .collect();
        (ops, self.sources)
    }

    fn stage(&mut self, key: (&'static str, EntityId), body: Option<Value>) {
        if self.pending.insert(key.clone(), body).is_none() {
            self.order.push(key);
        }
    }
}

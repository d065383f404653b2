//! Envelopes carry one decoded event and its chain context to the projectors

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::event::EventContext;
use crate::identity::EntityId;

/// Routing key of an event body, hashed from the contract family name
/// (`"bond"`, `"staking_pool_factory"`, ...).
///
/// Only compared within one process, so the std hasher is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u64);

impl TypeId {
    pub fn new(family: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        family.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// A decoded event enum that can travel in an [`Envelope`].
pub trait TypedBody: Send + Sync {
    fn envelope_type_id(&self) -> TypeId;
    /// Contract event name, used in logs
    fn event_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
}

pub struct Envelope {
    /// Log key of the event (`{tx_hash}-{log_index}`)
    pub id: EntityId,
    pub type_id: TypeId,
    pub context: EventContext,
    pub body: Box<dyn TypedBody>,
}

impl Envelope {
    pub fn new(context: EventContext, body: Box<dyn TypedBody>) -> Self {
        Self {
            id: context.log_id(),
            type_id: body.envelope_type_id(),
            context,
            body,
        }
    }

    /// Borrow the body as `T`, or `None` if it is another family's event.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.body.as_any().downcast_ref::<T>()
    }

    pub fn event_name(&self) -> &'static str {
        self.body.event_name()
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("id", &self.id)
            .field("event", &self.event_name())
            .field("address", &self.context.address)
            .field("block", &self.context.block_number)
            .finish()
    }
}

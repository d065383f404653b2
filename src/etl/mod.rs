pub mod engine;
pub mod envelope;
pub mod event;
pub mod projector;
pub mod reader;
pub mod source;
pub mod store;

pub use engine::{BatchSummary, Engine, ProcessOutcome};
pub use envelope::{Envelope, TypeId, TypedBody};
pub use event::EventContext;
pub use projector::Projector;
pub use reader::{ContractReader, StaticReader};
pub use source::{ContractRegistry, SourceRegistration, SourceRegistry, SourceTemplate};
pub use store::{Changeset, EntityStore, EntityStoreExt, MemoryStore, SqliteStore, WriteOp};

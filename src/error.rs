use crate::etl::source::SourceTemplate;
use crate::identity::EntityId;
use bondline_common::Address;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to encode {kind} {id}: {source}")]
    Encode {
        kind: &'static str,
        id: EntityId,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to decode {kind} {id}: {source}")]
    Decode {
        kind: String,
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Projector '{projector}' failed on event {event}")]
    Projection {
        projector: String,
        event: EntityId,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to commit event {event}: {source}")]
    Commit {
        event: EntityId,
        #[source]
        source: StoreError,
    },
    #[error("Failed to register {template} source at {address:#x}")]
    Registration {
        template: SourceTemplate,
        address: Address,
        #[source]
        source: anyhow::Error,
    },
}

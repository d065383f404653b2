//! Engine runs projectors over an ordered event stream
//!
//! Each envelope is handled in isolation: every interested projector writes into
//! one shared [`Changeset`], queued dynamic sources are handed to the
//! [`SourceRegistry`], and the change set is committed in a single store call.
//! A failing projector discards the change set, so nothing from that event is
//! committed or registered. A failed registration also commits nothing; sources
//! registered before a failed commit stay registered, which is harmless because
//! registration is idempotent.

use std::sync::Arc;

use super::envelope::Envelope;
use super::projector::Projector;
use super::source::SourceRegistry;
use super::store::{Changeset, EntityStore};
use crate::error::EngineError;

const TARGET: &str = "bondline::etl::engine";

/// What happened to one envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    Projected {
        projectors: usize,
        writes: usize,
        sources: usize,
    },
    /// No registered projector is interested in this envelope type
    Skipped,
}

/// Totals over a processed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub projected: usize,
    pub skipped: usize,
    pub writes: usize,
    pub sources: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: ProcessOutcome) {
        match outcome {
            ProcessOutcome::Projected {
                writes, sources, ..
            } => {
                self.projected += 1;
                self.writes += writes;
                self.sources += sources;
            }
            ProcessOutcome::Skipped => self.skipped += 1,
        }
    }
}

pub struct Engine {
    store: Arc<dyn EntityStore>,
    registry: Arc<dyn SourceRegistry>,
    projectors: Vec<Arc<dyn Projector>>,
}

impl Engine {
    pub fn new(store: Arc<dyn EntityStore>, registry: Arc<dyn SourceRegistry>) -> Self {
        Self {
            store,
            registry,
            projectors: Vec::new(),
        }
    }

    /// Add a projector. Projectors see each envelope in registration order.
    pub fn with_projector(mut self, projector: Arc<dyn Projector>) -> Self {
        tracing::info!(target: TARGET, projector = projector.name(), "Registered projector");
        self.projectors.push(projector);
        self
    }

    pub fn with_projectors(self, projectors: impl IntoIterator<Item = Arc<dyn Projector>>) -> Self {
        projectors
            .into_iter()
            .fold(self, |engine, projector| engine.with_projector(projector))
    }

    pub fn projectors(&self) -> &[Arc<dyn Projector>] {
        &self.projectors
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// Project one envelope and commit its writes.
    pub async fn process(&self, envelope: &Envelope) -> Result<ProcessOutcome, EngineError> {
        let interested: Vec<&Arc<dyn Projector>> = self
            .projectors
            .iter()
            .filter(|projector| projector.interested_types().contains(&envelope.type_id))
            .collect();

        if interested.is_empty() {
            tracing::warn!(
                target: TARGET,
                event = envelope.event_name(),
                id = %envelope.id,
                "No projector interested in envelope, skipping"
            );
            return Ok(ProcessOutcome::Skipped);
        }

        let mut changes = Changeset::new(self.store.as_ref());
        for projector in &interested {
            if let Err(source) = projector.project(envelope, &mut changes).await {
                tracing::error!(
                    target: TARGET,
                    projector = projector.name(),
                    event = envelope.event_name(),
                    id = %envelope.id,
                    error = %source,
                    "Projection failed, discarding event writes"
                );
                return Err(EngineError::Projection {
                    projector: projector.name().to_string(),
                    event: envelope.id.clone(),
                    source,
                });
            }
            metrics::counter!(
                "bondline_events_projected_total",
                "projector" => projector.name().to_string()
            )
            .increment(1);
        }

        let (ops, sources) = changes.into_parts();
        for registration in &sources {
            self.registry
                .register(registration.template, registration.address)
                .map_err(|source| {
                    tracing::error!(
                        target: TARGET,
                        id = %envelope.id,
                        template = %registration.template,
                        error = %source,
                        "Failed to register source, discarding event writes"
                    );
                    EngineError::Registration {
                        template: registration.template,
                        address: registration.address,
                        source,
                    }
                })?;
            metrics::counter!(
                "bondline_sources_registered_total",
                "template" => registration.template.name()
            )
            .increment(1);
        }

        self.store.apply(&ops).map_err(|source| {
            tracing::error!(
                target: TARGET,
                id = %envelope.id,
                error = %source,
                "Failed to commit event writes"
            );
            EngineError::Commit {
                event: envelope.id.clone(),
                source,
            }
        })?;
        for op in &ops {
            metrics::counter!("bondline_entity_writes_total", "op" => op.op_name()).increment(1);
        }

        tracing::debug!(
            target: TARGET,
            event = envelope.event_name(),
            id = %envelope.id,
            block = envelope.context.block_number,
            writes = ops.len(),
            sources = sources.len(),
            "Projected event"
        );

        Ok(ProcessOutcome::Projected {
            projectors: interested.len(),
            writes: ops.len(),
            sources: sources.len(),
        })
    }

    /// Project envelopes in order, stopping at the first failure.
    ///
    /// Envelopes before the failing one stay committed.
    pub async fn process_batch(&self, envelopes: &[Envelope]) -> Result<BatchSummary, EngineError> {
        let mut summary = BatchSummary::default();
        for envelope in envelopes {
            summary.record(self.process(envelope).await?);
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Timestamps};
    use crate::etl::envelope::{TypeId, TypedBody};
    use crate::etl::event::EventContext;
    use crate::etl::source::{ContractRegistry, SourceRegistry, SourceTemplate};
    use crate::etl::store::{EntityStoreExt, MemoryStore};
    use crate::identity::EntityId;
    use async_trait::async_trait;
    use bondline_common::{Address, Bytes32};
    use serde::{Deserialize, Serialize};
    use std::any::Any;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Tally {
        id: EntityId,
        count: u64,
        #[serde(flatten)]
        timestamps: Timestamps,
    }

    crate::entity!(Tally, "Tally");

    struct Ping {
        fail: bool,
        spawn: Option<Address>,
    }

    impl TypedBody for Ping {
        fn envelope_type_id(&self) -> TypeId {
            TypeId::new("test.ping")
        }

        fn event_name(&self) -> &'static str {
            "Ping"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct Pong;

    impl TypedBody for Pong {
        fn envelope_type_id(&self) -> TypeId {
            TypeId::new("test.pong")
        }

        fn event_name(&self) -> &'static str {
            "Pong"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    // Mock projector: counts pings per contract, fails after writing when asked to
    struct TallyProjector;

    #[async_trait]
    impl Projector for TallyProjector {
        fn name(&self) -> &str {
            "tally"
        }

        fn interested_types(&self) -> Vec<TypeId> {
            vec![TypeId::new("test.ping")]
        }

        async fn project(
            &self,
            envelope: &Envelope,
            changes: &mut Changeset<'_>,
        ) -> anyhow::Result<()> {
            let Some(ping) = envelope.downcast_ref::<Ping>() else {
                return Ok(());
            };

            let mut tally: Tally = changes.load_or_create(envelope.context.contract_id())?;
            tally.count += 1;
            tally.timestamps.touch(envelope.context.block_timestamp);
            changes.save(&tally)?;

            if let Some(address) = ping.spawn {
                changes.register_source(SourceTemplate::PerformanceBond, address);
            }
            if ping.fail {
                anyhow::bail!("read failed");
            }
            Ok(())
        }
    }

    // Host that refuses every new source
    struct RefusingRegistry;

    impl SourceRegistry for RefusingRegistry {
        fn register(&self, template: SourceTemplate, _address: Address) -> anyhow::Result<()> {
            anyhow::bail!("host rejected {template} source")
        }
    }

    fn envelope(log_index: u64, body: Box<dyn TypedBody>) -> Envelope {
        let context = EventContext {
            address: Address::from_low_u64_be(0xc0de),
            block_number: 1,
            block_timestamp: 100 + log_index,
            transaction_hash: Bytes32::from_low_u64_be(1),
            transaction_from: Address::from_low_u64_be(2),
            log_index,
        };
        Envelope::new(context, body)
    }

    fn engine() -> (Arc<MemoryStore>, Arc<ContractRegistry>, Engine) {
        let store = Arc::new(MemoryStore::new());
        let registry = Arc::new(ContractRegistry::new());
        let engine = Engine::new(store.clone(), registry.clone())
            .with_projector(Arc::new(TallyProjector));
        (store, registry, engine)
    }

    #[tokio::test]
    async fn test_process_commits_writes() {
        let (store, registry, engine) = engine();
        let spawned = Address::from_low_u64_be(0xbeef);

        let outcome = engine
            .process(&envelope(
                0,
                Box::new(Ping {
                    fail: false,
                    spawn: Some(spawned),
                }),
            ))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ProcessOutcome::Projected {
                projectors: 1,
                writes: 1,
                sources: 1
            }
        );
        let tally: Tally = store
            .load(&EntityId::contract(&Address::from_low_u64_be(0xc0de)))
            .unwrap()
            .unwrap();
        assert_eq!(tally.count, 1);
        assert_eq!(tally.timestamps.created_at_timestamp, 100);
        assert!(registry.is_tracked(&spawned));
    }

    #[tokio::test]
    async fn test_failed_projection_commits_nothing() {
        let (store, registry, engine) = engine();

        let result = engine
            .process(&envelope(
                0,
                Box::new(Ping {
                    fail: true,
                    spawn: Some(Address::from_low_u64_be(0xbeef)),
                }),
            ))
            .await;

        assert!(matches!(result, Err(EngineError::Projection { .. })));
        assert!(store.is_empty());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_uninteresting_envelope_is_skipped() {
        let (store, _, engine) = engine();
        let outcome = engine.process(&envelope(0, Box::new(Pong))).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Skipped);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_batch_stops_at_first_failure() {
        let (store, _, engine) = engine();
        let batch = vec![
            envelope(0, Box::new(Ping { fail: false, spawn: None })),
            envelope(1, Box::new(Pong)),
            envelope(2, Box::new(Ping { fail: true, spawn: None })),
            envelope(3, Box::new(Ping { fail: false, spawn: None })),
        ];

        assert!(engine.process_batch(&batch).await.is_err());

        let tally: Tally = store
            .load(&EntityId::contract(&Address::from_low_u64_be(0xc0de)))
            .unwrap()
            .unwrap();
        assert_eq!(tally.count, 1);
        assert_eq!(Tally::KIND, "Tally");
    }

    #[tokio::test]
    async fn test_batch_summary() {
        let (_, _, engine) = engine();
        let batch = vec![
            envelope(0, Box::new(Ping { fail: false, spawn: None })),
            envelope(1, Box::new(Pong)),
            envelope(2, Box::new(Ping { fail: false, spawn: None })),
        ];

        let summary = engine.process_batch(&batch).await.unwrap();
        assert_eq!(
            summary,
            BatchSummary {
                projected: 2,
                skipped: 1,
                writes: 2,
                sources: 0
            }
        );
    }

    #[tokio::test]
    async fn test_failed_registration_commits_nothing() {
        let store = Arc::new(MemoryStore::new());
        let engine = Engine::new(store.clone(), Arc::new(RefusingRegistry))
            .with_projector(Arc::new(TallyProjector));
        let spawned = Address::from_low_u64_be(0xbeef);

        let result = engine
            .process(&envelope(
                0,
                Box::new(Ping {
                    fail: false,
                    spawn: Some(spawned),
                }),
            ))
            .await;

        assert!(matches!(
            result,
            Err(EngineError::Registration { address, .. }) if address == spawned
        ));
        assert!(store.is_empty());
        assert_eq!(engine.store().count(Tally::KIND).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_events_without_sources_ignore_registry() {
        let store = Arc::new(MemoryStore::new());
        let engine = Engine::new(store.clone(), Arc::new(RefusingRegistry))
            .with_projector(Arc::new(TallyProjector));
        assert_eq!(engine.projectors().len(), 1);
        assert_eq!(engine.projectors()[0].name(), "tally");

        engine
            .process(&envelope(0, Box::new(Ping { fail: false, spawn: None })))
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
    }
}

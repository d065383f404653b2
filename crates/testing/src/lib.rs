//! Test fixtures for bondline projectors
//!
//! Well-known addresses, an [`EventContext`] builder and a [`Harness`] that runs
//! envelopes through a real [`Engine`] over an in-memory or SQLite store.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bondline::error::EngineError;
use bondline::{
    ContractRegistry, Engine, Entity, EntityId, EntityStore, EntityStoreExt, Envelope,
    EventContext, MemoryStore, ProcessOutcome, Projector, TypedBody,
};
use bondline_common::primitive_types::U256;
use bondline_common::{parse_address, Address, Bytes32};

pub use bondline::StaticReader;

// ===== Well-known addresses =====

pub const BOND: &str = "0xa0ee7a142d267c1f36714e4a8f75612f20a79720";
pub const BOND_FACTORY: &str = "0x97226ae60a3fb891e61e8a6b6c069b97852ab6c7";
pub const BOND_MEDIATOR: &str = "0x7b4f352cd40114f12e82fc675b5ba8c7582fc513";
pub const STAKING_POOL: &str = "0x15d34aaf54267db7d7c367839aaf71a00a2c6a65";
pub const STAKING_POOL_FACTORY: &str = "0x14dc79964da2c08b23698b3d3cc7ca32193d9955";
pub const STAKING_POOL_MEDIATOR: &str = "0x48fea11299cb25d8ae3451d6ed9a9d288fdc94ff";

pub const INSTIGATOR: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const AUTHORIZER: &str = "0x93ca6fa7d4b473ddc5e4506a26db225b6640bbbc";
pub const BENEFICIARY: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
pub const TREASURY: &str = "0x3d4a1331cc1a11cc3e1cb51e67ecac7ac1a03adf";
pub const DEPOSITOR: &str = "0x9c0f5532ac4c88b0f94ce12978db7dba55c5401a";
pub const CLAIMANT: &str = "0xad3c7f1aa574ccdc74e37110499eab1ebb339dde";
pub const TOKEN: &str = "0x8626f6940e2eb28930efb4cef49b2d1f2c9c1199";
pub const OTHER_TOKEN: &str = "0x9965507d1a55bcc2695c58ba16fb37d819b0a4dc";
pub const OWNER_NEW: &str = "0x53fcd82c87509aeb703f14a3b533834292789b9c";
pub const REDEEMER: &str = "0xbdd26b10e2c7b09e94abc31ee397a86e9e2526ed";
pub const FROM: &str = "0x7080c05352aeb253f08979d95f76442af64ace9f";
pub const TO: &str = "0x6b7844da24a8d90ada20348a52f77882d50001e3";
pub const ACCOUNT: &str = "0x20f576688fa253120e5a396b18b878fef1c05695";
pub const ADMIN_NEW: &str = "0x8d82e8490ecb106fb2e61717556eda1ae53fada9";
pub const FACTORY_OLD: &str = "0x002c2275bef538f772f4a22f3d0649c1ca1420f0";
pub const FACTORY_NEW: &str = "0x9aaff2a100b1549728b7ccb74f9ef3158d333451";
pub const BEACON: &str = "0xbe42bbb1f26a943f849632325692b1f69496d65d";
pub const IMPLEMENTATION: &str = "0xb81bacddf7d99e85c2f98ce0be3317f96010dece";

pub const DAO_ID: u64 = 1;

/// Parse a fixture address. Panics on malformed input.
pub fn addr(hex: &str) -> Address {
    parse_address(hex).unwrap_or_else(|_| panic!("invalid fixture address {hex}"))
}

pub fn amount(value: u64) -> U256 {
    U256::from(value)
}

pub fn dao_id() -> U256 {
    U256::from(DAO_ID)
}

/// Install a test subscriber honouring `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ===== Event context =====

/// Builder for [`EventContext`] with fixture defaults.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    context: EventContext,
}

impl ContextBuilder {
    pub fn new(address: Address) -> Self {
        Self {
            context: EventContext {
                address,
                block_number: 1,
                block_timestamp: 1,
                transaction_hash: Bytes32::from_low_u64_be(1),
                transaction_from: addr(INSTIGATOR),
                log_index: 0,
            },
        }
    }

    pub fn block(mut self, number: u64, timestamp: u64) -> Self {
        self.context.block_number = number;
        self.context.block_timestamp = timestamp;
        self
    }

    pub fn transaction(mut self, hash: Bytes32, log_index: u64) -> Self {
        self.context.transaction_hash = hash;
        self.context.log_index = log_index;
        self
    }

    pub fn sender(mut self, from: Address) -> Self {
        self.context.transaction_from = from;
        self
    }

    pub fn build(self) -> EventContext {
        self.context
    }
}

// ===== Harness =====

/// Engine over a store and a [`ContractRegistry`], with a clock.
///
/// Every emitted event lands in its own transaction one block and one second
/// after the previous one, so log records never collide.
pub struct Harness {
    store: Arc<dyn EntityStore>,
    registry: Arc<ContractRegistry>,
    engine: Engine,
    sequence: AtomicU64,
}

impl Harness {
    /// Harness over a fresh [`MemoryStore`].
    pub fn new(projectors: Vec<Arc<dyn Projector>>) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), projectors)
    }

    pub fn with_store(store: Arc<dyn EntityStore>, projectors: Vec<Arc<dyn Projector>>) -> Self {
        init_tracing();
        let registry = Arc::new(ContractRegistry::new());
        let engine = Engine::new(store.clone(), registry.clone()).with_projectors(projectors);
        Self {
            store,
            registry,
            engine,
            sequence: AtomicU64::new(0),
        }
    }

    /// Emit `body` from `address` in the next block.
    pub async fn emit(
        &self,
        address: Address,
        body: impl TypedBody + 'static,
    ) -> Result<ProcessOutcome, EngineError> {
        let context = self.next_context(address).build();
        self.emit_with(context, body).await
    }

    /// Emit `body` under an explicit context.
    pub async fn emit_with(
        &self,
        context: EventContext,
        body: impl TypedBody + 'static,
    ) -> Result<ProcessOutcome, EngineError> {
        self.engine
            .process(&Envelope::new(context, Box::new(body)))
            .await
    }

    /// Context for the next emitted event, to be customised before [`Harness::emit_with`].
    pub fn next_context(&self, address: Address) -> ContextBuilder {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        ContextBuilder::new(address)
            .block(sequence, 1_000 + sequence)
            .transaction(Bytes32::from_low_u64_be(sequence), 0)
    }

    /// Timestamp the most recently emitted event was stamped with.
    pub fn last_timestamp(&self) -> u64 {
        1_000 + self.sequence.load(Ordering::SeqCst)
    }

    pub fn load<E: Entity>(&self, id: &EntityId) -> Option<E> {
        self.store
            .load::<E>(id)
            .unwrap_or_else(|err| panic!("failed to load {} {id}: {err}", E::KIND))
    }

    /// Load an entity that must exist.
    pub fn get<E: Entity>(&self, id: &EntityId) -> E {
        self.load::<E>(id)
            .unwrap_or_else(|| panic!("missing {} {id}", E::KIND))
    }

    pub fn count<E: Entity>(&self) -> usize {
        self.store
            .count_of::<E>()
            .unwrap_or_else(|err| panic!("failed to count {}: {err}", E::KIND))
    }

    /// Children of `parent` found through their `field` reference.
    pub fn derived<E: Entity>(&self, field: &str, parent: &EntityId) -> Vec<E> {
        self.store
            .derived::<E>(field, parent)
            .unwrap_or_else(|err| panic!("failed to query {}.{field}: {err}", E::KIND))
    }

    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }
}

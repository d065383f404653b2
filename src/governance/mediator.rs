//! Mediator administration: DAOs, whitelists, roles, proxy metadata and factory binding

use anyhow::{Context, Result};
use bondline_common::{address_hex, u256_to_amount, Address};

use super::entities::{
    Dao, DaoMetadata, DaoRole, DaoWhitelist, Factory, GlobalRole, Mediator, MediatorSweep,
};
use super::events::MediatorAdminEvent;
use super::Scope;
use crate::entity::Entity;
use crate::error::StoreError;
use crate::etl::event::EventContext;
use crate::etl::reader::ContractReader;
use crate::etl::store::Changeset;
use crate::identity::EntityId;

const TARGET: &str = "bondline::governance::mediator";

/// How a factory came to be bound to a mediator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryBinding {
    /// Creator update event: the factory's creation time is the binding block
    CreatorUpdate,
    /// Read back at mediator initialization: an earlier creation time is kept
    Initialized,
}

/// Load-or-create the mediator at `address`.
pub fn load_mediator<S: Scope>(
    changes: &Changeset<'_>,
    address: &Address,
) -> Result<Mediator<S>, StoreError> {
    changes.load_or_create(EntityId::contract(address))
}

/// Point the mediator at `context.address` to `factory`, and start streaming
/// the factory's events.
pub fn bind_factory<S: Scope>(
    context: &EventContext,
    factory_address: Address,
    binding: FactoryBinding,
    changes: &mut Changeset<'_>,
) -> Result<(), StoreError> {
    let mut mediator = load_mediator::<S>(changes, &context.address)?;
    let mut factory: Factory<S> = changes.load_or_create(EntityId::contract(&factory_address))?;

    mediator.factory = Some(factory.id.clone());
    mediator.timestamps.touch(context.block_timestamp);
    changes.save(&mediator)?;

    factory.mediator = Some(mediator.id.clone());
    factory.factory = Some(factory_address);
    match binding {
        FactoryBinding::CreatorUpdate => factory.timestamps.created(context.block_timestamp),
        FactoryBinding::Initialized => factory.timestamps.touch(context.block_timestamp),
    }
    changes.save(&factory)?;

    changes.register_source(S::FACTORY_TEMPLATE, factory_address);

    tracing::debug!(
        target: TARGET,
        mediator = %mediator.id,
        factory = %factory.id,
        ?binding,
        "Bound factory to mediator"
    );
    Ok(())
}

/// Apply an administrative event emitted by the mediator at `context.address`.
///
/// `Initialized` reads the current factory through `reader`; a failed read is
/// returned as an error and nothing from the event may be committed.
pub async fn apply_mediator_admin<S: Scope>(
    context: &EventContext,
    event: &MediatorAdminEvent,
    reader: &dyn ContractReader,
    changes: &mut Changeset<'_>,
) -> Result<()> {
    let ts = context.block_timestamp;

    match event {
        MediatorAdminEvent::Initialized(_) => {
            let factory = reader
                .read_address(context.address, S::CREATOR_GETTER, context.block_number)
                .await
                .with_context(|| {
                    format!(
                        "Failed to read {}() from mediator {} at block {}",
                        S::CREATOR_GETTER,
                        address_hex(&context.address),
                        context.block_number
                    )
                })?;
            bind_factory::<S>(context, factory, FactoryBinding::Initialized, changes)?;
        }
        MediatorAdminEvent::AdminChanged(change) => {
            update_mediator::<S>(context, changes, |mediator| {
                mediator.admin = Some(change.new_admin);
            })?;
        }
        MediatorAdminEvent::BeaconUpgraded(upgrade) => {
            update_mediator::<S>(context, changes, |mediator| {
                mediator.beacon = Some(upgrade.beacon);
            })?;
        }
        MediatorAdminEvent::Upgraded(upgrade) => {
            update_mediator::<S>(context, changes, |mediator| {
                mediator.implementation = Some(upgrade.implementation);
            })?;
        }
        MediatorAdminEvent::BeneficiaryUpdate(update) => {
            update_mediator::<S>(context, changes, |mediator| {
                mediator.beneficiary = Some(update.beneficiary);
            })?;
        }
        MediatorAdminEvent::Paused(_) => {
            update_mediator::<S>(context, changes, |mediator| mediator.paused = true)?;
        }
        MediatorAdminEvent::Unpaused(_) => {
            update_mediator::<S>(context, changes, |mediator| mediator.paused = false)?;
        }
        MediatorAdminEvent::Erc20Sweep(sweep) => {
            let mut record = MediatorSweep::<S>::with_id(context.log_id());
            record.mediator = Some(context.contract_id());
            record.token = Some(sweep.tokens);
            record.amount = u256_to_amount(sweep.amount);
            record.beneficiary = Some(sweep.beneficiary);
            record.created_at_timestamp = ts;
            changes.save(&record)?;
        }
        MediatorAdminEvent::CreateDao(create) => {
            let mut dao: Dao<S> = changes.load_or_create(EntityId::dao(create.id))?;
            dao.dao_id = create.id;
            dao.mediator = Some(context.contract_id());
            dao.treasury = Some(create.treasury);
            dao.owner = Some(create.instigator);
            dao.timestamps.touch(ts);
            changes.save(&dao)?;
        }
        MediatorAdminEvent::DaoTreasuryUpdate(update) => {
            let mut dao: Dao<S> = changes.load_or_create(EntityId::dao(update.dao_id))?;
            dao.treasury = Some(update.treasury);
            dao.timestamps.touch(ts);
            changes.save(&dao)?;
        }
        MediatorAdminEvent::DaoMetaDataUpdate(update) => {
            let dao = touch_dao::<S>(changes, EntityId::dao(update.dao_id), ts)?;

            let mut metadata: DaoMetadata<S> = changes.load_or_create(dao.id.clone())?;
            metadata.data = update.data.clone();
            metadata.dao = Some(dao.id);
            metadata.mediator = Some(context.contract_id());
            metadata.timestamps.touch(ts);
            changes.save(&metadata)?;
        }
        MediatorAdminEvent::AddCollateralWhitelist(update) => {
            let dao = touch_dao::<S>(changes, EntityId::dao(update.dao_id), ts)?;

            let id = EntityId::whitelist(update.dao_id, &update.collateral_tokens);
            let mut whitelist: DaoWhitelist<S> = changes.load_or_create(id)?;
            whitelist.dao = Some(dao.id);
            whitelist.token = Some(update.collateral_tokens);
            whitelist.mediator = Some(context.contract_id());
            whitelist.timestamps.touch(ts);
            changes.save(&whitelist)?;
        }
        MediatorAdminEvent::RemoveCollateralWhitelist(update) => {
            touch_dao::<S>(changes, EntityId::dao(update.dao_id), ts)?;
            changes.remove::<DaoWhitelist<S>>(&EntityId::whitelist(
                update.dao_id,
                &update.collateral_tokens,
            ));
        }
        MediatorAdminEvent::GrantDaoRole(grant) => {
            let id = EntityId::dao_role(grant.dao_id, &grant.role, &grant.account);
            let mut role: DaoRole<S> = changes.load_or_create(id)?;
            role.dao = Some(EntityId::dao(grant.dao_id));
            role.mediator = Some(context.contract_id());
            role.role = grant.role;
            role.account = Some(grant.account);
            role.timestamps.touch(ts);
            changes.save(&role)?;
        }
        MediatorAdminEvent::RevokeDaoRole(revoke) => {
            changes.remove::<DaoRole<S>>(&EntityId::dao_role(
                revoke.dao_id,
                &revoke.role,
                &revoke.account,
            ));
        }
        MediatorAdminEvent::GrantGlobalRole(grant) => {
            let id = EntityId::global_role(&grant.role, &grant.account);
            let mut role: GlobalRole<S> = changes.load_or_create(id)?;
            role.mediator = Some(context.contract_id());
            role.role = grant.role;
            role.account = Some(grant.account);
            role.timestamps.touch(ts);
            changes.save(&role)?;
        }
        MediatorAdminEvent::RevokeGlobalRole(revoke) => {
            changes.remove::<GlobalRole<S>>(&EntityId::global_role(&revoke.role, &revoke.account));
        }
    }

    Ok(())
}

fn update_mediator<S: Scope>(
    context: &EventContext,
    changes: &mut Changeset<'_>,
    update: impl FnOnce(&mut Mediator<S>),
) -> Result<(), StoreError> {
    let mut mediator = load_mediator::<S>(changes, &context.address)?;
    update(&mut mediator);
    mediator.timestamps.touch(context.block_timestamp);
    changes.save(&mediator)
}

fn touch_dao<S: Scope>(
    changes: &mut Changeset<'_>,
    id: EntityId,
    ts: u64,
) -> Result<Dao<S>, StoreError> {
    let mut dao: Dao<S> = changes.load_or_create(id)?;
    dao.timestamps.touch(ts);
    changes.save(&dao)?;
    Ok(dao)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::etl::reader::StaticReader;
    use crate::etl::source::SourceTemplate;
    use crate::etl::store::{EntityStore, EntityStoreExt, MemoryStore};
    use crate::governance::events::{DaoRoleUpdate, Initialized};
    use bondline_common::primitive_types::U256;
    use bondline_common::Bytes32;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct TestScope;

    impl Scope for TestScope {
        const FACTORY: &'static str = "TestFactory";
        const FACTORY_SWEEP: &'static str = "TestFactory__Sweep";
        const MEDIATOR: &'static str = "TestMediator";
        const MEDIATOR_SWEEP: &'static str = "TestMediator__Sweep";
        const DAO: &'static str = "Test__DAO";
        const DAO_WHITELIST: &'static str = "Test__DAO__CollateralWhitelist";
        const DAO_METADATA: &'static str = "Test__DAO__Metadata";
        const DAO_ROLE: &'static str = "Test__DAO__Role";
        const ROLE: &'static str = "Test__Role";
        const FACTORY_TEMPLATE: SourceTemplate = SourceTemplate::PerformanceBondFactory;
        const CREATOR_GETTER: &'static str = "bondCreator";
    }

    fn context(log_index: u64) -> EventContext {
        EventContext {
            address: Address::from_low_u64_be(0x3ed),
            block_number: 7,
            block_timestamp: 1_000,
            transaction_hash: Bytes32::from_low_u64_be(0xaa),
            transaction_from: Address::from_low_u64_be(0xf00),
            log_index,
        }
    }

    async fn apply<'a>(
        store: &'a MemoryStore,
        reader: &StaticReader,
        event: MediatorAdminEvent,
    ) -> Result<Changeset<'a>> {
        let mut changes = Changeset::new(store);
        apply_mediator_admin::<TestScope>(&context(0), &event, reader, &mut changes).await?;
        Ok(changes)
    }

    fn commit(store: &MemoryStore, changes: Changeset<'_>) {
        let (ops, _) = changes.into_parts();
        store.apply(&ops).unwrap();
    }

    #[tokio::test]
    async fn test_grant_then_revoke_leaves_nothing() {
        let store = MemoryStore::new();
        let reader = StaticReader::new();
        let update = DaoRoleUpdate {
            dao_id: U256::from(1u64),
            role: Bytes32::from_low_u64_be(9),
            account: Address::from_low_u64_be(0xacc),
            instigator: Address::from_low_u64_be(0xf00),
        };

        let changes = apply(&store, &reader, MediatorAdminEvent::GrantDaoRole(update.clone()))
            .await
            .unwrap();
        commit(&store, changes);
        assert_eq!(store.count_of::<DaoRole<TestScope>>().unwrap(), 1);

        let changes = apply(&store, &reader, MediatorAdminEvent::RevokeDaoRole(update))
            .await
            .unwrap();
        commit(&store, changes);
        assert_eq!(store.count_of::<DaoRole<TestScope>>().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_initialized_read_failure_is_fatal() {
        let store = MemoryStore::new();
        let reader = StaticReader::new();

        let result = apply(
            &store,
            &reader,
            MediatorAdminEvent::Initialized(Initialized { version: 1 }),
        )
        .await;

        let error = result.err().unwrap();
        assert!(error.to_string().contains("bondCreator()"));
    }

    #[tokio::test]
    async fn test_initialized_binds_factory() {
        let store = MemoryStore::new();
        let factory = Address::from_low_u64_be(0xfac);
        let reader = StaticReader::new().with_value(context(0).address, "bondCreator", factory);

        let changes = apply(
            &store,
            &reader,
            MediatorAdminEvent::Initialized(Initialized { version: 1 }),
        )
        .await
        .unwrap();
        assert_eq!(changes.sources().len(), 1);
        commit(&store, changes);

        let mediator: Mediator<TestScope> =
            store.load(&EntityId::contract(&context(0).address)).unwrap().unwrap();
        assert_eq!(mediator.factory, Some(EntityId::contract(&factory)));

        let bound: Factory<TestScope> = store.load(&EntityId::contract(&factory)).unwrap().unwrap();
        assert_eq!(bound.mediator, Some(mediator.id));
        assert_eq!(bound.factory, Some(factory));
    }
}

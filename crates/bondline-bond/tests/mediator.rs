use std::sync::Arc;

use bondline::governance::events::{
    AdminChanged, BeaconUpgraded, CollateralWhitelistUpdate, CreateDao, CreatorUpdate,
    DaoMetaDataUpdate, DaoRoleUpdate, GlobalRoleUpdate, Initialized, Upgraded,
};
use bondline::governance::MediatorAdminEvent;
use bondline::{EngineError, EntityId, Projector, SourceTemplate, StaticReader};
use bondline_bond::events::{AddBond, BondMediatorEvent};
use bondline_bond::{
    Bond, BondDao, BondDaoMetadata, BondDaoRole, BondDaoWhitelist, BondFactory, BondMediator,
    BondMediatorProjector, BondRole,
};
use bondline_common::Bytes32;
use bondline_test_utils::{
    addr, dao_id, Harness, ACCOUNT, ADMIN_NEW, BEACON, BOND, BOND_MEDIATOR, FACTORY_NEW,
    FACTORY_OLD, IMPLEMENTATION, INSTIGATOR, TOKEN, TREASURY,
};

fn harness_with(reader: StaticReader) -> Harness {
    let projectors: Vec<Arc<dyn Projector>> =
        vec![Arc::new(BondMediatorProjector::new(Arc::new(reader)))];
    Harness::new(projectors)
}

fn harness() -> Harness {
    harness_with(StaticReader::new())
}

fn admin(event: MediatorAdminEvent) -> BondMediatorEvent {
    BondMediatorEvent::Admin(event)
}

fn mediator_id() -> EntityId {
    EntityId::contract(&addr(BOND_MEDIATOR))
}

fn role() -> Bytes32 {
    Bytes32::from_low_u64_be(0x1234)
}

fn dao_role() -> DaoRoleUpdate {
    DaoRoleUpdate {
        dao_id: dao_id(),
        role: role(),
        account: addr(ACCOUNT),
        instigator: addr(INSTIGATOR),
    }
}

fn whitelist() -> CollateralWhitelistUpdate {
    CollateralWhitelistUpdate {
        dao_id: dao_id(),
        collateral_tokens: addr(TOKEN),
        instigator: addr(INSTIGATOR),
    }
}

#[tokio::test]
async fn test_create_dao_and_add_bond() {
    let harness = harness();
    let mediator = addr(BOND_MEDIATOR);

    harness
        .emit(
            mediator,
            admin(MediatorAdminEvent::CreateDao(CreateDao {
                id: dao_id(),
                treasury: addr(TREASURY),
                instigator: addr(INSTIGATOR),
            })),
        )
        .await
        .unwrap();
    harness
        .emit(
            mediator,
            BondMediatorEvent::AddPerformanceBond(AddBond {
                dao_id: dao_id(),
                bond: addr(BOND),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();

    let dao: BondDao = harness.get(&EntityId::dao(dao_id()));
    assert_eq!(dao.id, "0x1");
    assert_eq!(dao.treasury, Some(addr(TREASURY)));
    assert_eq!(dao.owner, Some(addr(INSTIGATOR)));
    assert_eq!(dao.mediator, Some(mediator_id()));

    let bond: Bond = harness.get(&EntityId::contract(&addr(BOND)));
    assert_eq!(bond.dao, Some(dao.id.clone()));
    assert_eq!(bond.mediator, Some(mediator_id()));

    let bonds: Vec<Bond> = harness.derived("dao", &dao.id);
    assert_eq!(bonds.len(), 1);
}

#[tokio::test]
async fn test_dao_metadata_update() {
    let harness = harness();

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::DaoMetaDataUpdate(DaoMetaDataUpdate {
                dao_id: dao_id(),
                data: "ipfs://dao".to_string(),
                instigator: addr(INSTIGATOR),
            })),
        )
        .await
        .unwrap();

    let metadata: BondDaoMetadata = harness.get(&EntityId::dao(dao_id()));
    assert_eq!(metadata.data, "ipfs://dao");
    assert_eq!(metadata.dao, Some(EntityId::dao(dao_id())));
    assert!(harness.load::<BondDao>(&EntityId::dao(dao_id())).is_some());
}

#[tokio::test]
async fn test_whitelist_add_then_remove() {
    let harness = harness();
    let id = EntityId::whitelist(dao_id(), &addr(TOKEN));

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::AddCollateralWhitelist(whitelist())),
        )
        .await
        .unwrap();
    let entry: BondDaoWhitelist = harness.get(&id);
    assert_eq!(entry.token, Some(addr(TOKEN)));
    assert_eq!(entry.dao, Some(EntityId::dao(dao_id())));

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::RemoveCollateralWhitelist(whitelist())),
        )
        .await
        .unwrap();
    assert!(harness.load::<BondDaoWhitelist>(&id).is_none());
    assert!(harness.load::<BondDao>(&EntityId::dao(dao_id())).is_some());
}

#[tokio::test]
async fn test_grant_then_revoke_dao_role_leaves_nothing() {
    let harness = harness();

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::GrantDaoRole(dao_role())),
        )
        .await
        .unwrap();
    let id = EntityId::dao_role(dao_id(), &role(), &addr(ACCOUNT));
    let granted: BondDaoRole = harness.get(&id);
    assert_eq!(granted.role, role());
    assert_eq!(granted.account, Some(addr(ACCOUNT)));

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::RevokeDaoRole(dao_role())),
        )
        .await
        .unwrap();
    assert_eq!(harness.count::<BondDaoRole>(), 0);
}

#[tokio::test]
async fn test_revoke_without_grant_is_noop() {
    let harness = harness();
    let global = GlobalRoleUpdate {
        role: role(),
        account: addr(ACCOUNT),
        instigator: addr(INSTIGATOR),
    };

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::RevokeDaoRole(dao_role())),
        )
        .await
        .unwrap();
    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::RevokeGlobalRole(global.clone())),
        )
        .await
        .unwrap();
    assert_eq!(harness.count::<BondDaoRole>(), 0);
    assert_eq!(harness.count::<BondRole>(), 0);

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::GrantGlobalRole(global)),
        )
        .await
        .unwrap();
    let granted: BondRole = harness.get(&EntityId::global_role(&role(), &addr(ACCOUNT)));
    assert_eq!(granted.mediator, Some(mediator_id()));
}

#[tokio::test]
async fn test_proxy_events_update_mediator() {
    let harness = harness();
    let mediator = addr(BOND_MEDIATOR);

    harness
        .emit(
            mediator,
            admin(MediatorAdminEvent::AdminChanged(AdminChanged {
                previous_admin: addr(INSTIGATOR),
                new_admin: addr(ADMIN_NEW),
            })),
        )
        .await
        .unwrap();
    harness
        .emit(
            mediator,
            admin(MediatorAdminEvent::BeaconUpgraded(BeaconUpgraded {
                beacon: addr(BEACON),
            })),
        )
        .await
        .unwrap();
    harness
        .emit(
            mediator,
            admin(MediatorAdminEvent::Upgraded(Upgraded {
                implementation: addr(IMPLEMENTATION),
            })),
        )
        .await
        .unwrap();

    let entity: BondMediator = harness.get(&mediator_id());
    assert_eq!(entity.admin, Some(addr(ADMIN_NEW)));
    assert_eq!(entity.beacon, Some(addr(BEACON)));
    assert_eq!(entity.implementation, Some(addr(IMPLEMENTATION)));
}

#[tokio::test]
async fn test_creator_update_binds_and_registers_factory() {
    let harness = harness();
    let update = |previous: &str, next: &str| CreatorUpdate {
        previous_creator: addr(previous),
        update_creator: addr(next),
        instigator: addr(INSTIGATOR),
    };

    harness
        .emit(
            addr(BOND_MEDIATOR),
            BondMediatorEvent::BondCreatorUpdate(update(INSTIGATOR, FACTORY_OLD)),
        )
        .await
        .unwrap();
    harness
        .emit(
            addr(BOND_MEDIATOR),
            BondMediatorEvent::PerformanceBondCreatorUpdate(update(FACTORY_OLD, FACTORY_NEW)),
        )
        .await
        .unwrap();
    let bound_at = harness.last_timestamp();

    let mediator: BondMediator = harness.get(&mediator_id());
    assert_eq!(mediator.factory, Some(EntityId::contract(&addr(FACTORY_NEW))));

    let factory: BondFactory = harness.get(&EntityId::contract(&addr(FACTORY_NEW)));
    assert_eq!(factory.mediator, Some(mediator_id()));
    assert_eq!(factory.timestamps.created_at_timestamp, bound_at);

    let factories: Vec<BondFactory> = harness.derived("mediator", &mediator_id());
    assert_eq!(factories.len(), 2);

    for address in [FACTORY_OLD, FACTORY_NEW] {
        assert_eq!(
            harness.registry().templates_for(&addr(address)),
            vec![SourceTemplate::PerformanceBondFactory]
        );
    }
}

#[tokio::test]
async fn test_initialized_reads_bond_creator() {
    let reader =
        StaticReader::new().with_value(addr(BOND_MEDIATOR), "bondCreator", addr(FACTORY_NEW));
    let harness = harness_with(reader);

    harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::Initialized(Initialized { version: 1 })),
        )
        .await
        .unwrap();

    let mediator: BondMediator = harness.get(&mediator_id());
    assert_eq!(mediator.factory, Some(EntityId::contract(&addr(FACTORY_NEW))));
    assert!(harness.registry().is_tracked(&addr(FACTORY_NEW)));
}

#[tokio::test]
async fn test_initialized_read_failure_commits_nothing() {
    let harness = harness();

    let result = harness
        .emit(
            addr(BOND_MEDIATOR),
            admin(MediatorAdminEvent::Initialized(Initialized { version: 1 })),
        )
        .await;

    assert!(matches!(result, Err(EngineError::Projection { .. })));
    assert!(harness.load::<BondMediator>(&mediator_id()).is_none());
    assert!(harness.registry().is_empty());
}

use std::sync::Arc;

use bondline::common::Amount;
use bondline::governance::events::Erc20Sweep;
use bondline::{EntityId, Projector, SqliteStore, StaticReader};
use bondline_bond::events::{
    AllowRedemption, BondEvent, BondFactoryEvent, ClaimReward, CollateralRelease,
    ConfigurationParams, CreateBond, Deposit, FullCollateral, MetadataParams, PartialCollateral,
    RedeemableUpdate, Redemption, RewardTimeLockUpdate, SlashDeposits, Transfer,
};
use bondline_bond::{
    Bond, BondDeposit, BondFactoryProjector, BondMediatorProjector, BondMetadata, BondProjector,
    BondRedemption, BondRewardPool, BondSlashDeposit, BondSweep, BondTransfer,
};
use bondline_test_utils::{
    addr, amount, Harness, BOND, BOND_FACTORY, DEPOSITOR, FROM, INSTIGATOR, OTHER_TOKEN,
    REDEEMER, TO, TOKEN, TREASURY,
};
use tempfile::TempDir;

fn projectors() -> Vec<Arc<dyn Projector>> {
    vec![
        Arc::new(BondProjector::new()),
        Arc::new(BondFactoryProjector::new()),
        Arc::new(BondMediatorProjector::new(Arc::new(StaticReader::new()))),
    ]
}

fn bond_id() -> EntityId {
    EntityId::contract(&addr(BOND))
}

fn deposit(value: u64) -> BondEvent {
    BondEvent::Deposit(Deposit {
        depositor: addr(DEPOSITOR),
        collateral_tokens: addr(TOKEN),
        collateral_amount: amount(value),
    })
}

fn withdraw(value: u64) -> BondEvent {
    BondEvent::WithdrawCollateral(CollateralRelease {
        treasury: addr(TREASURY),
        collateral_tokens: addr(TOKEN),
        collateral_amount: amount(value),
        instigator: addr(INSTIGATOR),
    })
}

fn sweep(token: &str, value: u64) -> BondEvent {
    BondEvent::Erc20Sweep(Erc20Sweep {
        beneficiary: addr(TREASURY),
        tokens: addr(token),
        amount: amount(value),
        instigator: addr(INSTIGATOR),
    })
}

/// Create the bond through its factory so it carries `TOKEN` as collateral.
async fn create_bond(harness: &Harness) {
    harness
        .emit(
            addr(BOND_FACTORY),
            BondFactoryEvent::CreatePerformanceBond(CreateBond {
                bond: addr(BOND),
                metadata: MetadataParams {
                    name: "Bond".to_string(),
                    symbol: "BOND".to_string(),
                    data: "{}".to_string(),
                },
                configuration: ConfigurationParams {
                    debt_token_amount: amount(1_000),
                    collateral_tokens: addr(TOKEN),
                    expiry_timestamp: amount(2_000_000),
                    minimum_deposit: amount(1),
                },
                rewards: Vec::new(),
                treasury: addr(TREASURY),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deposits_accumulate_per_depositor_and_token() {
    let harness = Harness::new(projectors());

    harness.emit(addr(BOND), deposit(250)).await.unwrap();
    harness.emit(addr(BOND), deposit(750)).await.unwrap();

    let id = EntityId::accumulator(&addr(BOND), &addr(DEPOSITOR), Some(&addr(TOKEN)));
    let record: BondDeposit = harness.get(&id);
    assert_eq!(record.collateral_amount, Amount::from(1_000));
    assert_eq!(record.bond, Some(bond_id()));
    assert_eq!(harness.count::<BondDeposit>(), 1);

    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(1_000));

    let deposits: Vec<BondDeposit> = harness.derived("bond", &bond_id());
    assert_eq!(deposits.len(), 1);
}

#[tokio::test]
async fn test_deposit_creation_time_is_kept() {
    let harness = Harness::new(projectors());

    harness.emit(addr(BOND), deposit(1)).await.unwrap();
    let first = harness.last_timestamp();
    harness.emit(addr(BOND), deposit(1)).await.unwrap();
    let second = harness.last_timestamp();

    let id = EntityId::accumulator(&addr(BOND), &addr(DEPOSITOR), Some(&addr(TOKEN)));
    let record: BondDeposit = harness.get(&id);
    assert_eq!(record.timestamps.created_at_timestamp, first);
    assert_eq!(record.timestamps.last_updated_timestamp, second);
}

#[tokio::test]
async fn test_events_on_empty_store_create_defaults() {
    let harness = Harness::new(projectors());

    harness
        .emit(
            addr(BOND),
            BondEvent::RewardTimeLockUpdate(RewardTimeLockUpdate {
                tokens: addr(TOKEN),
                time_lock: amount(60),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();
    harness.emit(addr(BOND), withdraw(10)).await.unwrap();

    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(-10));
    assert!(bond.collateral_withdrawn);
    assert_eq!(bond.factory, None);

    let pool: BondRewardPool = harness.get(&EntityId::keyed(&addr(BOND), &addr(TOKEN)));
    assert_eq!(pool.time_lock, Amount::from(60));
    assert_eq!(pool.amount, Amount::from(0));
}

#[tokio::test]
async fn test_withdraw_collateral_latches_at_zero() {
    let harness = Harness::new(projectors());
    harness.emit(addr(BOND), deposit(1_000)).await.unwrap();

    harness.emit(addr(BOND), withdraw(100)).await.unwrap();
    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(900));
    assert!(!bond.collateral_withdrawn);

    harness.emit(addr(BOND), withdraw(900)).await.unwrap();
    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(0));
    assert!(bond.collateral_withdrawn);

    harness.emit(addr(BOND), deposit(500)).await.unwrap();
    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(500));
    assert!(bond.collateral_withdrawn);
}

#[tokio::test]
async fn test_expire_and_full_collateral_latch() {
    let harness = Harness::new(projectors());
    harness.emit(addr(BOND), deposit(1_000)).await.unwrap();

    harness
        .emit(
            addr(BOND),
            BondEvent::FullCollateral(FullCollateral {
                collateral_tokens: addr(TOKEN),
                collateral_amount: amount(1_200),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();
    harness
        .emit(
            addr(BOND),
            BondEvent::Expire(CollateralRelease {
                treasury: addr(TREASURY),
                collateral_tokens: addr(TOKEN),
                collateral_amount: amount(200),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();
    harness
        .emit(
            addr(BOND),
            BondEvent::PartialCollateral(PartialCollateral {
                collateral_tokens: addr(TOKEN),
                collateral_amount: amount(300),
                debt_tokens: addr(BOND),
                debt_remaining: amount(40),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();

    let bond: Bond = harness.get(&bond_id());
    assert!(bond.collateral_full);
    assert!(bond.expired);
    assert_eq!(bond.collateral_amount, Amount::from(300));
    assert_eq!(bond.redemption_excess, Amount::from(40));
}

#[tokio::test]
async fn test_sweep_only_debits_collateral_token() {
    let harness = Harness::new(projectors());
    create_bond(&harness).await;
    harness.emit(addr(BOND), deposit(1_000)).await.unwrap();

    harness.emit(addr(BOND), sweep(OTHER_TOKEN, 50)).await.unwrap();
    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(1_000));

    harness.emit(addr(BOND), sweep(TOKEN, 50)).await.unwrap();
    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(950));

    assert_eq!(harness.count::<BondSweep>(), 2);
    let sweeps: Vec<BondSweep> = harness.derived("bond", &bond_id());
    assert_eq!(sweeps.len(), 2);
    assert!(sweeps.iter().all(|sweep| sweep.amount == Amount::from(50)));
}

#[tokio::test]
async fn test_identical_log_events_stay_distinct() {
    let harness = Harness::new(projectors());
    let transfer = BondEvent::Transfer(Transfer {
        from: addr(FROM),
        to: addr(TO),
        value: amount(5),
    });

    harness.emit(addr(BOND), transfer.clone()).await.unwrap();
    harness.emit(addr(BOND), transfer).await.unwrap();

    let transfers: Vec<BondTransfer> = harness.derived("bond", &bond_id());
    assert_eq!(transfers.len(), 2);
    assert_ne!(transfers[0].id, transfers[1].id);
}

#[tokio::test]
async fn test_same_transaction_logs_keyed_by_index() {
    let harness = Harness::new(projectors());
    let claim = BondEvent::ClaimReward(ClaimReward {
        tokens: addr(TOKEN),
        amount: amount(3),
        instigator: addr(INSTIGATOR),
    });

    let first = harness.next_context(addr(BOND)).build();
    let mut second = first.clone();
    second.log_index = 1;

    harness.emit_with(first.clone(), claim.clone()).await.unwrap();
    harness.emit_with(second.clone(), claim).await.unwrap();

    assert_eq!(harness.count::<bondline_bond::BondRewardClaimed>(), 2);
    assert!(harness
        .load::<bondline_bond::BondRewardClaimed>(&second.log_id())
        .is_some());
    assert_ne!(first.log_id(), second.log_id());
}

#[tokio::test]
async fn test_redemption_accumulates_both_amounts() {
    let harness = Harness::new(projectors());
    harness.emit(addr(BOND), deposit(1_000)).await.unwrap();

    let redeem = |collateral: u64, debt: u64| {
        BondEvent::Redemption(Redemption {
            redeemer: addr(REDEEMER),
            debt_tokens: addr(BOND),
            debt_amount: amount(debt),
            collateral_tokens: addr(TOKEN),
            collateral_amount: amount(collateral),
        })
    };
    harness.emit(addr(BOND), redeem(100, 10)).await.unwrap();
    harness.emit(addr(BOND), redeem(200, 20)).await.unwrap();

    let id = EntityId::accumulator(&addr(BOND), &addr(REDEEMER), Some(&addr(BOND)));
    let redemption: BondRedemption = harness.get(&id);
    assert_eq!(redemption.collateral_amount, Amount::from(300));
    assert_eq!(redemption.debt_amount, Amount::from(30));

    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(700));
}

#[tokio::test]
async fn test_redeemable_update_can_clear_flag() {
    let harness = Harness::new(projectors());

    harness
        .emit(
            addr(BOND),
            BondEvent::AllowRedemption(AllowRedemption {
                authorizer: addr(INSTIGATOR),
                reason: "matured".to_string(),
            }),
        )
        .await
        .unwrap();
    let bond: Bond = harness.get(&bond_id());
    assert!(bond.is_redeemable);
    assert_eq!(bond.redeemable_reason.as_deref(), Some("matured"));

    harness
        .emit(
            addr(BOND),
            BondEvent::RedeemableUpdate(RedeemableUpdate {
                is_redeemable: false,
                reason: "halted".to_string(),
                instigator: addr(TREASURY),
            }),
        )
        .await
        .unwrap();
    let bond: Bond = harness.get(&bond_id());
    assert!(!bond.is_redeemable);
    assert_eq!(bond.redeemable_authorizer, Some(addr(TREASURY)));
}

#[tokio::test]
async fn test_slash_moves_collateral_to_slashed() {
    let harness = Harness::new(projectors());
    harness.emit(addr(BOND), deposit(1_000)).await.unwrap();

    harness
        .emit(
            addr(BOND),
            BondEvent::SlashDeposits(SlashDeposits {
                collateral_tokens: addr(TOKEN),
                collateral_amount: amount(400),
                reason: "missed milestone".to_string(),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();

    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(600));
    assert_eq!(bond.collateral_slashed, Amount::from(400));

    let slashes: Vec<BondSlashDeposit> = harness.derived("bond", &bond_id());
    assert_eq!(slashes.len(), 1);
    assert_eq!(slashes[0].reason, "missed milestone");
}

#[tokio::test]
async fn test_metadata_update_keeps_name() {
    let harness = Harness::new(projectors());
    create_bond(&harness).await;

    harness
        .emit(
            addr(BOND),
            BondEvent::MetaDataUpdate(bondline_bond::events::MetaDataUpdate {
                data: "{\"v\":2}".to_string(),
                instigator: addr(INSTIGATOR),
            }),
        )
        .await
        .unwrap();

    let metadata: BondMetadata = harness.get(&bond_id());
    assert_eq!(metadata.name, "Bond");
    assert_eq!(metadata.data, "{\"v\":2}");
}

#[tokio::test]
async fn test_sqlite_store_projects_bond_events() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("bondline.db")).unwrap());
    let harness = Harness::with_store(store, projectors());

    create_bond(&harness).await;
    harness.emit(addr(BOND), deposit(1_000)).await.unwrap();
    harness.emit(addr(BOND), deposit(24)).await.unwrap();
    harness.emit(addr(BOND), sweep(TOKEN, 24)).await.unwrap();

    let bond: Bond = harness.get(&bond_id());
    assert_eq!(bond.collateral_amount, Amount::from(1_000));
    assert_eq!(bond.treasury, Some(addr(TREASURY)));

    let deposits: Vec<BondDeposit> = harness.derived("bond", &bond_id());
    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].collateral_amount, Amount::from(1_024));
}

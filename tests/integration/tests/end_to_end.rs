//! End-to-end migration flows over a provisioned world

use amm_model::UNIT;
use migrator_integration_tests::default_scenario;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn migrate_one_unit_into_both_lending_pairs() {
    init();
    let mut s = default_scenario().unwrap();
    s.fund_adapter_lp(UNIT).unwrap();

    s.migrator
        .migrate_lp_to_kashi(&mut s.world, s.wallet, s.pair_a, s.pair_b, s.factory)
        .unwrap();

    // The adapter keeps nothing: no LP, no raw balances, no vault credit.
    let adapter = s.migrator.addr();
    assert_eq!(s.world.balance_of(s.pool, adapter).unwrap(), 0);
    assert_eq!(s.world.balance_of(s.token_a, adapter).unwrap(), 0);
    assert_eq!(s.world.balance_of(s.token_b, adapter).unwrap(), 0);
    assert_eq!(s.world.vault().balance_of(s.token_a, adapter), 0);
    assert_eq!(s.world.vault().balance_of(s.token_b, adapter), 0);

    // One unit per side sits in the vault under each pair's own account.
    assert_eq!(s.world.vault().balance_of(s.token_a, s.pair_a), UNIT);
    assert_eq!(s.world.vault().balance_of(s.token_b, s.pair_b), UNIT);

    // The wallet holds the supplied capital in both pairs.
    assert_eq!(s.world.lending_pair(s.pair_a).unwrap().balance_of(s.wallet), UNIT);
    assert_eq!(s.world.lending_pair(s.pair_b).unwrap().balance_of(s.wallet), UNIT);

    // The pool shrank by exactly the redeemed unit.
    assert_eq!(s.world.pool(s.pool).unwrap().reserves(), (99 * UNIT, 99 * UNIT));
    assert_eq!(s.world.token(s.pool).unwrap().total_supply(), 99 * UNIT);
    assert_eq!(s.world.balance_of(s.pool, s.wallet).unwrap(), 99 * UNIT);
}

#[test]
fn migrate_is_argument_order_independent() {
    init();
    let mut forward = default_scenario().unwrap();
    forward.fund_adapter_lp(UNIT).unwrap();
    let mut swapped_world = forward.world.clone();

    forward
        .migrator
        .migrate_lp_to_kashi(
            &mut forward.world,
            forward.wallet,
            forward.pair_a,
            forward.pair_b,
            forward.factory,
        )
        .unwrap();
    forward
        .migrator
        .migrate_lp_to_kashi(
            &mut swapped_world,
            forward.wallet,
            forward.pair_b,
            forward.pair_a,
            forward.factory,
        )
        .unwrap();

    assert_eq!(forward.world, swapped_world);
}

#[test]
fn stepwise_flow_matches_single_migration() {
    init();
    let mut single = default_scenario().unwrap();
    single.fund_adapter_lp(UNIT).unwrap();
    let mut stepped = default_scenario().unwrap();
    stepped.fund_adapter_lp(UNIT).unwrap();

    single
        .migrator
        .migrate_lp_to_kashi(
            &mut single.world,
            single.wallet,
            single.pair_a,
            single.pair_b,
            single.factory,
        )
        .unwrap();

    stepped.migrator.redeem_lp_token(&mut stepped.world, stepped.pool).unwrap();
    let preview = stepped
        .migrator
        .get_amount_to_deposit(&stepped.world, stepped.pair_a, stepped.token_a)
        .unwrap();
    assert_eq!(preview.amount, UNIT);
    assert_eq!(preview.share, UNIT);
    assert_eq!(preview.value, 0, "pool assets are not the native wrapper");
    stepped
        .migrator
        .deposit_and_add_asset(&mut stepped.world, stepped.wallet, stepped.pair_a, stepped.token_a)
        .unwrap();
    stepped
        .migrator
        .deposit_and_add_asset(&mut stepped.world, stepped.wallet, stepped.pair_b, stepped.token_b)
        .unwrap();

    // Identically provisioned worlds allocate identical addresses, so the
    // stepwise flow must land on the same state as the single call.
    assert_eq!(single.world, stepped.world);
}

#[test]
fn migrate_after_vault_yield_floors_in_the_vaults_favor() {
    init();
    let mut s = default_scenario().unwrap();
    let depositor = s.world.new_account();
    let vault_addr = s.world.vault().addr();

    // An earlier depositor and accrued yield shift the token_a rate to
    // 1500 amount per 1000 shares.
    s.world.mint(s.token_a, depositor, 1_000).unwrap();
    s.world.approve(s.token_a, depositor, vault_addr, 1_000).unwrap();
    s.world.vault_deposit(s.token_a, depositor, depositor, 1_000, 0).unwrap();
    s.world.accrue_vault_yield(s.token_a, 500).unwrap();

    s.fund_adapter_lp(UNIT).unwrap();
    s.migrator
        .migrate_lp_to_kashi(&mut s.world, s.wallet, s.pair_a, s.pair_b, s.factory)
        .unwrap();

    // token_a floors: 1_000_000 * 1000 / 1500 = 666_666 shares. token_b
    // stays at par.
    assert_eq!(s.world.lending_pair(s.pair_a).unwrap().balance_of(s.wallet), 666_666);
    assert_eq!(s.world.lending_pair(s.pair_b).unwrap().balance_of(s.wallet), UNIT);

    // The full amount was still pulled; nothing stays with the adapter.
    assert_eq!(s.world.balance_of(s.token_a, s.migrator.addr()).unwrap(), 0);
    assert_eq!(s.world.vault().balance_of(s.token_a, s.pair_a), 666_666);
}

#[test]
fn migrate_full_position_empties_pool() {
    init();
    let mut s = default_scenario().unwrap();
    s.fund_adapter_lp(100 * UNIT).unwrap();

    s.migrator
        .migrate_lp_to_kashi(&mut s.world, s.wallet, s.pair_a, s.pair_b, s.factory)
        .unwrap();

    assert_eq!(s.world.pool(s.pool).unwrap().reserves(), (0, 0));
    assert_eq!(s.world.token(s.pool).unwrap().total_supply(), 0);
    assert_eq!(s.world.lending_pair(s.pair_a).unwrap().balance_of(s.wallet), 100 * UNIT);
    assert_eq!(s.world.lending_pair(s.pair_b).unwrap().balance_of(s.wallet), 100 * UNIT);
}

#[test]
fn migrate_with_no_lp_is_a_noop() {
    init();
    let mut s = default_scenario().unwrap();
    let before = s.world.clone();

    s.migrator
        .migrate_lp_to_kashi(&mut s.world, s.wallet, s.pair_a, s.pair_b, s.factory)
        .unwrap();

    assert_eq!(s.world, before);
}

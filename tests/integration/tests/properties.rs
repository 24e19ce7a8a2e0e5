//! Property tests over randomized pool shapes and vault rates

use amm_model::UNIT;
use migrator_integration_tests::scenario;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_migrate_order_independent(
        reserve0 in 1_000u64..=1_000 * UNIT,
        reserve1 in 1_000u64..=1_000 * UNIT,
        lp_pct in 1u64..=100,
    ) {
        let mut forward = scenario(reserve0, reserve1).unwrap();
        let total = forward.world.token(forward.pool).unwrap().total_supply();
        let lp = ((total / 100) * lp_pct).clamp(1, total);
        forward.fund_adapter_lp(lp).unwrap();

        let before = forward.world.clone();
        let mut swapped_world = forward.world.clone();

        let a = forward.migrator.migrate_lp_to_kashi(
            &mut forward.world,
            forward.wallet,
            forward.pair_a,
            forward.pair_b,
            forward.factory,
        );
        let b = forward.migrator.migrate_lp_to_kashi(
            &mut swapped_world,
            forward.wallet,
            forward.pair_b,
            forward.pair_a,
            forward.factory,
        );

        prop_assert_eq!(a, b, "both argument orders must agree on the outcome");
        prop_assert_eq!(&forward.world, &swapped_world,
            "both argument orders must agree on the final state");

        match a {
            Ok(()) => {
                let adapter = forward.migrator.addr();
                prop_assert_eq!(forward.world.balance_of(forward.pool, adapter).unwrap(), 0,
                    "no LP may remain with the adapter");
                prop_assert_eq!(forward.world.balance_of(forward.token_a, adapter).unwrap(), 0,
                    "no token0 residue may remain with the adapter");
                prop_assert_eq!(forward.world.balance_of(forward.token_b, adapter).unwrap(), 0,
                    "no token1 residue may remain with the adapter");
                // Migration moves tokens, it never creates or destroys them.
                prop_assert_eq!(
                    forward.world.token(forward.token_a).unwrap().total_supply(),
                    before.token(forward.token_a).unwrap().total_supply()
                );
                prop_assert_eq!(
                    forward.world.token(forward.token_b).unwrap().total_supply(),
                    before.token(forward.token_b).unwrap().total_supply()
                );
            }
            Err(_) => {
                prop_assert_eq!(&forward.world, &before,
                    "a refused migration must not change state");
            }
        }
    }

    #[test]
    fn prop_preview_matches_deposit(
        seed in 1u64..=1_000_000,
        profit in 0u64..=1_000_000,
        deposit in 1u64..=1_000_000,
    ) {
        let mut s = scenario(UNIT, UNIT).unwrap();
        let adapter = s.migrator.addr();
        let depositor = s.world.new_account();
        let vault_addr = s.world.vault().addr();

        s.world.mint(s.token_a, depositor, seed).unwrap();
        s.world.approve(s.token_a, depositor, vault_addr, seed).unwrap();
        s.world.vault_deposit(s.token_a, depositor, depositor, seed, 0).unwrap();
        if profit > 0 {
            s.world.accrue_vault_yield(s.token_a, profit).unwrap();
        }
        s.world.mint(s.token_a, adapter, deposit).unwrap();

        let preview = s.migrator
            .get_amount_to_deposit(&s.world, s.pair_a, s.token_a)
            .unwrap();
        let share = s.migrator.deposit(&mut s.world, s.pair_a, s.token_a).unwrap();

        prop_assert_eq!(preview.amount, deposit);
        prop_assert_eq!(share, preview.share,
            "the preview must match the deposit that follows it");
        prop_assert_eq!(s.world.vault().balance_of(s.token_a, s.pair_a), share);
        prop_assert_eq!(s.world.balance_of(s.token_a, adapter).unwrap(), 0,
            "the deposit must drain the adapter");
    }

    #[test]
    fn prop_mismatched_supply_always_rolls_back(
        amount in 1u64..=1_000_000,
    ) {
        let mut s = scenario(UNIT, UNIT).unwrap();
        let adapter = s.migrator.addr();
        s.world.mint(s.token_b, adapter, amount).unwrap();
        let before = s.world.clone();

        // pair_a lends token_a; handing it token_b must fail whole.
        let result = s.migrator.deposit_and_add_asset(&mut s.world, s.wallet, s.pair_a, s.token_b);

        prop_assert!(result.is_err());
        prop_assert_eq!(&s.world, &before, "a failed supply must not change state");
    }
}

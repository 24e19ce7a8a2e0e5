//! Shared test scenario
//!
//! One seeded world used across the unit tests: a two-token pool holding
//! 100 units per side with the wallet owning all 100 units of LP supply,
//! an empty custody vault, and one lending pair per pool asset. Tests
//! move LP or raw balances to the adapter themselves.

use amm_model::UNIT;
use ledger_model::Addr;

use crate::config::MigratorConfig;
use crate::ops::migrate::Migrator;
use crate::state::World;

pub(crate) struct Scenario {
    pub world: World,
    pub migrator: Migrator,
    pub wallet: Addr,
    pub weth: Addr,
    /// Pool `token0` (lower address).
    pub token_a: Addr,
    /// Pool `token1`.
    pub token_b: Addr,
    pub factory: Addr,
    pub pool: Addr,
    /// Lending pair with asset `token_a`, collateral `token_b`.
    pub pair_a: Addr,
    /// Lending pair with asset `token_b`, collateral `token_a`.
    pub pair_b: Addr,
}

pub(crate) fn seeded() -> Scenario {
    let mut world = World::new();

    let weth = world.deploy_token();
    let token_a = world.deploy_token();
    let token_b = world.deploy_token();
    let wallet = world.new_account();

    let factory = world.create_factory();
    let pool = world.create_pair(factory, token_a, token_b).unwrap();

    world.mint(token_a, wallet, 100 * UNIT).unwrap();
    world.mint(token_b, wallet, 100 * UNIT).unwrap();
    world.add_liquidity(pool, wallet, 100 * UNIT, 100 * UNIT).unwrap();

    let pairs = world
        .create_lending_pairs(&[token_b, token_a], &[token_a, token_b])
        .unwrap();

    let adapter = world.new_account();
    let migrator = Migrator::new(adapter, MigratorConfig::new(weth));

    Scenario {
        world,
        migrator,
        wallet,
        weth,
        token_a,
        token_b,
        factory,
        pool,
        pair_a: pairs[0],
        pair_b: pairs[1],
    }
}

//! Scenario builder for the integration tests
//!
//! Builds worlds through the public API only, the way a deployment script
//! would: deploy tokens, create the factory and the pool, seed liquidity
//! from the wallet, provision one lending pair per pool asset, and
//! construct the adapter. Tests then move LP to the adapter and drive the
//! entry points.

use amm_model::UNIT;
use anyhow::{Context, Result};
use ledger_model::Addr;
use migrator::{Migrator, MigratorConfig, World};

/// A provisioned world: one pool, one lending pair per pool asset, and
/// the adapter. The wallet holds the entire LP supply.
pub struct Scenario {
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

impl Scenario {
    /// Move `amount` of the wallet's LP shares to the adapter, as a
    /// wallet migrating its position would before any entry point.
    pub fn fund_adapter_lp(&mut self, amount: u64) -> Result<()> {
        self.world
            .transfer(self.pool, self.wallet, self.migrator.addr(), amount)
            .context("funding the adapter with LP shares")
    }
}

/// Provision a pool seeded with `reserve0`/`reserve1` and a lending pair
/// for each of its assets.
pub fn scenario(reserve0: u64, reserve1: u64) -> Result<Scenario> {
    let mut world = World::new();

    let weth = world.deploy_token();
    let token_a = world.deploy_token();
    let token_b = world.deploy_token();
    let wallet = world.new_account();

    let factory = world.create_factory();
    let pool = world.create_pair(factory, token_a, token_b)?;

    world.mint(token_a, wallet, reserve0)?;
    world.mint(token_b, wallet, reserve1)?;
    world
        .add_liquidity(pool, wallet, reserve0, reserve1)
        .context("seeding pool liquidity")?;

    let pairs = world.create_lending_pairs(&[token_b, token_a], &[token_a, token_b])?;

    let adapter = world.new_account();
    let migrator = Migrator::new(adapter, MigratorConfig::new(weth));

    Ok(Scenario {
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
    })
}

/// The canonical scenario: 100 units per side, wallet holding all 100
/// units of the LP supply.
pub fn default_scenario() -> Result<Scenario> {
    scenario(100 * UNIT, 100 * UNIT)
}

//! Migration orchestrator - the adapter's public entry points
//!
//! Five operations composed from the redeemer, the bridges, and the
//! matcher. Every mutating entry point runs under a scoped reentrancy
//! guard and stages its work on a copy of the world, committing only on
//! success, so a failure at any step leaves the world exactly as it was.
//! The preview is read-only and takes no guard.

use core::cell::Cell;

use ledger_model::Addr;

use crate::config::MigratorConfig;
use crate::error::MigrateError;
use crate::ops::vault_bridge::DepositPreview;
use crate::ops::{lending_bridge, matcher, redeem, vault_bridge};
use crate::state::World;

/// The migration adapter.
///
/// Stateless between calls apart from its ledger address, its immutable
/// configuration, and the transient reentrancy flag. All durable state
/// lives in the [`World`] the caller passes in.
#[derive(Debug)]
pub struct Migrator {
    addr: Addr,
    config: MigratorConfig,
    entered: Cell<bool>,
}

/// Scoped reentrancy lock, released on drop on every exit path.
pub(crate) struct CallGuard<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

impl Migrator {
    pub fn new(addr: Addr, config: MigratorConfig) -> Self {
        Self {
            addr,
            config,
            entered: Cell::new(false),
        }
    }

    /// The adapter's own ledger address, where redeemed balances land.
    pub fn addr(&self) -> Addr {
        self.addr
    }

    pub fn config(&self) -> &MigratorConfig {
        &self.config
    }

    pub(crate) fn enter(&self) -> Result<CallGuard<'_>, MigrateError> {
        if self.entered.replace(true) {
            return Err(MigrateError::Reentrancy);
        }
        Ok(CallGuard { flag: &self.entered })
    }

    /// Redeem the adapter's LP balance of `pool` into raw underlyings.
    ///
    /// The redeemed amounts stay with the adapter for subsequent deposit
    /// calls. A zero balance is a no-op.
    pub fn redeem_lp_token(&self, world: &mut World, pool: Addr) -> Result<(), MigrateError> {
        let _guard = self.enter()?;
        log::debug!("redeem_lp_token: pool={}", pool);
        world.stage(|w| redeem::redeem(w, self.addr, pool).map(|_| ()))
    }

    /// Preview depositing the adapter's live balance of `asset`.
    ///
    /// Read-only. The lending-pair reference must resolve but does not
    /// otherwise shape the preview; the numbers depend only on the
    /// adapter's balance and the vault's current rate.
    pub fn get_amount_to_deposit(
        &self,
        world: &World,
        lending_pair: Addr,
        asset: Addr,
    ) -> Result<DepositPreview, MigrateError> {
        world.lending_pair(lending_pair)?;
        vault_bridge::amount_to_deposit(world, self.config.native_wrapper, self.addr, asset)
    }

    /// Deposit the adapter's entire `asset` balance into the vault,
    /// crediting the lending pair's own vault account.
    ///
    /// Returns the share credited. No lending shares are minted; pairing
    /// the credit with supplied capital is [`Self::deposit_and_add_asset`].
    pub fn deposit(
        &self,
        world: &mut World,
        lending_pair: Addr,
        asset: Addr,
    ) -> Result<u64, MigrateError> {
        let _guard = self.enter()?;
        log::debug!("deposit: pair={} asset={}", lending_pair, asset);
        world.stage(|w| {
            w.lending_pair(lending_pair)?;
            vault_bridge::deposit_all(w, self.addr, lending_pair, asset)
        })
    }

    /// Deposit the adapter's entire `asset` balance for `lending_pair`
    /// and register it as capital supplied by `caller`.
    ///
    /// Returns the lending shares minted to `caller`.
    pub fn deposit_and_add_asset(
        &self,
        world: &mut World,
        caller: Addr,
        lending_pair: Addr,
        asset: Addr,
    ) -> Result<u64, MigrateError> {
        let _guard = self.enter()?;
        log::debug!(
            "deposit_and_add_asset: caller={} pair={} asset={}",
            caller,
            lending_pair,
            asset
        );
        world.stage(|w| lending_bridge::deposit_and_supply(w, self.addr, lending_pair, asset, caller))
    }

    /// Migrate the adapter's LP position into the two lending pairs.
    ///
    /// The pool is looked up in `factory` by the pairs' assets, the LP
    /// balance is redeemed, and each underlying is deposited and supplied
    /// through the pair matched to it, crediting `caller` with the minted
    /// lending shares. The two pair references may come in either order;
    /// matching is keyed by asset identity.
    pub fn migrate_lp_to_kashi(
        &self,
        world: &mut World,
        caller: Addr,
        lending_pair_a: Addr,
        lending_pair_b: Addr,
        factory: Addr,
    ) -> Result<(), MigrateError> {
        let _guard = self.enter()?;
        log::debug!(
            "migrate_lp_to_kashi: caller={} pair_a={} pair_b={} factory={}",
            caller,
            lending_pair_a,
            lending_pair_b,
            factory
        );
        world.stage(|w| {
            let asset_a = w.lending_pair(lending_pair_a)?.asset();
            let asset_b = w.lending_pair(lending_pair_b)?.asset();
            let pool = w
                .factory(factory)?
                .get_pair(asset_a, asset_b)
                .ok_or(MigrateError::NotFound("no pool joining the pair assets"))?;

            redeem::redeem(w, self.addr, pool)?;

            let assignment = matcher::match_pairs(w, lending_pair_a, lending_pair_b, pool)?;
            let (token0, token1) = {
                let p = w.pool(pool)?;
                (p.token0(), p.token1())
            };

            // Canonical token order keeps the two supplies deterministic
            // whichever way the caller ordered the pair arguments.
            lending_bridge::deposit_and_supply(w, self.addr, assignment.pair0, token0, caller)?;
            lending_bridge::deposit_and_supply(w, self.addr, assignment.pair1, token1, caller)?;

            let residue0 = w.token(token0)?.balance_of(self.addr);
            let residue1 = w.token(token1)?.balance_of(self.addr);
            debug_assert_eq!(residue0, 0, "adapter must end with no token0 residue");
            debug_assert_eq!(residue1, 0, "adapter must end with no token1 residue");

            log::info!(
                "migrate: pool={} caller={} pair0={} pair1={} complete",
                pool,
                caller,
                assignment.pair0,
                assignment.pair1
            );
            Ok(())
        })
    }
}

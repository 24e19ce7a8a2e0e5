//! The collaborator world
//!
//! One [`World`] owns every addressable entity the adapter can reach:
//! token ledgers (plain assets and LP share tokens alike), pool factories,
//! pools, the custody vault, and lending pairs. Pool share tokens live in
//! the same ledger map as ordinary assets, keyed by the pool's address, so
//! an LP balance reads like any other token balance.
//!
//! Provisioning helpers and the pool contract primitives live here because
//! they touch several ledgers at once; the adapter operations in
//! [`crate::ops`] only ever go through these methods. Mutations that can
//! fail midway run on a staged copy via [`World::stage`], so a refused
//! step never leaves a half-applied world behind.

use std::collections::BTreeMap;

use ledger_model::{Addr, LendingPair, TokenLedger, Vault};

use crate::error::MigrateError;
use crate::state::pool::{PairFactory, Pool};

/// Every ledger the adapter can reach, addressable by [`Addr`].
///
/// Equality is structural over balances, reserves, and totals; ledgers
/// prune zero entries, so two worlds that went through different call
/// orders compare equal whenever their observable state agrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    tokens: BTreeMap<Addr, TokenLedger>,
    factories: BTreeMap<Addr, PairFactory>,
    pools: BTreeMap<Addr, Pool>,
    vault: Vault,
    lending_pairs: BTreeMap<Addr, LendingPair>,
    next_index: u64,
}

impl World {
    pub fn new() -> Self {
        // Index 0 is the zero address; the vault takes index 1.
        let vault = Vault::new(Addr::from_index(1));
        Self {
            tokens: BTreeMap::new(),
            factories: BTreeMap::new(),
            pools: BTreeMap::new(),
            vault,
            lending_pairs: BTreeMap::new(),
            next_index: 2,
        }
    }

    fn alloc_addr(&mut self) -> Addr {
        let addr = Addr::from_index(self.next_index);
        self.next_index += 1;
        addr
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn token(&self, token: Addr) -> Result<&TokenLedger, MigrateError> {
        self.tokens.get(&token).ok_or(MigrateError::NotFound("token ledger"))
    }

    fn token_mut(&mut self, token: Addr) -> Result<&mut TokenLedger, MigrateError> {
        self.tokens.get_mut(&token).ok_or(MigrateError::NotFound("token ledger"))
    }

    pub fn pool(&self, pool: Addr) -> Result<&Pool, MigrateError> {
        self.pools.get(&pool).ok_or(MigrateError::NotFound("pool"))
    }

    fn pool_mut(&mut self, pool: Addr) -> Result<&mut Pool, MigrateError> {
        self.pools.get_mut(&pool).ok_or(MigrateError::NotFound("pool"))
    }

    pub fn factory(&self, factory: Addr) -> Result<&PairFactory, MigrateError> {
        self.factories.get(&factory).ok_or(MigrateError::NotFound("pool factory"))
    }

    pub fn lending_pair(&self, pair: Addr) -> Result<&LendingPair, MigrateError> {
        self.lending_pairs.get(&pair).ok_or(MigrateError::NotFound("lending pair"))
    }

    pub fn balance_of(&self, token: Addr, account: Addr) -> Result<u64, MigrateError> {
        Ok(self.token(token)?.balance_of(account))
    }

    // ========================================================================
    // Provisioning
    // ========================================================================

    /// Allocate a fresh externally-owned account address.
    pub fn new_account(&mut self) -> Addr {
        self.alloc_addr()
    }

    /// Deploy an empty token ledger and return its address.
    pub fn deploy_token(&mut self) -> Addr {
        let addr = self.alloc_addr();
        self.tokens.insert(addr, TokenLedger::new());
        addr
    }

    /// Deploy an empty pool factory and return its address.
    pub fn create_factory(&mut self) -> Addr {
        let addr = self.alloc_addr();
        self.factories.insert(addr, PairFactory::new(addr));
        addr
    }

    /// Create the pool joining `token_a` and `token_b` under `factory`.
    ///
    /// The token pair is canonicalized so the lower address becomes
    /// `token0`. The pool's LP share ledger is created alongside it, keyed
    /// by the pool address.
    pub fn create_pair(
        &mut self,
        factory: Addr,
        token_a: Addr,
        token_b: Addr,
    ) -> Result<Addr, MigrateError> {
        self.token(token_a)?;
        self.token(token_b)?;
        if token_a == token_b {
            return Err(MigrateError::Configuration("identical pool tokens"));
        }
        if self.factory(factory)?.get_pair(token_a, token_b).is_some() {
            return Err(MigrateError::Configuration("pool already exists for pair"));
        }

        let addr = self.alloc_addr();
        let (token0, token1) = if token_a <= token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let registry = self
            .factories
            .get_mut(&factory)
            .ok_or(MigrateError::NotFound("pool factory"))?;
        registry.register(token0, token1, addr)?;

        self.tokens.insert(addr, TokenLedger::new());
        self.pools.insert(addr, Pool::new(addr, token0, token1));
        Ok(addr)
    }

    /// Create lending pairs from parallel collateral/asset lists.
    ///
    /// The lists pair up by index. A length mismatch, an unknown token, or
    /// a collateral equal to its asset is rejected before anything is
    /// created.
    pub fn create_lending_pairs(
        &mut self,
        collaterals: &[Addr],
        assets: &[Addr],
    ) -> Result<Vec<Addr>, MigrateError> {
        if collaterals.len() != assets.len() {
            return Err(MigrateError::Configuration(
                "collateral and asset lists differ in length",
            ));
        }
        for (&collateral, &asset) in collaterals.iter().zip(assets) {
            self.token(collateral)?;
            self.token(asset)?;
            if collateral == asset {
                return Err(MigrateError::Configuration("collateral equals asset"));
            }
        }

        let mut created = Vec::with_capacity(assets.len());
        for (&collateral, &asset) in collaterals.iter().zip(assets) {
            let addr = self.alloc_addr();
            self.lending_pairs.insert(addr, LendingPair::new(addr, collateral, asset));
            created.push(addr);
        }
        Ok(created)
    }

    /// Mint fresh supply straight to an account.
    pub fn mint(&mut self, token: Addr, to: Addr, amount: u64) -> Result<(), MigrateError> {
        self.token_mut(token)?.mint(to, amount).map_err(Into::into)
    }

    pub fn transfer(
        &mut self,
        token: Addr,
        from: Addr,
        to: Addr,
        amount: u64,
    ) -> Result<(), MigrateError> {
        self.token_mut(token)?.transfer(from, to, amount).map_err(Into::into)
    }

    pub fn approve(
        &mut self,
        token: Addr,
        owner: Addr,
        spender: Addr,
        amount: u64,
    ) -> Result<(), MigrateError> {
        self.token_mut(token)?.approve(owner, spender, amount);
        Ok(())
    }

    /// Provide liquidity: move both amounts from `provider` into the pool
    /// and mint LP shares back to them.
    pub fn add_liquidity(
        &mut self,
        pool: Addr,
        provider: Addr,
        amount0: u64,
        amount1: u64,
    ) -> Result<u64, MigrateError> {
        self.stage(|w| {
            let (token0, token1) = {
                let p = w.pool(pool)?;
                (p.token0(), p.token1())
            };
            w.token_mut(token0)?.transfer(provider, pool, amount0)?;
            w.token_mut(token1)?.transfer(provider, pool, amount1)?;
            w.pool_mint(pool, provider)
        })
    }

    /// Record strategy yield on a vault asset, shifting its exchange rate.
    pub fn accrue_vault_yield(&mut self, asset: Addr, profit: u64) -> Result<(), MigrateError> {
        let ledger = self
            .tokens
            .get_mut(&asset)
            .ok_or(MigrateError::NotFound("token ledger"))?;
        self.vault.accrue(ledger, asset, profit).map_err(Into::into)
    }

    // ========================================================================
    // Pool contract primitives
    // ========================================================================

    /// Mint LP shares to `to` for whatever pool balance sits above the
    /// recorded reserves.
    ///
    /// Callers transfer the contribution to the pool first; the pool then
    /// measures it as the balance delta, mints, and syncs its reserves to
    /// the new balances.
    pub fn pool_mint(&mut self, pool: Addr, to: Addr) -> Result<u64, MigrateError> {
        let (token0, token1, reserve0, reserve1) = {
            let p = self.pool(pool)?;
            let (r0, r1) = p.reserves();
            (p.token0(), p.token1(), r0, r1)
        };
        let balance0 = self.token(token0)?.balance_of(pool);
        let balance1 = self.token(token1)?.balance_of(pool);
        let amount0 = balance0
            .checked_sub(reserve0)
            .ok_or(MigrateError::External("pool: balance below reserves"))?;
        let amount1 = balance1
            .checked_sub(reserve1)
            .ok_or(MigrateError::External("pool: balance below reserves"))?;

        let total_shares = self.token(pool)?.total_supply();
        let minted = amm_model::mint_shares(reserve0, reserve1, total_shares, amount0, amount1)?;

        self.token_mut(pool)?.mint(to, minted)?;
        self.pool_mut(pool)?.set_reserves(balance0, balance1);
        Ok(minted)
    }

    /// Burn the LP share balance sitting at the pool's own address and pay
    /// both underlyings to `recipient`.
    ///
    /// This is the transfer-then-burn flow: the shares to burn are
    /// whatever the pool holds of its own token when the call lands.
    pub fn pool_burn(&mut self, pool: Addr, recipient: Addr) -> Result<(u64, u64), MigrateError> {
        let (token0, token1, reserve0, reserve1) = {
            let p = self.pool(pool)?;
            let (r0, r1) = p.reserves();
            (p.token0(), p.token1(), r0, r1)
        };
        let (shares_held, total_shares) = {
            let shares = self.token(pool)?;
            (shares.balance_of(pool), shares.total_supply())
        };

        let (amount0, amount1) =
            amm_model::burn_amounts(reserve0, reserve1, total_shares, shares_held)?;

        self.token_mut(pool)?.burn(pool, shares_held)?;
        self.token_mut(token0)?.transfer(pool, recipient, amount0)?;
        self.token_mut(token1)?.transfer(pool, recipient, amount1)?;

        let balance0 = self.token(token0)?.balance_of(pool);
        let balance1 = self.token(token1)?.balance_of(pool);
        self.pool_mut(pool)?.set_reserves(balance0, balance1);
        Ok((amount0, amount1))
    }

    // ========================================================================
    // Vault and lending primitives
    // ========================================================================

    /// Deposit into the custody vault on behalf of `from`, crediting `to`.
    ///
    /// Exactly one of `amount` and `share` must be nonzero; the vault
    /// converts the given side at its current rate.
    pub fn vault_deposit(
        &mut self,
        asset: Addr,
        from: Addr,
        to: Addr,
        amount: u64,
        share: u64,
    ) -> Result<(u64, u64), MigrateError> {
        let ledger = self
            .tokens
            .get_mut(&asset)
            .ok_or(MigrateError::NotFound("token ledger"))?;
        self.vault
            .deposit(ledger, asset, from, to, amount, share)
            .map_err(Into::into)
    }

    /// Register freshly credited vault shares as supplied capital in a
    /// lending pair, minting lending shares to `supplier`.
    pub fn lending_add_asset(
        &mut self,
        pair: Addr,
        supplier: Addr,
        share: u64,
    ) -> Result<u64, MigrateError> {
        let pair_state = self
            .lending_pairs
            .get_mut(&pair)
            .ok_or(MigrateError::NotFound("lending pair"))?;
        let own_vault_balance = self.vault.balance_of(pair_state.asset(), pair);
        pair_state
            .add_asset(own_vault_balance, supplier, share)
            .map_err(Into::into)
    }

    // ========================================================================
    // Staging
    // ========================================================================

    /// Run `f` against a copy of the world; commit the copy only if it
    /// returns `Ok`. A refused step therefore mutates nothing.
    pub(crate) fn stage<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, MigrateError>,
    ) -> Result<T, MigrateError> {
        let mut staged = self.clone();
        let out = f(&mut staged)?;
        *self = staged;
        Ok(out)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

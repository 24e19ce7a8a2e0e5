//! Constant-product pool state and the pool factory
//!
//! A pool's LP share token is an ordinary token ledger that the world keys
//! under the pool's own address; this module only holds the reserve state
//! and the factory registry. The mint and burn flows, which touch several
//! ledgers at once, live on [`World`](super::world::World).

use std::collections::BTreeMap;

use ledger_model::Addr;

use crate::error::MigrateError;

/// Reserve state of one constant-product pool.
///
/// `token0 < token1` always holds; the factory canonicalizes the pair on
/// creation so lookups and processing order never depend on how callers
/// happened to order the two tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    addr: Addr,
    token0: Addr,
    token1: Addr,
    reserve0: u64,
    reserve1: u64,
}

impl Pool {
    pub(crate) fn new(addr: Addr, token0: Addr, token1: Addr) -> Self {
        debug_assert!(token0 < token1, "factory must canonicalize token order");
        Self {
            addr,
            token0,
            token1,
            reserve0: 0,
            reserve1: 0,
        }
    }

    pub fn addr(&self) -> Addr {
        self.addr
    }

    pub fn token0(&self) -> Addr {
        self.token0
    }

    pub fn token1(&self) -> Addr {
        self.token1
    }

    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve0, self.reserve1)
    }

    /// Sync recorded reserves to the pool's post-transition balances.
    pub(crate) fn set_reserves(&mut self, reserve0: u64, reserve1: u64) {
        self.reserve0 = reserve0;
        self.reserve1 = reserve1;
    }
}

/// Registry of pools keyed by their unordered token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFactory {
    addr: Addr,
    pairs: BTreeMap<(Addr, Addr), Addr>,
}

impl PairFactory {
    pub(crate) fn new(addr: Addr) -> Self {
        Self {
            addr,
            pairs: BTreeMap::new(),
        }
    }

    pub fn addr(&self) -> Addr {
        self.addr
    }

    /// Unordered lookup key: smaller address first.
    fn key(token_a: Addr, token_b: Addr) -> (Addr, Addr) {
        if token_a <= token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        }
    }

    pub(crate) fn register(
        &mut self,
        token_a: Addr,
        token_b: Addr,
        pool: Addr,
    ) -> Result<(), MigrateError> {
        if token_a == token_b {
            return Err(MigrateError::Configuration("identical pool tokens"));
        }
        let key = Self::key(token_a, token_b);
        if self.pairs.contains_key(&key) {
            return Err(MigrateError::Configuration("pool already exists for pair"));
        }
        self.pairs.insert(key, pool);
        Ok(())
    }

    /// Look up the pool joining two tokens, in either order.
    pub fn get_pair(&self, token_a: Addr, token_b: Addr) -> Option<Addr> {
        self.pairs.get(&Self::key(token_a, token_b)).copied()
    }
}

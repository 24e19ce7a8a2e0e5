//! Isolated lending pair
//!
//! Pairs one collateral asset with one lending asset. Supplied capital
//! lives in the pair's own vault account as vault shares; suppliers are
//! issued lending shares against the pair's recorded vault-share total.
//! New capital arrives by being credited to the pair's vault account
//! first, then registered here; the pair pulls only the freshly-credited,
//! not-yet-recorded portion.
//!
//! # Properties
//! - **L1**: first supply mints lending shares 1:1 with vault shares
//! - **L2**: follow-on supply mints `share · base / elastic`, floored
//! - **L3**: `add_asset` never registers more than the unrecorded portion
//!   of the pair's vault balance
//! - **L4**: a refused call mutates nothing

use alloc::collections::BTreeMap;
use core::fmt;

use crate::Addr;

/// Error types for lending pair operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendingError {
    /// Requested pull exceeds the unrecorded vault shares in the pair's
    /// own vault account
    SkimShortfall,
    /// Lending shares outstanding with no recorded capital; the rate is
    /// undefined
    InvalidRate,
    /// Arithmetic overflow
    Overflow,
}

impl fmt::Display for LendingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LendingError::SkimShortfall => "unrecorded vault shares below requested pull",
            LendingError::InvalidRate => "undefined lending rate",
            LendingError::Overflow => "arithmetic overflow",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for LendingError {}

/// Isolated lending pair state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LendingPair {
    addr: Addr,
    collateral: Addr,
    asset: Addr,
    /// Vault shares recorded as supplied capital (the elastic side)
    total_asset_shares: u64,
    /// Lending shares outstanding (the base side)
    total_lending_shares: u64,
    /// supplier -> lending share balance
    balances: BTreeMap<Addr, u64>,
}

impl LendingPair {
    pub fn new(addr: Addr, collateral: Addr, asset: Addr) -> Self {
        Self {
            addr,
            collateral,
            asset,
            total_asset_shares: 0,
            total_lending_shares: 0,
            balances: BTreeMap::new(),
        }
    }

    /// The pair's own address; also its account in the vault
    pub fn addr(&self) -> Addr {
        self.addr
    }

    pub fn collateral(&self) -> Addr {
        self.collateral
    }

    /// The asset this pair lends out; immutable after creation
    pub fn asset(&self) -> Addr {
        self.asset
    }

    pub fn total_asset_shares(&self) -> u64 {
        self.total_asset_shares
    }

    pub fn total_lending_shares(&self) -> u64 {
        self.total_lending_shares
    }

    pub fn balance_of(&self, account: Addr) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Register freshly-credited vault shares as supplied capital and mint
    /// lending shares to `supplier`
    ///
    /// `own_vault_balance` is the pair's current vault share balance for
    /// its configured asset. The unrecorded portion
    /// (`own_vault_balance - total_asset_shares`) is what a prior deposit
    /// left for the pair to pull; `share` must not exceed it (L3).
    ///
    /// `share == 0` is a no-op returning 0.
    pub fn add_asset(
        &mut self,
        own_vault_balance: u64,
        supplier: Addr,
        share: u64,
    ) -> Result<u64, LendingError> {
        if share == 0 {
            return Ok(0);
        }
        let unrecorded = own_vault_balance
            .checked_sub(self.total_asset_shares)
            .ok_or(LendingError::SkimShortfall)?;
        if share > unrecorded {
            return Err(LendingError::SkimShortfall);
        }

        let minted = if self.total_lending_shares == 0 {
            // L1
            share
        } else if self.total_asset_shares == 0 {
            return Err(LendingError::InvalidRate);
        } else {
            // L2: share · base / elastic, floored
            let wide = (share as u128) * (self.total_lending_shares as u128)
                / (self.total_asset_shares as u128);
            if wide > u64::MAX as u128 {
                return Err(LendingError::Overflow);
            }
            wide as u64
        };

        let new_elastic = self
            .total_asset_shares
            .checked_add(share)
            .ok_or(LendingError::Overflow)?;
        let new_base = self
            .total_lending_shares
            .checked_add(minted)
            .ok_or(LendingError::Overflow)?;
        let new_balance = self
            .balance_of(supplier)
            .checked_add(minted)
            .ok_or(LendingError::Overflow)?;

        self.total_asset_shares = new_elastic;
        self.total_lending_shares = new_base;
        if new_balance > 0 {
            self.balances.insert(supplier, new_balance);
        }
        Ok(minted)
    }
}


// ============================================================================
// Kani Formal Verification Proofs
// ============================================================================

#[cfg(kani)]
mod proofs {
    use super::*;

    const BOUND: u64 = 1_000_000_000;

    const PAIR: Addr = Addr::from_index(20);
    const COLLATERAL: Addr = Addr::from_index(21);
    const ASSET: Addr = Addr::from_index(22);
    const SUPPLIER: Addr = Addr::from_index(23);

    /// **Proof L1: the first supply mints lending shares 1:1**
    #[kani::proof]
    fn proof_l1_first_supply_one_to_one() {
        let own: u64 = kani::any();
        let share: u64 = kani::any();

        kani::assume(own <= BOUND);
        kani::assume(share >= 1 && share <= own);

        let mut pair = LendingPair::new(PAIR, COLLATERAL, ASSET);
        let minted = pair.add_asset(own, SUPPLIER, share).unwrap();
        assert!(minted == share);
        assert!(pair.total_asset_shares == share);
        assert!(pair.total_lending_shares == share);
    }

    /// **Proof L2: follow-on supply mints `share · base / elastic`, floored**
    #[kani::proof]
    fn proof_l2_follow_on_mints_floored() {
        let elastic: u64 = kani::any();
        let base: u64 = kani::any();
        let share: u64 = kani::any();

        kani::assume(elastic >= 1 && elastic <= BOUND);
        kani::assume(base >= 1 && base <= BOUND);
        kani::assume(share >= 1 && share <= BOUND);

        let mut pair = LendingPair::new(PAIR, COLLATERAL, ASSET);
        pair.total_asset_shares = elastic;
        pair.total_lending_shares = base;

        // The whole request sits fresh in the pair's vault account
        let minted = pair.add_asset(elastic + share, SUPPLIER, share).unwrap();

        // minted is the floored quotient: minted·elastic <= share·base
        // and the next share up would overshoot
        let scaled = (minted as u128) * (elastic as u128);
        let exact = (share as u128) * (base as u128);
        assert!(scaled <= exact);
        assert!(scaled + elastic as u128 > exact);
        assert!(pair.total_asset_shares == elastic + share);
        assert!(pair.total_lending_shares == base + minted);
    }
}

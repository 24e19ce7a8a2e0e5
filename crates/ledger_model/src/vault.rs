//! Shared custody vault
//!
//! Tracks, per asset, the raw amount held in custody and the claim shares
//! outstanding against it, plus per-(asset, owner) share balances. Deposits
//! pull raw tokens from the depositor into the vault's own ledger account
//! and credit shares at the current exchange rate.
//!
//! # Properties
//! - **V1**: conversions are floor division at the `totals` rate; rounding
//!   favors the vault
//! - **V2**: the first deposit of an asset books shares 1:1 with amount
//! - **V3**: a deposit grows `totals.amount` by exactly the pulled amount
//!   and `totals.shares` by exactly the credited shares
//! - **V4**: a refused deposit leaves vault and token ledger untouched

use alloc::collections::BTreeMap;
use core::fmt;

use crate::{Addr, TokenError, TokenLedger};

/// Error types for vault operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultError {
    /// Exactly one of amount/share may be the nonzero conversion side, and
    /// the request must move something
    InvalidRequest,
    /// Shares outstanding with no backing amount; the rate is undefined
    InvalidRate,
    /// The underlying token ledger refused the pull
    Token(TokenError),
    /// Arithmetic overflow
    Overflow,
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::InvalidRequest => f.write_str("invalid deposit request"),
            VaultError::InvalidRate => f.write_str("undefined exchange rate"),
            VaultError::Token(e) => write!(f, "token ledger: {}", e),
            VaultError::Overflow => f.write_str("arithmetic overflow"),
        }
    }
}

impl core::error::Error for VaultError {}

impl From<TokenError> for VaultError {
    fn from(e: TokenError) -> Self {
        VaultError::Token(e)
    }
}

/// Per-asset custody totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetTotals {
    /// Raw token amount held for this asset
    pub amount: u64,
    /// Claim shares outstanding against that amount
    pub shares: u64,
}

/// Convert a raw amount to claim shares at the given totals, floored
///
/// V2: with no shares outstanding the rate is 1:1.
pub fn amount_to_share(
    amount: u64,
    total_amount: u64,
    total_shares: u64,
) -> Result<u64, VaultError> {
    if total_shares == 0 {
        return Ok(amount);
    }
    if total_amount == 0 {
        return Err(VaultError::InvalidRate);
    }
    let wide = (amount as u128) * (total_shares as u128) / (total_amount as u128);
    if wide > u64::MAX as u128 {
        return Err(VaultError::Overflow);
    }
    Ok(wide as u64)
}

/// Convert claim shares back to a raw amount at the given totals, floored
pub fn share_to_amount(
    share: u64,
    total_amount: u64,
    total_shares: u64,
) -> Result<u64, VaultError> {
    if total_shares == 0 {
        return Ok(share);
    }
    let wide = (share as u128) * (total_amount as u128) / (total_shares as u128);
    if wide > u64::MAX as u128 {
        return Err(VaultError::Overflow);
    }
    Ok(wide as u64)
}

/// Shared custody vault state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    addr: Addr,
    /// asset -> custody totals
    totals: BTreeMap<Addr, AssetTotals>,
    /// (asset, owner) -> share balance
    balances: BTreeMap<(Addr, Addr), u64>,
}

impl Vault {
    pub fn new(addr: Addr) -> Self {
        Self {
            addr,
            totals: BTreeMap::new(),
            balances: BTreeMap::new(),
        }
    }

    /// The vault's own ledger account, holding all custody
    pub fn addr(&self) -> Addr {
        self.addr
    }

    pub fn totals(&self, asset: Addr) -> AssetTotals {
        self.totals.get(&asset).copied().unwrap_or_default()
    }

    pub fn balance_of(&self, asset: Addr, account: Addr) -> u64 {
        self.balances.get(&(asset, account)).copied().unwrap_or(0)
    }

    /// Amount -> shares at the asset's current rate, floored
    pub fn to_share(&self, asset: Addr, amount: u64) -> Result<u64, VaultError> {
        let totals = self.totals(asset);
        amount_to_share(amount, totals.amount, totals.shares)
    }

    /// Shares -> amount at the asset's current rate, floored
    pub fn to_amount(&self, asset: Addr, share: u64) -> Result<u64, VaultError> {
        let totals = self.totals(asset);
        share_to_amount(share, totals.amount, totals.shares)
    }

    /// Deposit raw tokens, crediting `to`'s share balance
    ///
    /// Exactly one of `amount` / `share` is the conversion side: pass the
    /// amount to pull and 0 shares, or the shares to credit and 0 amount.
    /// The vault pulls `amount_used` from `from` via `transfer_from`, so
    /// `from` must have approved the vault's address beforehand.
    ///
    /// Returns `(amount_used, share_credited)`.
    pub fn deposit(
        &mut self,
        tokens: &mut TokenLedger,
        asset: Addr,
        from: Addr,
        to: Addr,
        amount: u64,
        share: u64,
    ) -> Result<(u64, u64), VaultError> {
        if (amount == 0) == (share == 0) {
            return Err(VaultError::InvalidRequest);
        }
        let totals = self.totals(asset);
        let (amount_used, share_credited) = if share == 0 {
            (amount, amount_to_share(amount, totals.amount, totals.shares)?)
        } else {
            (share_to_amount(share, totals.amount, totals.shares)?, share)
        };
        // A share-driven request that floors to a zero pull would credit
        // claims for free
        if amount_used == 0 {
            return Err(VaultError::InvalidRequest);
        }

        let new_totals = AssetTotals {
            amount: totals
                .amount
                .checked_add(amount_used)
                .ok_or(VaultError::Overflow)?,
            shares: totals
                .shares
                .checked_add(share_credited)
                .ok_or(VaultError::Overflow)?,
        };
        let new_balance = self
            .balance_of(asset, to)
            .checked_add(share_credited)
            .ok_or(VaultError::Overflow)?;

        // V4: pull custody before any write; a refused transfer leaves the
        // vault untouched
        tokens.transfer_from(self.addr, from, self.addr, amount_used)?;

        self.totals.insert(asset, new_totals);
        if new_balance > 0 {
            self.balances.insert((asset, to), new_balance);
        }
        Ok((amount_used, share_credited))
    }

    /// Record external yield on an asset
    ///
    /// Mints `profit` raw tokens into the vault's custody account and
    /// raises the asset's amount total without creating shares, which is
    /// how strategy profit moves the exchange rate.
    pub fn accrue(
        &mut self,
        tokens: &mut TokenLedger,
        asset: Addr,
        profit: u64,
    ) -> Result<(), VaultError> {
        let totals = self.totals(asset);
        // Yield with no depositors has no one to accrue to
        if totals.shares == 0 {
            return Err(VaultError::InvalidRequest);
        }
        let new_amount = totals
            .amount
            .checked_add(profit)
            .ok_or(VaultError::Overflow)?;
        tokens.mint(self.addr, profit)?;
        self.totals.insert(
            asset,
            AssetTotals {
                amount: new_amount,
                shares: totals.shares,
            },
        );
        Ok(())
    }
}


// ============================================================================
// Kani Formal Verification Proofs
// ============================================================================

#[cfg(kani)]
mod proofs {
    use super::*;

    const BOUND: u64 = 1_000_000_000;

    /// **Proof V1: amount->share->amount never gains value**
    #[kani::proof]
    fn proof_v1_round_trip_loses() {
        let amount: u64 = kani::any();
        let total_amount: u64 = kani::any();
        let total_shares: u64 = kani::any();

        kani::assume(amount <= BOUND);
        kani::assume(total_amount >= 1 && total_amount <= BOUND);
        kani::assume(total_shares >= 1 && total_shares <= BOUND);

        let share = amount_to_share(amount, total_amount, total_shares).unwrap();
        let back = share_to_amount(share, total_amount, total_shares).unwrap();
        assert!(back <= amount);
    }

    /// **Proof V2: empty vault converts 1:1 both ways**
    #[kani::proof]
    fn proof_v2_first_rate_identity() {
        let x: u64 = kani::any();
        assert!(amount_to_share(x, 0, 0).unwrap() == x);
        assert!(share_to_amount(x, 0, 0).unwrap() == x);
    }
}

//! Fungible token ledger
//!
//! One instance per asset: balances, allowances, and the transfer
//! primitives the adapter consumes. Pool share (LP) tokens use the same
//! ledger type as plain assets.
//!
//! # Properties
//! - **T1**: transfer/transfer_from conserve the total supply
//! - **T2**: a refused operation mutates nothing
//! - **T3**: transfer_from spends allowance by exactly the moved amount

use alloc::collections::BTreeMap;
use core::fmt;

use crate::Addr;

/// Error types for token ledger operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Sender balance below the requested amount
    InsufficientBalance,
    /// Spender allowance below the requested amount
    InsufficientAllowance,
    /// Arithmetic overflow on a balance or supply update
    Overflow,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TokenError::InsufficientBalance => "insufficient balance",
            TokenError::InsufficientAllowance => "insufficient allowance",
            TokenError::Overflow => "arithmetic overflow",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for TokenError {}

/// One fungible asset's balance book
///
/// Zero balances and zero allowances are kept out of the maps, so two
/// ledgers that went through different call sequences to the same holdings
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: BTreeMap<Addr, u64>,
    /// (owner, spender) -> remaining allowance
    allowances: BTreeMap<(Addr, Addr), u64>,
    total_supply: u64,
}

impl TokenLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: Addr) -> u64 {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    pub fn allowance(&self, owner: Addr, spender: Addr) -> u64 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Create `amount` new units credited to `to`
    pub fn mint(&mut self, to: Addr, amount: u64) -> Result<(), TokenError> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.total_supply = new_supply;
        self.set_balance(to, new_balance);
        Ok(())
    }

    /// Destroy `amount` units held by `from`
    pub fn burn(&mut self, from: Addr, amount: u64) -> Result<(), TokenError> {
        let new_balance = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance)?;
        // Supply >= any single balance, so this cannot underflow once the
        // balance check passed
        let new_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance)?;
        self.set_balance(from, new_balance);
        self.total_supply = new_supply;
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s balance
    pub fn approve(&mut self, owner: Addr, spender: Addr, amount: u64) {
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Move `amount` from `from` to `to`
    pub fn transfer(&mut self, from: Addr, to: Addr, amount: u64) -> Result<(), TokenError> {
        let new_from = self
            .balance_of(from)
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance)?;
        if from == to {
            return Ok(());
        }
        let new_to = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        self.set_balance(from, new_from);
        self.set_balance(to, new_to);
        Ok(())
    }

    /// Move `amount` from `from` to `to` on `spender`'s authority,
    /// consuming allowance
    pub fn transfer_from(
        &mut self,
        spender: Addr,
        from: Addr,
        to: Addr,
        amount: u64,
    ) -> Result<(), TokenError> {
        let remaining = self
            .allowance(from, spender)
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientAllowance)?;
        // T2: transfer may still refuse on balance; allowance untouched then
        self.transfer(from, to, amount)?;
        self.approve(from, spender, remaining);
        Ok(())
    }

    fn set_balance(&mut self, account: Addr, balance: u64) {
        if balance == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }
}

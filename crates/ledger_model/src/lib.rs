//! Ledger Model - Verified in-memory models of the external ledgers
//!
//! The migration adapter composes three independently-owned ledgers: a
//! fungible token ledger, a shared custody vault, and isolated lending
//! pairs. This crate models each one with exactly its external contract
//! (checked arithmetic, floor-division share conversions, typed errors)
//! so the adapter's composition logic runs on verified bookkeeping.
//!
//! # Design Principles
//! - no_std + alloc; zero dependencies
//! - Compute-then-commit: every mutator derives its new state in full
//!   before writing, so a refused operation leaves the ledger untouched
//! - Floor division everywhere; rounding always favors the ledger

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod addr;
pub mod lending;
pub mod token;
pub mod vault;

pub use addr::{Addr, AddrParseError};
pub use lending::{LendingError, LendingPair};
pub use token::{TokenError, TokenLedger};
pub use vault::{amount_to_share, share_to_amount, AssetTotals, Vault, VaultError};

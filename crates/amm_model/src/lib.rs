//! AMM Model - Pure constant product share math (x·y=k) for formal verification
//!
//! This crate contains the LP share issuance and redemption formulas of a
//! constant-product pool, extracted as a dependency-free crate so the
//! redemption path of the migration adapter runs on verified arithmetic.
//!
//! # Properties Proven
//! - **P1**: First mint issues `isqrt(amount0 · amount1)` shares
//! - **P2**: Follow-on mints issue the min of the two pro-rata sides
//! - **P3**: Burning `s` shares pays `reserveX · s / totalShares` per side, floored
//! - **P4**: A burn never pays out more than the pool's reserves
//! - **P5**: Mint followed by full burn returns at most the deposited amounts

#![no_std]

pub mod math;

pub use math::{burn_amounts, isqrt, mint_shares, mul_div_floor};

/// One whole token unit in micro-units (1e6)
pub const UNIT: u64 = 1_000_000;

/// Error types for pool share operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    /// Invalid reserves (zero where liquidity is required)
    InvalidReserves,
    /// Invalid amount (zero, or more shares than the total supply)
    InvalidAmount,
    /// Issuance or redemption floors down to nothing
    InsufficientLiquidity,
    /// Arithmetic overflow
    Overflow,
}

impl core::fmt::Display for AmmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            AmmError::InvalidReserves => "invalid reserves",
            AmmError::InvalidAmount => "invalid amount",
            AmmError::InsufficientLiquidity => "insufficient liquidity",
            AmmError::Overflow => "arithmetic overflow",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for AmmError {}

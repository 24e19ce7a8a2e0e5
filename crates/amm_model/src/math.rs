//! Constant product share math (x·y=k) - Formally verified
//!
//! All amounts are u64; every product widens to u128 before dividing, so no
//! intermediate can overflow for any pair of u64 inputs.

use crate::AmmError;

/// Integer square root, rounded down.
///
/// Babylonian iteration over u128, defined on the whole input range up to
/// `u128::MAX`. `isqrt(a · b)` for u64 `a`, `b` always fits back into u64
/// since `sqrt(u64::MAX²) == u64::MAX`.
pub fn isqrt(v: u128) -> u128 {
    if v < 2 {
        return v;
    }
    // v / 2 + 1 >= sqrt(v) for every v including u128::MAX, so the descent
    // starts at or above the root
    let mut x = v / 2 + 1;
    let mut y = (x + v / x) / 2;
    while y < x {
        x = y;
        y = (x + v / x) / 2;
    }
    x
}

/// Compute `a · b / d` with floor semantics.
///
/// The product is taken in u128 so it cannot overflow; the quotient must fit
/// back into u64.
///
/// # Returns
/// * `AmmError::InvalidReserves` if `d == 0`
/// * `AmmError::Overflow` if the quotient exceeds `u64::MAX`
pub fn mul_div_floor(a: u64, b: u64, d: u64) -> Result<u64, AmmError> {
    if d == 0 {
        return Err(AmmError::InvalidReserves);
    }
    let wide = (a as u128) * (b as u128);
    let q = wide / (d as u128);
    if q > u64::MAX as u128 {
        return Err(AmmError::Overflow);
    }
    Ok(q as u64)
}

/// Calculate pool shares issued for a liquidity contribution
///
/// - First mint (total supply 0): `shares = isqrt(amount0 · amount1)`
/// - Follow-on mint: `shares = min(amount0 · total / reserve0,
///   amount1 · total / reserve1)`, each side floored
///
/// # Properties
/// - **P1**: first mint is the geometric mean of the contribution
/// - **P2**: follow-on mints never credit more than either side's pro-rata
///
/// # Arguments
/// * `reserve0` / `reserve1` - Current reserves (pre-contribution)
/// * `total_shares` - Current pool share supply
/// * `amount0` / `amount1` - Contributed amounts, both must be nonzero
///
/// # Returns
/// * Shares to credit the provider
/// * `AmmError` on zero contribution, empty reserves with outstanding
///   supply, or a contribution that floors to zero shares
pub fn mint_shares(
    reserve0: u64,
    reserve1: u64,
    total_shares: u64,
    amount0: u64,
    amount1: u64,
) -> Result<u64, AmmError> {
    if amount0 == 0 || amount1 == 0 {
        return Err(AmmError::InvalidAmount);
    }

    let shares = if total_shares == 0 {
        // P1: geometric mean of the seed contribution
        let product = (amount0 as u128) * (amount1 as u128);
        let root = isqrt(product);
        if root > u64::MAX as u128 {
            return Err(AmmError::Overflow);
        }
        root as u64
    } else {
        if reserve0 == 0 || reserve1 == 0 {
            return Err(AmmError::InvalidReserves);
        }
        // P2: min of the two pro-rata sides keeps the price unmoved
        let by_side0 = mul_div_floor(amount0, total_shares, reserve0)?;
        let by_side1 = mul_div_floor(amount1, total_shares, reserve1)?;
        by_side0.min(by_side1)
    };

    if shares == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    Ok(shares)
}

/// Calculate the pro-rata payout for burning pool shares
///
/// `amountX = shares · reserveX / total_shares`, floored per side. Floor
/// division favors the pool: dust below one share's worth stays in the
/// reserves.
///
/// # Properties
/// - **P3**: per-side floor pro-rata
/// - **P4**: `shares <= total_shares` implies `amountX <= reserveX`
///
/// # Arguments
/// * `reserve0` / `reserve1` - Current reserves
/// * `total_shares` - Current pool share supply, must be nonzero
/// * `shares` - Shares being burned
///
/// # Returns
/// * `(amount0, amount1)` owed to the recipient
/// * `AmmError::InvalidReserves` if supply or either reserve is zero
/// * `AmmError::InvalidAmount` if `shares` is zero or exceeds the supply
/// * `AmmError::InsufficientLiquidity` if either side floors to zero
pub fn burn_amounts(
    reserve0: u64,
    reserve1: u64,
    total_shares: u64,
    shares: u64,
) -> Result<(u64, u64), AmmError> {
    if total_shares == 0 || reserve0 == 0 || reserve1 == 0 {
        return Err(AmmError::InvalidReserves);
    }
    if shares == 0 || shares > total_shares {
        return Err(AmmError::InvalidAmount);
    }

    let amount0 = mul_div_floor(shares, reserve0, total_shares)?;
    let amount1 = mul_div_floor(shares, reserve1, total_shares)?;

    if amount0 == 0 || amount1 == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    Ok((amount0, amount1))
}


// ============================================================================
// Kani Formal Verification Proofs
// ============================================================================

#[cfg(kani)]
mod proofs {
    use super::*;

    /// Bound inputs to 1e9 to keep the state space manageable
    const BOUND: u64 = 1_000_000_000;

    /// **Proof P4: Burn payout never exceeds reserves**
    #[kani::proof]
    fn proof_p4_burn_within_reserves() {
        let reserve0: u64 = kani::any();
        let reserve1: u64 = kani::any();
        let total_shares: u64 = kani::any();
        let shares: u64 = kani::any();

        kani::assume(reserve0 >= 1 && reserve0 <= BOUND);
        kani::assume(reserve1 >= 1 && reserve1 <= BOUND);
        kani::assume(total_shares >= 1 && total_shares <= BOUND);
        kani::assume(shares >= 1 && shares <= total_shares);

        if let Ok((amount0, amount1)) = burn_amounts(reserve0, reserve1, total_shares, shares) {
            assert!(amount0 <= reserve0);
            assert!(amount1 <= reserve1);
        }
    }

    /// **Proof P3: Full-supply burn drains both reserves exactly**
    #[kani::proof]
    fn proof_p3_full_burn_exact() {
        let reserve0: u64 = kani::any();
        let reserve1: u64 = kani::any();
        let total_shares: u64 = kani::any();

        kani::assume(reserve0 >= 1 && reserve0 <= BOUND);
        kani::assume(reserve1 >= 1 && reserve1 <= BOUND);
        kani::assume(total_shares >= 1 && total_shares <= BOUND);

        let result = burn_amounts(reserve0, reserve1, total_shares, total_shares);
        if let Ok((amount0, amount1)) = result {
            assert!(amount0 == reserve0);
            assert!(amount1 == reserve1);
        }
    }

    /// **Proof: mul_div_floor floors**
    ///
    /// The quotient times the divisor never exceeds the product.
    #[kani::proof]
    fn proof_mul_div_floors() {
        let a: u64 = kani::any();
        let b: u64 = kani::any();
        let d: u64 = kani::any();

        kani::assume(a <= BOUND && b <= BOUND);
        kani::assume(d >= 1 && d <= BOUND);

        if let Ok(q) = mul_div_floor(a, b, d) {
            let wide = (a as u128) * (b as u128);
            assert!((q as u128) * (d as u128) <= wide);
            assert!(wide - (q as u128) * (d as u128) < d as u128);
        }
    }
}

//! Pair matching - assign lending pairs to pool assets by identity
//!
//! Matching is keyed on asset identity alone, never on argument position:
//! each pool token maps to whichever lending pair is configured for it.
//! Swapping the two arguments yields the same assignment, which is what
//! makes the migration entry point order-independent.

use ledger_model::Addr;

use crate::error::MigrateError;
use crate::state::World;

/// Asset-keyed assignment of two lending pairs to a pool's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairAssignment {
    /// Lending pair whose asset is the pool's `token0`.
    pub pair0: Addr,
    /// Lending pair whose asset is the pool's `token1`.
    pub pair1: Addr,
}

/// Match two lending pairs against a pool's underlying tokens.
///
/// Fails with [`MigrateError::NotFound`] when either pool token has no
/// matching pair, or when both pairs claim the same asset and the
/// assignment would be ambiguous.
pub fn match_pairs(
    world: &World,
    lending_pair_a: Addr,
    lending_pair_b: Addr,
    pool: Addr,
) -> Result<PairAssignment, MigrateError> {
    let (token0, token1) = {
        let p = world.pool(pool)?;
        (p.token0(), p.token1())
    };
    let asset_a = world.lending_pair(lending_pair_a)?.asset();
    let asset_b = world.lending_pair(lending_pair_b)?.asset();

    if asset_a == asset_b {
        return Err(MigrateError::NotFound("both lending pairs claim one asset"));
    }

    let pair0 = if asset_a == token0 {
        lending_pair_a
    } else if asset_b == token0 {
        lending_pair_b
    } else {
        return Err(MigrateError::NotFound("no lending pair for pool token0"));
    };
    let pair1 = if asset_a == token1 {
        lending_pair_a
    } else if asset_b == token1 {
        lending_pair_b
    } else {
        return Err(MigrateError::NotFound("no lending pair for pool token1"));
    };

    Ok(PairAssignment { pair0, pair1 })
}

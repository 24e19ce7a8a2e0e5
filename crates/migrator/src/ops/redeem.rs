//! Pool redemption - unwind an LP position held by the adapter
//!
//! Transfer-then-burn: the adapter moves its whole share balance to the
//! pool's own address, then asks the pool to burn whatever shares it
//! holds, paying both underlyings back to the adapter. The burned amounts
//! stay with the adapter as raw balances for the deposit operations.

use ledger_model::Addr;

use crate::error::MigrateError;
use crate::state::World;

/// Redeem the adapter's full LP balance of `pool` for the underlyings.
///
/// Returns the `(amount0, amount1)` paid out in the pool's canonical
/// token order. A zero balance is a no-op returning `(0, 0)`; the pool's
/// burn primitive is never invoked on an empty balance.
pub fn redeem(
    world: &mut World,
    adapter: Addr,
    pool: Addr,
) -> Result<(u64, u64), MigrateError> {
    world.pool(pool)?; // reference must resolve even for the zero-balance no-op

    let held = world.token(pool)?.balance_of(adapter);
    if held == 0 {
        log::debug!("redeem: pool={} adapter holds no shares, nothing to do", pool);
        return Ok((0, 0));
    }

    world.transfer(pool, adapter, pool, held)?;
    let (amount0, amount1) = world.pool_burn(pool, adapter)?;

    log::debug!(
        "redeem: pool={} burned {} shares for ({}, {})",
        pool,
        held,
        amount0,
        amount1
    );
    Ok((amount0, amount1))
}

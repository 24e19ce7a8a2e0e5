//! Lending bridge - route a drained balance into a lending pair
//!
//! The custody deposit credits the lending pair's own vault account, not
//! the supplier's. The pair then registers those freshly credited shares
//! against its recorded totals and mints lending shares to the supplier.
//! Only the lending shares name the supplier; the vault credit stays with
//! the pair.

use ledger_model::Addr;

use crate::error::MigrateError;
use crate::ops::vault_bridge;
use crate::state::World;

/// Deposit the adapter's entire `asset` balance for `lending_pair`, then
/// register the credited shares as capital supplied by `supplier`.
///
/// Returns the lending shares minted to `supplier`. A zero adapter
/// balance skips the whole flow and returns 0.
pub fn deposit_and_supply(
    world: &mut World,
    adapter: Addr,
    lending_pair: Addr,
    asset: Addr,
    supplier: Addr,
) -> Result<u64, MigrateError> {
    world.lending_pair(lending_pair)?;

    let share = vault_bridge::deposit_all(world, adapter, lending_pair, asset)?;
    if share == 0 {
        log::debug!(
            "deposit_and_supply: pair={} asset={} nothing to supply",
            lending_pair,
            asset
        );
        return Ok(0);
    }

    let minted = world.lending_add_asset(lending_pair, supplier, share)?;
    log::debug!(
        "deposit_and_supply: pair={} asset={} share={} lending_shares={} supplier={}",
        lending_pair,
        asset,
        share,
        minted,
        supplier
    );
    Ok(minted)
}

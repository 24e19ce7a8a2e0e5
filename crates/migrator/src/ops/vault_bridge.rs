//! Vault bridge - custody previews and drain-deposits
//!
//! A deposit always moves the adapter's entire live balance of the asset,
//! read at call time, never a cached figure. The preview reports what that
//! balance would convert to at the vault's current rate without moving
//! anything, so a preview followed immediately by the deposit sees the
//! same numbers.

use ledger_model::Addr;

use crate::error::MigrateError;
use crate::state::World;

/// What depositing an amount into the custody vault would do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositPreview {
    /// The amount itself when the asset is the wrapped native asset,
    /// zero for every other asset.
    pub value: u64,
    /// Raw token amount the deposit would move.
    pub amount: u64,
    /// Vault shares the amount converts to at the current rate, floored.
    pub share: u64,
}

/// Preview converting `amount` of `asset` at the vault's current rate.
pub fn preview_deposit(
    world: &World,
    native_wrapper: Addr,
    asset: Addr,
    amount: u64,
) -> Result<DepositPreview, MigrateError> {
    let share = world.vault().to_share(asset, amount)?;
    let value = if asset == native_wrapper { amount } else { 0 };
    Ok(DepositPreview { value, amount, share })
}

/// Preview depositing the adapter's entire live balance of `asset`.
pub fn amount_to_deposit(
    world: &World,
    native_wrapper: Addr,
    adapter: Addr,
    asset: Addr,
) -> Result<DepositPreview, MigrateError> {
    let amount = world.token(asset)?.balance_of(adapter);
    preview_deposit(world, native_wrapper, asset, amount)
}

/// Deposit the adapter's entire balance of `asset` into the vault,
/// crediting `beneficiary`'s vault account.
///
/// The adapter approves the vault for exactly the amount moved. Returns
/// the share credited; a zero balance is a no-op returning 0.
pub fn deposit_all(
    world: &mut World,
    adapter: Addr,
    beneficiary: Addr,
    asset: Addr,
) -> Result<u64, MigrateError> {
    let amount = world.token(asset)?.balance_of(adapter);
    if amount == 0 {
        return Ok(0);
    }

    let vault_addr = world.vault().addr();
    world.approve(asset, adapter, vault_addr, amount)?;
    let (_, share) = world.vault_deposit(asset, adapter, beneficiary, amount, 0)?;

    log::debug!(
        "deposit_all: asset={} amount={} share={} beneficiary={}",
        asset,
        amount,
        share,
        beneficiary
    );
    Ok(share)
}

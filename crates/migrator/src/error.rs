//! Adapter error type
//!
//! Model-layer errors (`TokenError`, `VaultError`, `LendingError`,
//! `AmmError`) are lifted into [`MigrateError`] at the adapter boundary.
//! Balance and allowance refusals keep their own variants because callers
//! act on them; everything else a collaborator can refuse surfaces as
//! [`MigrateError::External`] with the collaborator's reason.

use amm_model::AmmError;
use ledger_model::{LendingError, TokenError, VaultError};
use thiserror::Error;

/// Error returned by every public adapter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MigrateError {
    /// Provisioning input was rejected before any state changed.
    #[error("configuration error: {0}")]
    Configuration(&'static str),

    /// A referenced entity does not exist, or no valid assignment exists.
    #[error("not found: {0}")]
    NotFound(&'static str),

    /// A token ledger refused a transfer for lack of balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// A token ledger refused a transfer for lack of allowance.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// A collaborator call failed for the collaborator's own reasons.
    #[error("external call failed: {0}")]
    External(&'static str),

    /// A public entry point was invoked while another call was in flight.
    #[error("reentrant call rejected")]
    Reentrancy,
}

impl From<TokenError> for MigrateError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::InsufficientBalance => MigrateError::InsufficientBalance,
            TokenError::InsufficientAllowance => MigrateError::InsufficientAllowance,
            TokenError::Overflow => MigrateError::External("token ledger overflow"),
        }
    }
}

impl From<AmmError> for MigrateError {
    fn from(e: AmmError) -> Self {
        let reason = match e {
            AmmError::InvalidReserves => "pool: invalid reserves",
            AmmError::InvalidAmount => "pool: invalid amount",
            AmmError::InsufficientLiquidity => "pool: insufficient liquidity",
            AmmError::Overflow => "pool: arithmetic overflow",
        };
        MigrateError::External(reason)
    }
}

impl From<VaultError> for MigrateError {
    fn from(e: VaultError) -> Self {
        match e {
            // Vault transfers run on the token ledger; keep the token
            // refusal distinct so callers see balance/allowance directly.
            VaultError::Token(e) => e.into(),
            VaultError::InvalidRequest => MigrateError::External("vault: invalid deposit request"),
            VaultError::InvalidRate => MigrateError::External("vault: undefined exchange rate"),
            VaultError::Overflow => MigrateError::External("vault: arithmetic overflow"),
        }
    }
}

impl From<LendingError> for MigrateError {
    fn from(e: LendingError) -> Self {
        let reason = match e {
            LendingError::SkimShortfall => "lending pair: fewer unrecorded shares than requested",
            LendingError::InvalidRate => "lending pair: undefined supply rate",
            LendingError::Overflow => "lending pair: arithmetic overflow",
        };
        MigrateError::External(reason)
    }
}

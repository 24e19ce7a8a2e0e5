//! LP Migrator - moves constant-product AMM liquidity into a lending vault
//!
//! The adapter holds LP tokens that a wallet has transferred to it. From
//! there it redeems them at the pool for the two underlying assets, turns
//! each raw amount into custody-vault shares, and registers those shares as
//! supplied capital in the lending pair matched to each asset. The two
//! lending-pair references are accepted in either order; matching is keyed
//! by asset identity, never by argument position.
//!
//! Composition, leaves first: token ledgers and the vault come from
//! `ledger_model`, share arithmetic from `amm_model`. On top of those sit
//! the pool redeemer, the vault bridge, the lending bridge, and the pair
//! matcher, with the orchestrator in `ops::migrate` tying them together.
//! Every mutating entry point stages its work on a copy of the world and
//! commits only on success, under a scoped reentrancy guard.

pub mod config;
pub mod error;
pub mod ops;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::MigratorConfig;
pub use error::MigrateError;
pub use ops::matcher::PairAssignment;
pub use ops::migrate::Migrator;
pub use ops::vault_bridge::DepositPreview;
pub use state::pool::{PairFactory, Pool};
pub use state::world::World;

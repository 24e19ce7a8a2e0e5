//! Adapter operations
//!
//! Leaf operations first: [`redeem`] unwinds LP positions, [`vault_bridge`]
//! previews and performs custody deposits, [`lending_bridge`] routes a
//! deposit into a lending pair, [`matcher`] assigns lending pairs to pool
//! assets. [`migrate`] holds the orchestrator with the public entry points.

pub mod lending_bridge;
pub mod matcher;
pub mod migrate;
pub mod redeem;
pub mod vault_bridge;

//! Collaborator state
//!
//! Everything the adapter talks to lives behind an [`Addr`] in one
//! [`World`]: token ledgers, pool factories, pools, the custody vault, and
//! lending pairs.
//!
//! [`Addr`]: ledger_model::Addr
//! [`World`]: world::World

pub mod pool;
pub mod world;

pub use pool::{PairFactory, Pool};
pub use world::World;

//! Adapter configuration
//!
//! The adapter carries one immutable setting: the address of the wrapped
//! native asset. Deposit previews report the `value` field at face value
//! for that one asset and zero for everything else.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ledger_model::Addr;
use serde::Deserialize;

/// Immutable adapter configuration, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigratorConfig {
    /// Wrapped native asset. Previews of this asset report the deposit
    /// amount in the `value` field; every other asset reports zero.
    pub native_wrapper: Addr,
}

/// On-disk form; validated into [`MigratorConfig`] on load.
#[derive(Debug, Deserialize)]
struct RawConfig {
    native_wrapper: String,
}

impl MigratorConfig {
    pub fn new(native_wrapper: Addr) -> Self {
        Self { native_wrapper }
    }

    /// Load configuration from a TOML file.
    ///
    /// Expects a single `native_wrapper = "0x..."` key holding a 32-byte
    /// hex address.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let raw: RawConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        let native_wrapper: Addr = raw
            .native_wrapper
            .parse()
            .with_context(|| format!("Invalid native_wrapper address: {}", raw.native_wrapper))?;

        Ok(Self { native_wrapper })
    }
}

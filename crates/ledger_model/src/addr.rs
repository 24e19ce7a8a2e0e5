//! Ledger entity addresses

use core::fmt;
use core::str::FromStr;

/// Address of a ledger entity (token, pool, factory, vault, lending pair,
/// or plain account)
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub [u8; 32]);

impl Addr {
    /// The all-zero address; used as the "absent" sentinel nowhere, kept
    /// only so tests can name an address no entity was assigned
    pub const ZERO: Self = Self([0u8; 32]);

    /// Deterministic address derived from an allocation index
    pub const fn from_index(i: u64) -> Self {
        let mut bytes = [0u8; 32];
        let le = i.to_le_bytes();
        let mut j = 0;
        while j < 8 {
            bytes[j] = le[j];
            j += 1;
        }
        Self(bytes)
    }
}

impl fmt::Debug for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addr({})", self)
    }
}

impl fmt::Display for Addr {
    /// Short form: leading four bytes as hex
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:02x}{:02x}{:02x}{:02x}..",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Failed to parse an address from its hex form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddrParseError;

impl fmt::Display for AddrParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("address must be 64 hex characters (optional 0x prefix)")
    }
}

impl core::error::Error for AddrParseError {}

impl FromStr for Addr {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != 64 {
            return Err(AddrParseError);
        }
        let mut bytes = [0u8; 32];
        for (i, pair) in hex.as_bytes().chunks_exact(2).enumerate() {
            let hi = nibble(pair[0]).ok_or(AddrParseError)?;
            let lo = nibble(pair[1]).ok_or(AddrParseError)?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

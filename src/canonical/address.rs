//! Chain-aware address canonicalization.
//!
//! Canonical form is `0x` followed by lower-case hex digits. Variable-width
//! chains (Starknet) also drop leading zero digits, so `0x000abc` and `0xabc`
//! name the same account. Fixed-width chains (EVM) keep their padding.

use crate::utils::error::CanonicalError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Addressing scheme of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainKind {
    /// Fixed 20-byte addresses, zero padding is significant
    FixedWidth,
    /// Field-element addresses, leading zeros carry no meaning
    VariableWidth,
}

/// Networks the snapshot tooling knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Network {
    Ethereum,
    Starknet,
    Base,
    Arbitrum,
    /// Starknet Sepolia testnet
    Sepolia,
}

impl Network {
    pub const ALL: [Network; 5] = [
        Network::Ethereum,
        Network::Starknet,
        Network::Base,
        Network::Arbitrum,
        Network::Sepolia,
    ];

    /// Lower-case name, as accepted on the command line
    pub fn name(self) -> &'static str {
        match self {
            Network::Ethereum => "ethereum",
            Network::Starknet => "starknet",
            Network::Base => "base",
            Network::Arbitrum => "arbitrum",
            Network::Sepolia => "sepolia",
        }
    }

    /// Capitalized name written into snapshot documents
    pub fn display_name(self) -> &'static str {
        match self {
            Network::Ethereum => "Ethereum",
            Network::Starknet => "Starknet",
            Network::Base => "Base",
            Network::Arbitrum => "Arbitrum",
            Network::Sepolia => "Sepolia",
        }
    }

    /// Hex chain id
    pub fn chain_id(self) -> &'static str {
        match self {
            Network::Ethereum => "0x1",
            Network::Starknet => "0x534e5f4d41494e",
            Network::Base => "0x2105",
            Network::Arbitrum => "0xa4b1",
            Network::Sepolia => "0x534e5f5345504f4c4941",
        }
    }

    pub fn chain_kind(self) -> ChainKind {
        match self {
            Network::Starknet | Network::Sepolia => ChainKind::VariableWidth,
            Network::Ethereum | Network::Base | Network::Arbitrum => ChainKind::FixedWidth,
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Network> {
        let name = name.trim();
        Network::ALL
            .into_iter()
            .find(|network| network.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized holder address, usable as a map key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalAddress(String);

impl CanonicalAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CanonicalAddress {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonicalize a raw address for the given chain kind
///
/// **Public** - main entry point for address normalization
///
/// # Errors
/// * `CanonicalError::InvalidAddress` - the digits after the prefix are not all hex,
///   or a fixed-width address has no digits at all
pub fn canonicalize(raw: &str, kind: ChainKind) -> Result<CanonicalAddress, CanonicalError> {
    let trimmed = raw.trim();
    let digits = strip_hex_prefix(trimmed);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CanonicalError::InvalidAddress(raw.to_string()));
    }

    let digits = digits.to_ascii_lowercase();

    let canonical = match kind {
        ChainKind::FixedWidth if digits.is_empty() => {
            return Err(CanonicalError::InvalidAddress(raw.to_string()))
        }
        ChainKind::FixedWidth => format!("0x{}", digits),
        ChainKind::VariableWidth => {
            let stripped = digits.trim_start_matches('0');
            if stripped.is_empty() {
                "0x0".to_string()
            } else {
                format!("0x{}", stripped)
            }
        }
    };

    Ok(CanonicalAddress(canonical))
}

/// Remove a `0x`/`0X` prefix if present
pub(crate) fn strip_hex_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

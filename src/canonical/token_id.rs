//! Token identifier codec.
//!
//! Token ids arrive as JSON integers, decimal strings or `0x` hex strings.
//! Internally they are 256-bit unsigned integers; the canonical textual
//! form is minimal lower-case hex with a `0x` prefix.

use super::address::strip_hex_prefix;
use crate::utils::error::CanonicalError;
use alloy_primitives::U256;
use std::fmt;

/// Token id as it appeared in an API record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTokenId {
    Integer(i128),
    Text(String),
}

impl RawTokenId {
    /// Read a token id out of a JSON value
    ///
    /// Returns `None` for nulls, empty strings and non-scalar values, which
    /// callers treat as a missing field.
    pub fn from_json(value: &serde_json::Value) -> Option<RawTokenId> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Some(RawTokenId::Integer(i128::from(v)))
                } else if let Some(v) = n.as_i64() {
                    Some(RawTokenId::Integer(i128::from(v)))
                } else {
                    // floats are kept as text so they fail validation
                    Some(RawTokenId::Text(n.to_string()))
                }
            }
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                Some(RawTokenId::Text(s.clone()))
            }
            _ => None,
        }
    }
}

impl From<u64> for RawTokenId {
    fn from(value: u64) -> Self {
        RawTokenId::Integer(i128::from(value))
    }
}

impl From<&str> for RawTokenId {
    fn from(value: &str) -> Self {
        RawTokenId::Text(value.to_string())
    }
}

/// Internal token id representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenId(U256);

impl TokenId {
    pub const ZERO: TokenId = TokenId(U256::ZERO);

    pub fn value(&self) -> U256 {
        self.0
    }

    /// The id as `u64`, if it fits
    pub fn to_u64(&self) -> Option<u64> {
        if self.0.bit_len() <= 64 {
            Some(self.0.as_limbs()[0])
        } else {
            None
        }
    }

    /// Canonical hex form (see [`to_hex`])
    pub fn to_hex(&self) -> String {
        to_hex(*self)
    }
}

impl From<u64> for TokenId {
    fn from(value: u64) -> Self {
        TokenId(U256::from(value))
    }
}

impl From<U256> for TokenId {
    fn from(value: U256) -> Self {
        TokenId(value)
    }
}

/// Decimal display
impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a raw token id to its internal integer
///
/// **Public** - main entry point for token id parsing
///
/// # Errors
/// * `CanonicalError::InvalidTokenId` - negative, empty, non-numeric or wider than 256 bits
pub fn to_internal(raw: &RawTokenId) -> Result<TokenId, CanonicalError> {
    match raw {
        RawTokenId::Integer(v) => u128::try_from(*v)
            .map(|v| TokenId(U256::from(v)))
            .map_err(|_| CanonicalError::InvalidTokenId(v.to_string())),
        RawTokenId::Text(text) => parse_token_text(text),
    }
}

/// Parse a textual token id (decimal or `0x` hex)
pub fn parse_token_text(text: &str) -> Result<TokenId, CanonicalError> {
    let invalid = || CanonicalError::InvalidTokenId(text.to_string());
    let trimmed = text.trim();

    let (digits, radix) = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        (strip_hex_prefix(trimmed), 16)
    } else {
        (trimmed, 10)
    };

    let valid = !digits.is_empty()
        && digits.chars().all(|c| {
            if radix == 16 {
                c.is_ascii_hexdigit()
            } else {
                c.is_ascii_digit()
            }
        });
    if !valid {
        return Err(invalid());
    }

    U256::from_str_radix(digits, radix)
        .map(TokenId)
        .map_err(|_| invalid())
}

/// Encode a token id as minimal lower-case `0x` hex
pub fn to_hex(id: TokenId) -> String {
    if id.0.is_zero() {
        "0x0".to_string()
    } else {
        format!("0x{:x}", id.0)
    }
}

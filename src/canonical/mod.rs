//! Canonical forms for holder addresses and token ids.

pub mod address;
pub mod token_id;

pub use address::{canonicalize, CanonicalAddress, ChainKind, Network};
pub use token_id::{parse_token_text, to_hex, to_internal, RawTokenId, TokenId};

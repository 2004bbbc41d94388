//! Access to the NFT indexing API.

pub mod client;
pub mod types;

pub use client::{Fetch, HttpFetcher};
pub use types::{normalize_page, NftPage};

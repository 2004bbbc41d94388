//! Snapshot document assembly and validation.

pub mod builder;
pub mod schema;
pub mod validate;

pub use builder::{build, chain_id_for};
pub use schema::{SnapshotDocument, SnapshotEntry, SnapshotMetadata};
pub use validate::validate_document;

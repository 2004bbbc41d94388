//! Output writers for snapshots, analytics and token id lists.
//!
//! This module handles writing data to disk in various formats:
//! - JSON snapshot and analytics documents
//! - Token id lists (txt, json, csv)
//! - Text reports and Lorenz curve CSV

pub mod json;
pub mod report;
pub mod token_ids;

// Re-export main functions
pub use json::{read_snapshot, snapshot_to_string, write_analytics, write_snapshot};
pub use report::{render_report, write_lorenz_csv, write_report};
pub use token_ids::{render_token_ids, write_token_ids, TokenIdFormat};

//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod holders;
pub mod import;
pub mod token_ids;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, AnalyzeArgs};
pub use holders::{default_output_path, execute_holders, run_holders, HoldersArgs, HoldersReport};
pub use import::{execute_import, ImportArgs, ImportReport};
pub use token_ids::{execute_token_ids, run_token_ids, TokenIdsArgs, TokenIdsReport};
pub use utils::{display_networks, display_version, validate_snapshot_file, SourceArgs};

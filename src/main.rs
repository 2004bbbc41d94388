//! Holder Snapshot CLI
//!
//! Builds NFT holder snapshots from an indexing API and analyzes token
//! distributions.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use holder_snapshot::canonical::Network;
use holder_snapshot::commands::{
    analyze, default_output_path, display_networks, display_version, execute_analyze,
    execute_holders, execute_import, execute_token_ids, holders, import, token_ids,
    validate_snapshot_file, AnalyzeArgs, HoldersArgs, ImportArgs, SourceArgs, TokenIdsArgs,
};
use holder_snapshot::output::TokenIdFormat;
use holder_snapshot::utils::config::{
    DEFAULT_DELAY_MS, DEFAULT_PAGE_SIZE, DEFAULT_TOP_HOLDERS,
};

/// Holder Snapshot - NFT holder snapshots and distribution statistics
#[derive(Parser, Debug)]
#[command(name = "holder-snapshot")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where and how to page through a collection
#[derive(Args, Debug)]
struct SourceOpts {
    /// NFT collection contract address
    #[arg(short, long)]
    contract_address: String,

    /// Indexing API endpoint (getCollectionNFTs)
    #[arg(long, env = "BLAST_API_URL")]
    api_url: String,

    /// First token id to include (decimal or 0x hex)
    #[arg(long)]
    start_token_id: Option<String>,

    /// Last token id to include (decimal or 0x hex)
    #[arg(long)]
    end_token_id: Option<String>,

    /// Items per page (max 100)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Delay between page requests in milliseconds
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Resume from a page key printed by an interrupted run
    #[arg(long)]
    resume_page_key: Option<String>,
}

impl From<SourceOpts> for SourceArgs {
    fn from(opts: SourceOpts) -> Self {
        SourceArgs {
            api_url: opts.api_url,
            contract_address: opts.contract_address,
            start_token_id: opts.start_token_id,
            end_token_id: opts.end_token_id,
            page_size: opts.page_size,
            delay_ms: opts.delay_ms,
            resume_page_key: opts.resume_page_key,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect holders and write a snapshot document
    Holders {
        #[command(flatten)]
        source: SourceOpts,

        /// Collection name
        #[arg(short, long)]
        name: String,

        /// Network the collection lives on
        #[arg(long, value_enum, default_value_t = Network::Starknet)]
        network: Network,

        /// Output path (default: {name}_snapshot_{network}.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Snapshot description (default: "{name} snapshot")
        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        block_height: Option<u64>,

        /// Claim contract address
        #[arg(long)]
        claim_contract: Option<String>,
    },

    /// Collect all token ids of a collection
    TokenIds {
        #[command(flatten)]
        source: SourceOpts,

        /// Output path
        #[arg(short, long, default_value = "token_ids.txt")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = TokenIdFormat::Txt)]
        format: TokenIdFormat,
    },

    /// Build a snapshot from a CSV address list
    Import {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the snapshot JSON
        #[arg(short, long)]
        output: PathBuf,

        /// Snapshot name
        #[arg(short, long)]
        name: String,

        /// Network of the addresses in the list
        #[arg(long, value_enum, default_value_t = Network::Sepolia)]
        network: Network,

        #[arg(long)]
        description: Option<String>,

        /// Column holding wallet addresses
        #[arg(long, default_value = "starknetWalletAddress")]
        address_column: String,

        /// Column holding each row's network
        #[arg(long)]
        network_column: Option<String>,

        /// Keep only rows whose network column equals this value
        #[arg(long)]
        network_filter: Option<String>,

        #[arg(long)]
        contract_address: Option<String>,

        #[arg(long)]
        claim_contract: Option<String>,

        #[arg(long)]
        block_height: Option<u64>,
    },

    /// Analyze a token balance distribution
    Analyze {
        /// Balances CSV with `address` and `amount` columns
        #[arg(short, long)]
        balances: PathBuf,

        /// Output path for analytics JSON
        #[arg(short, long, default_value = "distribution_analytics.json")]
        output: PathBuf,

        /// Output path for a text report (optional)
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Output path for Lorenz curve CSV (optional)
        #[arg(long)]
        lorenz: Option<PathBuf>,

        /// Bucket lower bounds, e.g. "0,5,10,20"
        #[arg(long)]
        buckets: Option<String>,

        /// Number of top holders to include
        #[arg(long, default_value_t = DEFAULT_TOP_HOLDERS)]
        top: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a snapshot JSON file
    Validate {
        /// Path to snapshot JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List supported networks
    Networks,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Holders {
            source,
            name,
            network,
            output,
            description,
            block_height,
            claim_contract,
        } => {
            let output = output.unwrap_or_else(|| default_output_path(&name, network));

            let args = HoldersArgs {
                source: source.into(),
                name,
                network,
                output,
                description,
                block_height,
                claim_contract,
            };

            holders::validate_args(&args)?;
            let report = execute_holders(&args)?;

            if let Some(key) = report.resume_page_key {
                eprintln!(
                    "Collection stopped early after {} pages; resume with --resume-page-key {}",
                    report.pages, key
                );
            }
        }

        Commands::TokenIds {
            source,
            output,
            format,
        } => {
            let args = TokenIdsArgs {
                source: source.into(),
                output,
                format,
            };

            token_ids::validate_args(&args)?;
            let report = execute_token_ids(&args)?;

            if let Some(key) = report.resume_page_key {
                eprintln!(
                    "Collection stopped early after {} pages; resume with --resume-page-key {}",
                    report.pages, key
                );
            }
        }

        Commands::Import {
            input,
            output,
            name,
            network,
            description,
            address_column,
            network_column,
            network_filter,
            contract_address,
            claim_contract,
            block_height,
        } => {
            let args = ImportArgs {
                input,
                output,
                name,
                network,
                description,
                address_column,
                network_column,
                network_filter,
                contract_address,
                claim_contract,
                block_height,
            };

            import::validate_args(&args)?;
            execute_import(&args)?;
        }

        Commands::Analyze {
            balances,
            output,
            report,
            lorenz,
            buckets,
            top,
            summary,
        } => {
            let args = AnalyzeArgs {
                balances,
                output,
                report,
                lorenz,
                buckets,
                top,
                print_summary: summary,
            };

            analyze::validate_args(&args)?;
            execute_analyze(&args)?;
        }

        Commands::Validate { file } => {
            validate_snapshot_file(&file)?;
        }

        Commands::Networks => {
            display_networks();
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

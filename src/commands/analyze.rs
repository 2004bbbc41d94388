//! Analyze command implementation.
//!
//! Reads a balances table, computes the distribution summary, and writes
//! analytics JSON plus an optional text report and Lorenz curve CSV.

use crate::input::read_balances;
use crate::output::{render_report, write_analytics, write_lorenz_csv, write_report};
use crate::stats::{analyze, lorenz_curve, parse_boundaries, BucketTable, DistributionSummary};
use crate::utils::config::{DEFAULT_BUCKET_BOUNDARIES, DEFAULT_TOP_HOLDERS};
use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

/// Arguments for the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Balances CSV with `address` and `amount` columns
    pub balances: PathBuf,

    /// Output path for the analytics JSON
    pub output: PathBuf,

    /// Optional text report path
    pub report: Option<PathBuf>,

    /// Optional Lorenz curve CSV path
    pub lorenz: Option<PathBuf>,

    /// Comma-separated bucket lower bounds, e.g. "0,5,10,20"
    pub buckets: Option<String>,

    pub top: usize,

    /// Print the text report to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            balances: PathBuf::from("balances.csv"),
            output: PathBuf::from("distribution_analytics.json"),
            report: None,
            lorenz: None,
            buckets: None,
            top: DEFAULT_TOP_HOLDERS,
            print_summary: false,
        }
    }
}

pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !args.balances.exists() {
        anyhow::bail!("Balances file not found: {}", args.balances.display());
    }

    if let Some(buckets) = &args.buckets {
        let boundaries = parse_boundaries(buckets).context("Invalid --buckets")?;
        BucketTable::new(&boundaries).context("Invalid --buckets")?;
    }

    Ok(())
}

/// Bucket boundaries from the CLI override or the defaults
fn boundaries(args: &AnalyzeArgs) -> Result<Vec<u64>> {
    match &args.buckets {
        Some(list) => Ok(parse_boundaries(list)?),
        None => Ok(DEFAULT_BUCKET_BOUNDARIES.to_vec()),
    }
}

/// Execute the analyze command
///
/// # Errors
/// * Balances cannot be read, or the file has no rows
/// * Invalid bucket boundaries
/// * Output write failure
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<DistributionSummary> {
    info!("Step 1: Reading balances from {}", args.balances.display());
    let balances = read_balances(&args.balances)
        .with_context(|| format!("Failed to read {}", args.balances.display()))?;

    if balances.is_empty() {
        anyhow::bail!("No balances found in {}", args.balances.display());
    }
    info!("Loaded {} holders", balances.len());

    info!("Step 2: Computing distribution statistics");
    let summary = analyze(&balances, &boundaries(args)?, args.top)
        .context("Failed to analyze distribution")?;

    info!("Step 3: Writing outputs");
    write_analytics(&summary, &args.output).context("Failed to write analytics JSON")?;
    info!("✓ Analytics written to: {}", args.output.display());

    if let Some(report_path) = &args.report {
        write_report(&summary, report_path).context("Failed to write report")?;
        info!("✓ Report written to: {}", report_path.display());
    }

    if let Some(lorenz_path) = &args.lorenz {
        let mut amounts: Vec<u64> = balances.iter().map(|b| b.amount).collect();
        amounts.sort_unstable();
        write_lorenz_csv(&lorenz_curve(&amounts), lorenz_path)
            .context("Failed to write Lorenz curve")?;
        info!("✓ Lorenz curve written to: {}", lorenz_path.display());
    }

    if args.print_summary {
        print!("{}", render_report(&summary));
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_analyze_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let balances = dir.path().join("balances.csv");
        fs::write(&balances, "address,amount\n0xa,1\n0xb,3\n0xc,12\n").unwrap();

        let args = AnalyzeArgs {
            balances,
            output: dir.path().join("analytics.json"),
            report: Some(dir.path().join("report.txt")),
            lorenz: Some(dir.path().join("lorenz.csv")),
            buckets: Some("0,5,10".to_string()),
            top: 2,
            print_summary: false,
        };
        validate_args(&args).unwrap();
        let summary = execute_analyze(&args).unwrap();

        assert_eq!(summary.total_holders, 3);
        assert_eq!(summary.top_holders.len(), 2);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&args.output).unwrap()).unwrap();
        assert_eq!(json["totalTokensDistributed"], 16);
        assert_eq!(json["distributionBuckets"][2]["range"], "10+");

        assert!(fs::read_to_string(dir.path().join("report.txt"))
            .unwrap()
            .contains("Total Holders: 3"));
        assert_eq!(
            fs::read_to_string(dir.path().join("lorenz.csv"))
                .unwrap()
                .lines()
                .count(),
            5
        );
    }

    #[test]
    fn test_analyze_rejects_empty_balances() {
        let dir = tempfile::tempdir().unwrap();
        let balances = dir.path().join("balances.csv");
        fs::write(&balances, "address,amount\n").unwrap();

        let args = AnalyzeArgs {
            balances,
            output: dir.path().join("analytics.json"),
            ..AnalyzeArgs::default()
        };
        assert!(execute_analyze(&args).is_err());
        assert!(!args.output.exists());
    }

    #[test]
    fn test_invalid_buckets_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let balances = dir.path().join("balances.csv");
        fs::write(&balances, "address,amount\n0xa,1\n").unwrap();

        let args = AnalyzeArgs {
            balances,
            buckets: Some("0,x".to_string()),
            ..AnalyzeArgs::default()
        };
        assert!(validate_args(&args).is_err());
    }
}

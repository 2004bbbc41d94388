//! Plain-text distribution report and Lorenz curve export.

use super::json::create_output;
use crate::stats::{DistributionSummary, LorenzPoint};
use crate::utils::config::REPORT_TOP_HOLDERS;
use crate::utils::error::OutputError;
use log::info;
use std::io::Write;
use std::path::Path;

/// Render the human-readable summary report
pub fn render_report(summary: &DistributionSummary) -> String {
    let p = &summary.percentiles;

    let mut report = format!(
        "\nToken Distribution Analysis Report\n\
         =================================\n\
         \n\
         Overall Statistics:\n\
         ------------------\n\
         Total Holders: {}\n\
         Total Tokens Distributed: {}\n\
         Average Tokens per Holder: {:.2}\n\
         Median Tokens per Holder: {}\n\
         Standard Deviation: {:.2}\n\
         Min/Max: {} / {}\n\
         Gini Coefficient: {:.3}\n\
         \n\
         Percentiles:\n\
         -----------\n\
         10th percentile: {}\n\
         25th percentile: {}\n\
         50th percentile (median): {}\n\
         75th percentile: {}\n\
         90th percentile: {}\n\
         95th percentile: {}\n\
         99th percentile: {}\n\
         \n\
         Distribution by Range:\n\
         ---------------------\n",
        summary.total_holders,
        summary.total_tokens_distributed,
        summary.average_tokens_per_holder,
        summary.median_tokens_per_holder,
        summary.standard_deviation,
        summary.min,
        summary.max,
        summary.gini_coefficient,
        p.p10,
        p.p25,
        p.p50,
        p.p75,
        p.p90,
        p.p95,
        p.p99,
    );

    for bucket in &summary.distribution_buckets {
        let pct_holders = share(bucket.count as f64, summary.total_holders as f64);
        let pct_tokens = share(
            bucket.total_tokens as f64,
            summary.total_tokens_distributed as f64,
        );
        report.push_str(&format!(
            "{:>10}: {:>6} holders ({:>5.1}%) - {:>8} tokens ({:>5.1}%)\n",
            bucket.range, bucket.count, pct_holders, bucket.total_tokens, pct_tokens
        ));
    }

    report.push_str(&format!(
        "\nTop {} Token Holders:\n--------------------\n",
        REPORT_TOP_HOLDERS
    ));

    for (i, holder) in summary
        .top_holders
        .iter()
        .take(REPORT_TOP_HOLDERS)
        .enumerate()
    {
        report.push_str(&format!(
            "{:>2}. {} - {} tokens\n",
            i + 1,
            holder.address,
            holder.amount
        ));
    }

    report
}

/// Write the text report to a file
pub fn write_report(
    summary: &DistributionSummary,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing report to: {}", output_path.display());

    let mut writer = create_output(output_path)?;
    writer.write_all(render_report(summary).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write Lorenz curve points as `holders_pct,tokens_pct` rows
pub fn write_lorenz_csv(
    points: &[LorenzPoint],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!(
        "Writing {} Lorenz points to: {}",
        points.len(),
        output_path.display()
    );

    let mut writer = create_output(output_path)?;
    writeln!(writer, "holders_pct,tokens_pct")?;
    for point in points {
        writeln!(writer, "{:.6},{:.6}", point.holders_pct, point.tokens_pct)?;
    }
    writer.flush()?;
    Ok(())
}

/// Percentage of `part` in `whole`, 0 when `whole` is 0
fn share(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

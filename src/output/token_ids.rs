//! Token id list writer (txt, json or csv).

use super::json::create_output;
use crate::canonical::TokenId;
use crate::utils::config::CSV_IDS_PER_LINE;
use crate::utils::error::OutputError;
use chrono::{DateTime, Local};
use clap::ValueEnum;
use log::info;
use std::io::Write;
use std::path::Path;

/// Output format for token id lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TokenIdFormat {
    /// Commented header, one decimal id per line
    #[default]
    Txt,
    /// JSON array of ids
    Json,
    /// Comma-separated decimal ids, 100 per line
    Csv,
}

/// Write sorted, unique token ids to `output_path`
pub fn write_token_ids(
    ids: &[TokenId],
    output_path: impl AsRef<Path>,
    format: TokenIdFormat,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!(
        "Writing {} token ids to {} ({:?})",
        ids.len(),
        output_path.display(),
        format
    );

    let content = render_token_ids(ids, format, Local::now())?;
    let mut writer = create_output(output_path)?;
    writer.write_all(content.as_bytes())?;
    writer.flush()?;

    Ok(())
}

/// Render the id list in the requested format
pub fn render_token_ids(
    ids: &[TokenId],
    format: TokenIdFormat,
    generated_at: DateTime<Local>,
) -> Result<String, OutputError> {
    let mut out = String::new();

    match format {
        TokenIdFormat::Txt => {
            out.push_str("# Token IDs for NFT collection\n");
            out.push_str(&format!("# Total: {} tokens\n", ids.len()));
            out.push_str(&format!(
                "# Generated on: {}\n\n",
                generated_at.format("%Y-%m-%d %H:%M:%S")
            ));
            for id in ids {
                out.push_str(&id.to_string());
                out.push('\n');
            }
        }
        TokenIdFormat::Json => {
            // ids beyond u64 cannot be JSON numbers without losing precision
            let values: Vec<serde_json::Value> = ids
                .iter()
                .map(|id| match id.to_u64() {
                    Some(small) => serde_json::Value::from(small),
                    None => serde_json::Value::String(id.to_string()),
                })
                .collect();
            out = serde_json::to_string_pretty(&values)?;
            out.push('\n');
        }
        TokenIdFormat::Csv => {
            for chunk in ids.chunks(CSV_IDS_PER_LINE) {
                let line: Vec<String> = chunk.iter().map(TokenId::to_string).collect();
                out.push_str(&line.join(","));
                out.push('\n');
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ids(values: impl IntoIterator<Item = u64>) -> Vec<TokenId> {
        values.into_iter().map(TokenId::from).collect()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn test_txt_format() {
        let text = render_token_ids(&ids([1, 2, 30]), TokenIdFormat::Txt, fixed_time()).unwrap();
        assert_eq!(
            text,
            "# Token IDs for NFT collection\n# Total: 3 tokens\n# Generated on: 2024-01-02 03:04:05\n\n1\n2\n30\n"
        );
    }

    #[test]
    fn test_json_format() {
        let text = render_token_ids(&ids([5, 6]), TokenIdFormat::Json, fixed_time()).unwrap();
        let parsed: Vec<u64> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, vec![5, 6]);
    }

    #[test]
    fn test_csv_wraps_lines() {
        let text = render_token_ids(&ids(0..250), TokenIdFormat::Csv, fixed_time()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(',').count(), 100);
        assert_eq!(lines[2].split(',').count(), 50);
        assert!(lines[2].ends_with("249"));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.csv");
        write_token_ids(&ids([3, 4]), &path, TokenIdFormat::Csv).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "3,4\n");
    }
}

//! JSON output writer.
//!
//! Writes snapshot and analytics documents to JSON files with proper formatting.

use crate::snapshot::SnapshotDocument;
use crate::stats::DistributionSummary;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a snapshot document to a JSON file
///
/// **Public** - main entry point for snapshot output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_snapshot(
    snapshot: &SnapshotDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_json(snapshot, output_path.as_ref())
}

/// Pretty JSON text of a snapshot, without the trailing newline `write_snapshot` adds
pub fn snapshot_to_string(snapshot: &SnapshotDocument) -> Result<String, OutputError> {
    serde_json::to_string_pretty(snapshot).map_err(OutputError::SerializationFailed)
}

/// Read a snapshot document from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_snapshot(input_path: impl AsRef<Path>) -> Result<SnapshotDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading snapshot from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let snapshot: SnapshotDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Snapshot loaded: {} on {}, {} holders",
        snapshot.name,
        snapshot.network,
        snapshot.holder_count()
    );

    Ok(snapshot)
}

/// Write the analytics document to a JSON file
pub fn write_analytics(
    summary: &DistributionSummary,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_json(summary, output_path.as_ref())
}

/// Serialize `value` as pretty JSON to `output_path`
pub(crate) fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    info!("Writing JSON to: {}", output_path.display());

    let mut writer = create_output(output_path)?;

    serde_json::to_writer_pretty(&mut writer, value).map_err(OutputError::SerializationFailed)?;
    writeln!(writer)?;
    writer.flush()?;

    info!(
        "Written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Validate the path, create parent directories and open the file
pub(crate) fn create_output(output_path: &Path) -> Result<BufWriter<File>, OutputError> {
    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    Ok(BufWriter::new(file))
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

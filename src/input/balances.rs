//! Balances table reader.

use super::table::Table;
use crate::stats::BalanceRecord;
use crate::utils::error::InputError;
use log::{debug, info};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read a balances table with `address` and `amount` columns
pub fn read_balances(path: impl AsRef<Path>) -> Result<Vec<BalanceRecord>, InputError> {
    let path = path.as_ref();
    debug!("Reading balances from: {}", path.display());

    let file = File::open(path)?;
    let balances = parse_balances(BufReader::new(file))?;

    info!("Loaded {} balances from {}", balances.len(), path.display());
    Ok(balances)
}

/// Parse balances from any reader
///
/// # Errors
/// * `InputError::MissingColumn` - no `address` or `amount` column
/// * `InputError::MalformedRow` - short row, empty address, or non-integer amount
/// * `InputError::DuplicateAddress` - two rows for the same address
pub fn parse_balances(reader: impl BufRead) -> Result<Vec<BalanceRecord>, InputError> {
    let table = Table::read(reader)?;
    let address_col = table.column("address")?;
    let amount_col = table.column("amount")?;

    let mut seen = HashSet::new();
    let mut balances = Vec::with_capacity(table.rows.len());

    for (line, fields) in &table.rows {
        let malformed = |message: String| InputError::MalformedRow {
            line: *line,
            message,
        };

        let (Some(address), Some(amount)) = (fields.get(address_col), fields.get(amount_col))
        else {
            return Err(malformed(format!(
                "expected at least {} fields, found {}",
                address_col.max(amount_col) + 1,
                fields.len()
            )));
        };

        if address.is_empty() {
            return Err(malformed("empty address".to_string()));
        }

        let amount: u64 = amount
            .parse()
            .map_err(|_| malformed(format!("amount '{}' is not a non-negative integer", amount)))?;

        if !seen.insert(address.clone()) {
            return Err(InputError::DuplicateAddress(address.clone()));
        }

        balances.push(BalanceRecord::new(address.clone(), amount));
    }

    Ok(balances)
}

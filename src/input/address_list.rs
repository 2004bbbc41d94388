//! Address list reader for hand-collected allow lists.
//!
//! Rows can be filtered on a network column; empty addresses are dropped and
//! repeated addresses keep only their first occurrence.

use super::table::Table;
use crate::utils::error::InputError;
use std::collections::{BTreeMap, HashSet};
use std::io::BufRead;

/// Which columns to read and which rows to keep
#[derive(Debug, Clone)]
pub struct AddressListOptions {
    pub address_column: String,
    pub network_column: Option<String>,
    /// Keep only rows whose network column equals this (case-insensitive)
    pub network_filter: Option<String>,
}

/// Addresses kept plus counts for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressList {
    /// Unique addresses in first-seen order
    pub addresses: Vec<String>,
    pub total_rows: usize,
    pub empty_addresses: usize,
    pub filtered_out: usize,
    pub duplicates: usize,
    /// Row count per network value, when a network column is configured
    pub rows_by_network: BTreeMap<String, usize>,
}

pub fn parse_address_list(
    reader: impl BufRead,
    options: &AddressListOptions,
) -> Result<AddressList, InputError> {
    let table = Table::read(reader)?;
    let address_col = table.column(&options.address_column)?;
    let network_col = options
        .network_column
        .as_deref()
        .map(|name| table.column(name))
        .transpose()?;

    let mut list = AddressList::default();
    let mut seen = HashSet::new();

    for (_, fields) in &table.rows {
        list.total_rows += 1;

        let network = network_col.and_then(|col| fields.get(col)).map(String::as_str);
        if network_col.is_some() {
            *list
                .rows_by_network
                .entry(network.unwrap_or_default().to_string())
                .or_default() += 1;
        }

        let address = fields.get(address_col).map(String::as_str).unwrap_or_default();
        if address.is_empty() {
            list.empty_addresses += 1;
            continue;
        }

        if let Some(filter) = &options.network_filter {
            if !network.is_some_and(|n| n.eq_ignore_ascii_case(filter)) {
                list.filtered_out += 1;
                continue;
            }
        }

        if seen.insert(address.to_string()) {
            list.addresses.push(address.to_string());
        } else {
            list.duplicates += 1;
        }
    }

    Ok(list)
}

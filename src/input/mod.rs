//! Readers for tabular input files.

pub mod address_list;
pub mod balances;
pub mod table;

pub use address_list::{parse_address_list, AddressList, AddressListOptions};
pub use balances::{parse_balances, read_balances};
pub use table::Table;

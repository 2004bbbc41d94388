//! Minimal comma-separated table reader.
//!
//! Handles a header row, double-quoted fields (with `""` escapes and
//! embedded newlines), a leading UTF-8 byte order mark, blank lines and `#`
//! comment lines. Good enough for exported balance sheets and address lists.

use crate::utils::error::InputError;
use std::io::BufRead;

/// A parsed table: header names plus data rows with their line numbers
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

impl Table {
    pub fn read(reader: impl BufRead) -> Result<Self, InputError> {
        let mut table = Table::default();
        // Start line and text of a record whose quoted field spans lines
        let mut pending: Option<(usize, String)> = None;

        for (index, line) in reader.lines().enumerate() {
            let mut line = line?;
            if index == 0 {
                if let Some(stripped) = line.strip_prefix('\u{feff}') {
                    line = stripped.to_string();
                }
            }

            let (start, record) = match pending.take() {
                Some((start, mut record)) => {
                    record.push('\n');
                    record.push_str(&line);
                    (start, record)
                }
                None => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    (index + 1, trimmed.to_string())
                }
            };

            if has_open_quote(&record) {
                pending = Some((start, record));
                continue;
            }

            let fields = split_row(record.trim()).map_err(|message| InputError::MalformedRow {
                line: start,
                message,
            })?;
            table.push(start, fields);
        }

        if let Some((start, _)) = pending {
            return Err(InputError::MalformedRow {
                line: start,
                message: "unterminated quoted field".to_string(),
            });
        }

        Ok(table)
    }

    fn push(&mut self, line: usize, fields: Vec<String>) {
        if self.headers.is_empty() {
            self.headers = fields;
        } else {
            self.rows.push((line, fields));
        }
    }

    /// Index of a column, matched case-insensitively
    pub fn column(&self, name: &str) -> Result<usize, InputError> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .ok_or_else(|| InputError::MissingColumn(name.to_string()))
    }
}

/// An odd number of quotes leaves a field open; `""` escapes count twice
fn has_open_quote(record: &str) -> bool {
    record.matches('"').count() % 2 == 1
}

/// Split one CSV record into trimmed fields
pub fn split_row(line: &str) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            other => current.push(other),
        }
    }

    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }

    fields.push(current.trim().to_string());
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("a, b ,c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_row("\"x,y\",z").unwrap(), vec!["x,y", "z"]);
        assert_eq!(split_row("\"say \"\"hi\"\"\"").unwrap(), vec!["say \"hi\""]);
        assert_eq!(split_row("a,,").unwrap(), vec!["a", "", ""]);
        assert!(split_row("\"open").is_err());
    }

    #[test]
    fn test_read_table() {
        let input = "# exported\nAddress,Amount\n\n0xa,1\n0xb,2\n";
        let table = Table::read(input.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Address", "Amount"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].0, 4);
        assert_eq!(table.column("address").unwrap(), 0);
        assert!(table.column("owner").is_err());
    }

    #[test]
    fn test_read_strips_byte_order_mark() {
        let input = "\u{feff}address,amount\n0xa,1\n";
        let table = Table::read(input.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["address", "amount"]);
        assert_eq!(table.column("address").unwrap(), 0);
    }

    #[test]
    fn test_read_quoted_field_across_lines() {
        let input = "address,amount,note\n0xa,1,\"line one\n# not a comment\nline two\"\n0xb,2,x\n";
        let table = Table::read(input.as_bytes()).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].0, 2);
        assert_eq!(table.rows[0].1[2], "line one\n# not a comment\nline two");
        assert_eq!(table.rows[1], (5, vec!["0xb".to_string(), "2".to_string(), "x".to_string()]));
    }

    #[test]
    fn test_read_unterminated_quote_reports_start_line() {
        let input = "address,amount\n0xa,1\n0xb,\"2\n0xc,3\n";
        let err = Table::read(input.as_bytes()).unwrap_err();

        assert!(matches!(err, InputError::MalformedRow { line: 3, .. }));
    }
}

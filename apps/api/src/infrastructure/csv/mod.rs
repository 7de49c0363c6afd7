//! CSV decoding boundary for uploads.
//!
//! Uploaded bytes are decoded exactly once here into typed [`SourceRow`]s.
//! Everything downstream works with `Option<String>` fields that are already
//! trimmed, with blank cells and null tokens folded into `None`.
//!
//! # Column binding
//! Header names are trimmed. A header equal to a required field binds that
//! field (first occurrence wins). All other headers become extra columns,
//! kept in header order so they can be echoed into the error workbook.
//! A required field with no column decodes to `None` on every row.
//!
//! # Row length
//! A row shorter than the header leaves its trailing fields `None`, so it
//! surfaces as an invalid row rather than a decode failure. A row longer than
//! the header cannot be assigned to columns and fails the whole upload.

use crate::domain::user::entity::{REQUIRED_FIELDS, SourceRow, UserRecord};
use thiserror::Error;
use tracing::debug;

/// Cell values treated as missing, on top of blank cells.
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Error)]
pub enum CsvDecodeError {
    #[error("No columns to parse from file")]
    NoColumns,
    #[error("Expected {expected} fields in line {line}, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("{0}")]
    Malformed(#[from] csv::Error),
}

/// Decoded upload: extra column names plus the rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedCsv {
    pub extra_columns: Vec<String>,
    pub rows: Vec<SourceRow>,
}

enum Binding {
    Required(&'static str),
    Extra(usize),
}

/// Decodes an uploaded CSV document.
///
/// # Errors
/// Returns [`CsvDecodeError::NoColumns`] for input without a header row and
/// [`CsvDecodeError::TooManyFields`] for a row longer than the header and
/// [`CsvDecodeError::Malformed`] for invalid UTF-8.
pub fn decode(bytes: &[u8]) -> Result<DecodedCsv, CsvDecodeError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(str::is_empty) {
        return Err(CsvDecodeError::NoColumns);
    }

    let mut extra_columns = Vec::new();
    let mut taken: Vec<&'static str> = Vec::new();
    let bindings: Vec<Binding> = headers
        .iter()
        .map(|name| match REQUIRED_FIELDS.into_iter().find(|field| *field == name) {
            Some(field) if !taken.contains(&field) => {
                taken.push(field);
                Binding::Required(field)
            }
            _ => {
                extra_columns.push(name.to_string());
                Binding::Extra(extra_columns.len() - 1)
            }
        })
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() > bindings.len() {
            return Err(CsvDecodeError::TooManyFields {
                line: record.position().map_or(0, |pos| pos.line()),
                expected: bindings.len(),
                found: record.len(),
            });
        }
        let mut row = SourceRow {
            record: UserRecord::default(),
            extras: vec![None; extra_columns.len()],
        };
        for (binding, cell) in bindings.iter().zip(record.iter()) {
            let value = normalize(cell);
            match binding {
                Binding::Required(name) => {
                    if let Some(slot) = row.record.slot_mut(name) {
                        *slot = value;
                    }
                }
                Binding::Extra(idx) => row.extras[*idx] = value,
            }
        }
        rows.push(row);
    }

    debug!(
        rows = rows.len(),
        extra_columns = extra_columns.len(),
        "Decoded CSV upload"
    );
    Ok(DecodedCsv {
        extra_columns,
        rows,
    })
}

/// Folds blank cells and null tokens into `None`.
pub fn normalize(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

use crate::{domain::user::errors::DomainError, infrastructure::csv::CsvDecodeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response body of a completed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted_count: usize,
    pub failed_count: usize,
    /// Reference to the error workbook, `None` when every row was valid.
    pub error_file: Option<String>,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid CSV file: {0}")]
    Decode(#[from] CsvDecodeError),
    #[error("Error report failed: {0:#}")]
    Report(anyhow::Error),
    #[error(transparent)]
    Persistence(#[from] DomainError),
}

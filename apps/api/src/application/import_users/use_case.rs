use crate::{
    application::import_users::dto::{ImportError, ImportSummary},
    domain::user::{
        entity::UserRecord,
        partition::{Partition, partition},
        repository::UserRepository,
    },
    infrastructure::{csv, reports::traits::ErrorReportStore},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Handles the CSV import workflow for one upload.
///
/// The workflow is fail-fast on malformed input and otherwise never rejects a
/// request for business-rule violations:
/// 1. Decode the CSV bytes into typed rows (decode failure aborts with no
///    side effects)
/// 2. Partition rows into valid and invalid sets
/// 3. Write invalid rows and their reasons to the error report, replacing
///    the previous one
/// 4. Insert all valid rows in a single all-or-nothing batch
///
/// The error report is written before the insert, so a database failure
/// leaves the report of the same upload in place.
pub struct ImportUsersUseCase {
    repository: Arc<dyn UserRepository>,
    reports: Arc<dyn ErrorReportStore>,
}

impl ImportUsersUseCase {
    pub fn new(repository: Arc<dyn UserRepository>, reports: Arc<dyn ErrorReportStore>) -> Self {
        Self {
            repository,
            reports,
        }
    }

    /// Runs the import for an uploaded CSV document.
    ///
    /// # Errors
    /// - `ImportError::Decode` for malformed CSV; nothing is written
    /// - `ImportError::Report` if the error report cannot be written; nothing
    ///   is inserted
    /// - `ImportError::Persistence` if the batch insert fails
    #[instrument(skip(self, csv_bytes), fields(bytes = csv_bytes.len()))]
    pub async fn execute(&self, csv_bytes: &[u8]) -> Result<ImportSummary, ImportError> {
        let decoded = csv::decode(csv_bytes)?;
        let Partition { valid, invalid } = partition(decoded.rows);
        info!(
            valid = valid.len(),
            invalid = invalid.len(),
            "Partitioned uploaded rows"
        );

        let error_file = if invalid.is_empty() {
            None
        } else {
            let reference = self
                .reports
                .save(&decoded.extra_columns, &invalid)
                .await
                .map_err(ImportError::Report)?;
            Some(reference)
        };

        let records: Vec<UserRecord> = valid.into_iter().map(|row| row.record).collect();
        if !records.is_empty()
            && let Err(e) = self.repository.insert_batch(&records).await
        {
            warn!(rows = records.len(), "Batch insert abandoned");
            return Err(e.into());
        }

        Ok(ImportSummary {
            inserted_count: records.len(),
            failed_count: invalid.len(),
            error_file,
        })
    }
}

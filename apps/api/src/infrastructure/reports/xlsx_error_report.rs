use super::traits::ErrorReportStore;
use crate::domain::user::entity::{InvalidRow, REQUIRED_FIELDS};
use anyhow::Context;
use async_trait::async_trait;
use rust_xlsxwriter::{Format, Workbook};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Name of the column appended after the source columns.
pub const ERROR_REASON_COLUMN: &str = "error_reason";

const SHEET_NAME: &str = "invalid_rows";

/// Longest string an xlsx cell accepts, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Error workbook kept at a single configured path.
///
/// Each save replaces the previous workbook. Writes go to a staging file that
/// is renamed over the target, and saves within one process are serialized,
/// so readers never observe a partially written workbook.
pub struct XlsxErrorReportStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl XlsxErrorReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        info!("Initializing XlsxErrorReportStore at {}", path.display());
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

/// Column titles: required fields, then extras, then `error_reason`.
pub fn header_row(extra_columns: &[String]) -> Vec<&str> {
    let mut titles: Vec<&str> = REQUIRED_FIELDS.to_vec();
    titles.extend(extra_columns.iter().map(String::as_str));
    titles.push(ERROR_REASON_COLUMN);
    titles
}

/// Cell values for one invalid row, aligned with [`header_row`].
pub fn row_cells(invalid: &InvalidRow) -> Vec<Option<&str>> {
    invalid
        .row
        .record
        .values()
        .into_iter()
        .chain(invalid.row.extras.iter().map(Option::as_deref))
        .chain(std::iter::once(Some(invalid.error_reason.as_str())))
        .collect()
}

/// Cuts `value` down to [`MAX_CELL_CHARS`] characters.
pub fn fit_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

fn render(extra_columns: &[String], rows: &[InvalidRow]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in header_row(extra_columns).into_iter().enumerate() {
        let col = u16::try_from(col).context("too many columns for a worksheet")?;
        sheet.write_string_with_format(0, col, title, &bold)?;
    }

    for (idx, invalid) in rows.iter().enumerate() {
        let row = u32::try_from(idx + 1).context("too many rows for a worksheet")?;
        for (col, cell) in row_cells(invalid).into_iter().enumerate() {
            // Blank values stay empty cells.
            if let Some(value) = cell {
                let col = u16::try_from(col).context("too many columns for a worksheet")?;
                let fitted = fit_cell(value);
                if fitted.len() < value.len() {
                    warn!(row, col, "Truncated oversized cell in error report");
                }
                sheet.write_string(row, col, fitted)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

#[async_trait]
impl ErrorReportStore for XlsxErrorReportStore {
    #[instrument(skip(self, extra_columns, rows), fields(path = %self.path.display(), rows = rows.len()))]
    async fn save(&self, extra_columns: &[String], rows: &[InvalidRow]) -> anyhow::Result<String> {
        let bytes = render(extra_columns, rows)?;

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("mkdir -p {}", parent.display()))?;
        }

        let staging = self.staging_path();
        tokio::fs::write(&staging, &bytes)
            .await
            .with_context(|| format!("write {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("rename {} to {}", staging.display(), self.path.display()))?;

        info!(bytes = bytes.len(), "Error report written");
        Ok(self.path.display().to_string())
    }

    async fn load(&self) -> anyhow::Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No error report at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(anyhow::Error::new(e).context(format!("read {}", self.path.display()))),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "invalid_rows.xlsx".to_string())
    }

    fn content_type(&self) -> &'static str {
        XLSX_CONTENT_TYPE
    }
}

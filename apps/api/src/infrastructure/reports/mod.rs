pub mod traits;
pub mod xlsx_error_report;

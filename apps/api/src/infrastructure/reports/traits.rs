use crate::domain::user::entity::InvalidRow;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ErrorReportStore: Send + Sync {
    /// Replaces the stored report with `rows` and returns its reference.
    ///
    /// `extra_columns` names the non-required values each row carries.
    async fn save(&self, extra_columns: &[String], rows: &[InvalidRow]) -> anyhow::Result<String>;
    /// Bytes of the most recent report, or `None` if there is none.
    async fn load(&self) -> anyhow::Result<Option<Vec<u8>>>;
    fn file_name(&self) -> String;
    fn content_type(&self) -> &'static str;
}

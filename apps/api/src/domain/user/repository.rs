use super::entity::UserRecord;
use super::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts every record in one transaction; nothing is kept on failure.
    async fn insert_batch(&self, records: &[UserRecord]) -> Result<u64, DomainError>;
    async fn find_all(&self) -> Result<Vec<UserRecord>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

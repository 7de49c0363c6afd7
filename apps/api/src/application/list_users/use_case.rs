use crate::domain::user::{entity::UserRecord, errors::DomainError, repository::UserRepository};
use std::sync::Arc;

pub struct ListUsersUseCase {
    repository: Arc<dyn UserRepository>,
}

impl ListUsersUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.repository.find_all().await
    }
}

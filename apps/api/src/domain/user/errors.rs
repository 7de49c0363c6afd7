use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Persistence error: {0}")]
    Persistence(String),
}

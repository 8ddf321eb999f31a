use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash: {0}")]
    InvalidHash(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage layer rejected a row because the email is already taken.
    #[error("Email address already registered")]
    Conflict,

    #[error("Database error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

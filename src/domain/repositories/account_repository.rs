use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        account::{Account, EmailAddress},
        credential::HashedPassword,
    },
};

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Look up an account by its normalized email. Absence is `Ok(None)`.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, RepositoryError>;

    /// Insert a new account atomically.
    ///
    /// Returns `RepositoryError::Conflict` when the storage-level unique
    /// constraint on email rejects the row, so a registration that lost the
    /// race against a concurrent one is still reported as a duplicate.
    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: HashedPassword,
    ) -> Result<Account, RepositoryError>;
}

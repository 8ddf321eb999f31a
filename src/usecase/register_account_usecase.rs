use thiserror::Error;

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{
        account::RegisteredAccount,
        credential::{CredentialInput, HashedPassword},
    },
    repositories::account_repository::AccountRepository,
    services::{
        credential_validator::{FieldErrors, validate},
        password_service::PasswordHasher,
    },
};

/// Result of one signup attempt, as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Created(RegisteredAccount),
    InvalidInput(FieldErrors),
    DuplicateAccount,
    InternalFailure,
}

#[derive(Debug, Error)]
enum RegistrationError {
    #[error("Invalid input ({} field errors)", .0.len())]
    InvalidInput(FieldErrors),

    #[error("Account already exists")]
    DuplicateAccount,

    #[error(transparent)]
    Storage(RepositoryError),

    #[error(transparent)]
    Hashing(#[from] DomainError),
}

impl From<RepositoryError> for RegistrationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict => RegistrationError::DuplicateAccount,
            other => RegistrationError::Storage(other),
        }
    }
}

impl From<RegistrationError> for RegistrationOutcome {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::InvalidInput(errors) => {
                tracing::info!(error_count = errors.len(), "Registration rejected by validation");
                RegistrationOutcome::InvalidInput(errors)
            }
            RegistrationError::DuplicateAccount => {
                tracing::info!("Registration rejected: account already exists");
                RegistrationOutcome::DuplicateAccount
            }
            RegistrationError::Storage(e) => {
                tracing::error!(error = %e, "Registration failed in storage");
                RegistrationOutcome::InternalFailure
            }
            RegistrationError::Hashing(e) => {
                tracing::error!(error = %e, "Registration failed while hashing password");
                RegistrationOutcome::InternalFailure
            }
        }
    }
}

/// Validate, check for an existing account, hash, persist.
///
/// Holds no per-request state. The lookup is only a fast path; the
/// repository's unique constraint decides concurrent signups for the same
/// email, and its conflict is reported exactly like a lookup hit.
pub struct RegisterAccountUsecase<R: AccountRepository, P: PasswordHasher> {
    account_repository: R,
    password_hasher: P,
}

impl<R: AccountRepository, P: PasswordHasher> RegisterAccountUsecase<R, P> {
    pub fn new(account_repository: R, password_hasher: P) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }

    pub async fn register(&self, input: CredentialInput) -> RegistrationOutcome {
        match self.try_register(input).await {
            Ok(account) => {
                tracing::info!(account_id = %account.id, "Account created");
                RegistrationOutcome::Created(account)
            }
            Err(e) => e.into(),
        }
    }

    async fn try_register(
        &self,
        input: CredentialInput,
    ) -> Result<RegisteredAccount, RegistrationError> {
        let credential = validate(input).map_err(RegistrationError::InvalidInput)?;

        if self
            .account_repository
            .find_by_email(credential.email())
            .await?
            .is_some()
        {
            return Err(RegistrationError::DuplicateAccount);
        }

        let (email, password) = credential.into_parts();
        let password_hash = self.hash_password(password).await?;

        let account = self.account_repository.create(&email, password_hash).await?;

        Ok(account.into())
    }

    // Argon2 is deliberately slow; keep it off the async workers.
    async fn hash_password(&self, password: String) -> Result<HashedPassword, DomainError> {
        let hasher = self.password_hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::HashingFailed(e.to_string()))?
    }
}

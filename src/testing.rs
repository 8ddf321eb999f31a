//! Test doubles for the repository and hasher ports.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    error::{DomainError, RepositoryError},
    models::{
        account::{Account, AccountId, EmailAddress},
        credential::HashedPassword,
    },
    repositories::account_repository::AccountRepository,
    services::password_service::PasswordHasher,
};

/// Map-backed store whose `create` enforces email uniqueness under one lock,
/// like a unique index would.
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    blind_lookup: bool,
}

impl InMemoryAccountRepository {
    /// A store whose `find_by_email` always misses, so duplicates are only
    /// caught by `create`.
    pub fn blind_lookup() -> Self {
        Self {
            blind_lookup: true,
            ..Self::default()
        }
    }

    pub fn get(&self, email: &str) -> Option<Account> {
        self.accounts.lock().unwrap().get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, RepositoryError> {
        if self.blind_lookup {
            return Ok(None);
        }
        Ok(self.get(email.as_str()))
    }

    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: HashedPassword,
    ) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email.as_str()) {
            return Err(RepositoryError::Conflict);
        }
        let account = Account::reconstruct(AccountId::new(), email.clone(), password_hash, Utc::now());
        accounts.insert(email.as_str().to_string(), account.clone());
        Ok(account)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FailureMode {
    StorageOnLookup,
    StorageOnCreate,
    ConflictOnCreate,
}

#[derive(Clone)]
pub struct FailingAccountRepository {
    mode: FailureMode,
}

impl FailingAccountRepository {
    pub fn new(mode: FailureMode) -> Self {
        Self { mode }
    }
}

#[async_trait]
impl AccountRepository for FailingAccountRepository {
    async fn find_by_email(&self, _email: &EmailAddress) -> Result<Option<Account>, RepositoryError> {
        match self.mode {
            FailureMode::StorageOnLookup => {
                Err(RepositoryError::Storage("connection refused".to_string()))
            }
            _ => Ok(None),
        }
    }

    async fn create(
        &self,
        _email: &EmailAddress,
        _password_hash: HashedPassword,
    ) -> Result<Account, RepositoryError> {
        match self.mode {
            FailureMode::ConflictOnCreate => Err(RepositoryError::Conflict),
            _ => Err(RepositoryError::Storage("connection reset".to_string())),
        }
    }
}

#[derive(Clone)]
pub struct StubPasswordHasher;

impl PasswordHasher for StubPasswordHasher {
    fn hash(&self, _plain_password: &str) -> Result<HashedPassword, DomainError> {
        Ok(HashedPassword::new("mock_hash".to_string()))
    }

    fn verify(
        &self,
        _plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        Ok(hashed_password.as_str() == "mock_hash")
    }
}

#[derive(Clone)]
pub struct FailingPasswordHasher;

impl PasswordHasher for FailingPasswordHasher {
    fn hash(&self, _plain_password: &str) -> Result<HashedPassword, DomainError> {
        Err(DomainError::HashingFailed("out of memory".to_string()))
    }

    fn verify(
        &self,
        _plain_password: &str,
        _hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        Ok(false)
    }
}

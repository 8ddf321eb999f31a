use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        account::{Account, AccountId, EmailAddress},
        credential::HashedPassword,
    },
    repositories::account_repository::AccountRepository,
};
use crate::infrastructure::entity::accounts;

#[derive(Clone)]
pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, RepositoryError> {
        let account = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        account.map(into_account).transpose()
    }

    async fn create(
        &self,
        email: &EmailAddress,
        password_hash: HashedPassword,
    ) -> Result<Account, RepositoryError> {
        let id = AccountId::new();
        let now = Utc::now();

        let account_model = accounts::ActiveModel {
            id: Set(*id.as_uuid()),
            email: Set(email.as_str().to_string()),
            password_hash: Set(password_hash.as_str().to_string()),
            created_at: Set(now.fixed_offset()),
        };

        accounts::Entity::insert(account_model)
            .exec(&self.db)
            .await
            .map_err(map_insert_error)?;

        Ok(Account::reconstruct(id, email.clone(), password_hash, now))
    }
}

fn map_insert_error(err: DbErr) -> RepositoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => RepositoryError::Conflict,
        _ => RepositoryError::Storage(err.to_string()),
    }
}

fn into_account(model: accounts::Model) -> Result<Account, RepositoryError> {
    let email =
        EmailAddress::parse(&model.email).map_err(|e| RepositoryError::Storage(e.to_string()))?;

    Ok(Account::reconstruct(
        AccountId::from_uuid(model.id),
        email,
        HashedPassword::new(model.password_hash),
        model.created_at.with_timezone(&Utc),
    ))
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        config::AppConfig,
        infrastructure::database::{connect, ensure_schema},
    };

    // one connection, so every query sees the same in-memory database
    #[fixture]
    async fn repository() -> SeaOrmAccountRepository {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            max_connections: 1,
        };
        let db = connect(&config).await.unwrap();
        ensure_schema(&db).await.unwrap();
        SeaOrmAccountRepository::new(db)
    }

    fn email(raw: &str) -> EmailAddress {
        EmailAddress::parse(raw).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_email_on_empty_store_is_absent(
        #[future] repository: SeaOrmAccountRepository,
    ) {
        let repository = repository.await;

        let found = repository.find_by_email(&email("a@b.com")).await.unwrap();

        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn create_then_find_round_trips_the_row(#[future] repository: SeaOrmAccountRepository) {
        let repository = repository.await;
        let hash = HashedPassword::new("$argon2id$v=19$stub".to_string());

        let created = repository.create(&email("a@b.com"), hash.clone()).await.unwrap();
        let found = repository
            .find_by_email(&email("a@b.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id(), created.id());
        assert_eq!(found.email().as_str(), "a@b.com");
        assert_eq!(found.password_hash(), &hash);
    }

    #[rstest]
    #[tokio::test]
    async fn unique_constraint_surfaces_as_conflict(#[future] repository: SeaOrmAccountRepository) {
        let repository = repository.await;
        let hash = HashedPassword::new("$argon2id$v=19$stub".to_string());

        repository.create(&email("a@b.com"), hash.clone()).await.unwrap();
        let second = repository.create(&email("a@b.com"), hash).await;

        assert!(matches!(second, Err(RepositoryError::Conflict)));
    }

    #[tokio::test]
    async fn missing_table_surfaces_as_storage_error() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            max_connections: 1,
        };
        let repository = SeaOrmAccountRepository::new(connect(&config).await.unwrap());

        let result = repository
            .create(&email("a@b.com"), HashedPassword::new("hash".to_string()))
            .await;

        assert!(matches!(result, Err(RepositoryError::Storage(_))));
    }
}

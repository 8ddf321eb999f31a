use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};

use crate::{config::AppConfig, infrastructure::entity::accounts};

pub async fn connect(config: &AppConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .sqlx_logging(true);

    Database::connect(opt).await
}

/// Create the `accounts` table, with its unique email index, if it is missing.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut statement = schema.create_table_from_entity(accounts::Entity);
    statement.if_not_exists();
    db.execute(backend.build(&statement)).await?;

    tracing::info!(table = "accounts", backend = ?backend, "Database schema ready");
    Ok(())
}

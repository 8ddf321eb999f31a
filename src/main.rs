mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

#[cfg(test)]
mod testing;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    domain::{
        repositories::account_repository::AccountRepository,
        services::password_service::PasswordHasher,
    },
    infrastructure::{
        account_repository::SeaOrmAccountRepository, argon2_password_hasher::Argon2PasswordHasher,
        database,
    },
    presentation::handlers::account_handler::create_account_router,
    usecase::register_account_usecase::RegisterAccountUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signup_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        listen_addr = %config.listen_addr,
        max_connections = config.max_connections,
        "Configuration loaded"
    );

    let db = database::connect(&config).await?;
    database::ensure_schema(&db).await?;

    let account_repository = SeaOrmAccountRepository::new(db);
    let password_hasher = Argon2PasswordHasher::new();
    let register_account_usecase = RegisterAccountUsecase::new(account_repository, password_hasher);

    let app = create_app(register_account_usecase);

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(address = %config.listen_addr, "HTTP server listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn create_app<R, P>(register_account_usecase: RegisterAccountUsecase<R, P>) -> Router
where
    R: AccountRepository + Clone + 'static,
    P: PasswordHasher,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api/v1/auth",
            create_account_router(register_account_usecase),
        )
        .layer(TraceLayer::new_for_http())
}

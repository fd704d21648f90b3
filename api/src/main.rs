use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use mp_api::handlers::HealthChecks;
use mp_api::{config, create_app, AppState};
use mp_core::services::{
    AccountService, AccountServiceConfig, IdentityResolver, IdentityResolverConfig, OrderService,
    TokenService, TokenServiceConfig,
};
use mp_infra::cache::RedisClient;
use mp_infra::database::{DatabasePool, MySqlOrderRepository, MySqlUserRepository};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    config::init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting Destiny Market API server");

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    database
        .run_migrations()
        .await
        .context("failed to run database migrations")?;

    let cache = Arc::new(
        RedisClient::new(config.cache.clone())
            .await
            .context("failed to connect to Redis")?,
    );

    let users = Arc::new(MySqlUserRepository::new(database.get_pool().clone()));
    let orders = Arc::new(MySqlOrderRepository::new(database.get_pool().clone()));
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));

    let identity = Arc::new(IdentityResolver::new(
        Arc::clone(&tokens),
        Arc::clone(&users),
        Arc::clone(&cache),
        IdentityResolverConfig::from(&config.cache),
    ));
    let accounts = Arc::new(AccountService::new(
        users,
        tokens,
        AccountServiceConfig::default(),
    ));
    let order_service = Arc::new(OrderService::new(orders));

    let health = HealthChecks::new()
        .with_probe("database", Arc::new(database.clone()))
        .with_probe("cache", cache);

    let state = web::Data::new(
        AppState::new(identity, accounts, order_service).with_health_checks(health),
    );

    let bind_address = config.server.bind_address();
    info!(%bind_address, "Server will bind");

    let server_config = config.server.clone();
    let cors_config = config.cors.clone();
    let mut server = HttpServer::new(move || {
        create_app(state.clone(), &server_config, &cors_config)
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    info!("Server stopped, closing database pool");
    database.close().await;

    Ok(())
}

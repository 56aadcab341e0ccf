use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use rg_api::app::create_app;
use rg_api::routes::auth::AppState;
use rg_core::repositories::{TokenBlacklistRepository, UserRepository};
use rg_core::services::auth::{AuthService, AuthServiceConfig};
use rg_core::services::token::{
    BlacklistCleanupConfig, BlacklistCleanupService, TokenService, TokenServiceConfig,
};
use rg_infra::cache::{RedisClient, RedisTokenBlacklist};
use rg_infra::database::{DatabasePool, MySqlTokenBlacklistRepository, MySqlUserRepository};
use rg_infra::health::HealthCheck;
use rg_infra::memory::{InMemoryTokenBlacklist, InMemoryUserRepository};
use rg_shared::{AppConfig, Environment, StorageBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!(
        "Starting Renewal Guard API ({} environment, {} storage)",
        config.environment, config.storage
    );

    match config.storage {
        StorageBackend::Memory => {
            warn!("Using in-memory storage, all data is lost on restart");
            run_server(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryTokenBlacklist::new()),
                Vec::new(),
                config,
            )
            .await
        }
        StorageBackend::Mysql => {
            let pool = connect_database(&config).await?;
            let result = run_server(
                Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
                Arc::new(MySqlTokenBlacklistRepository::new(pool.get_pool().clone())),
                vec![Arc::new(pool.clone()) as Arc<dyn HealthCheck>],
                config,
            )
            .await;
            pool.close().await;
            result
        }
        StorageBackend::MysqlRedis => {
            let pool = connect_database(&config).await?;
            let redis = RedisClient::new(config.cache.clone())
                .await
                .context("failed to connect to Redis")?;
            let result = run_server(
                Arc::new(MySqlUserRepository::new(pool.get_pool().clone())),
                Arc::new(RedisTokenBlacklist::new(redis.clone())),
                vec![
                    Arc::new(pool.clone()) as Arc<dyn HealthCheck>,
                    Arc::new(redis) as Arc<dyn HealthCheck>,
                ],
                config,
            )
            .await;
            pool.close().await;
            result
        }
    }
}

async fn connect_database(config: &AppConfig) -> anyhow::Result<DatabasePool> {
    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to MySQL")?;
    pool.run_migrations()
        .await
        .context("failed to apply database migrations")?;
    info!("MySQL ready, {}", pool.get_statistics());
    Ok(pool)
}

async fn run_server<U, B>(
    users: Arc<U>,
    blacklist: Arc<B>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
    config: AppConfig,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    B: TokenBlacklistRepository + 'static,
{
    if config.jwt.is_using_default_secret() {
        warn!("JWT secrets are the built-in defaults, set JWT_SECRET_KEY and JWT_REFRESH_SECRET_KEY");
    }

    let token_service = TokenService::new(
        users.clone(),
        blacklist.clone(),
        TokenServiceConfig::from(&config.jwt),
    )
    .context("invalid JWT configuration")?;

    let auth_service = AuthService::new(users, Arc::new(token_service), AuthServiceConfig::from_env());

    let cleanup = Arc::new(BlacklistCleanupService::new(
        blacklist,
        BlacklistCleanupConfig {
            interval_seconds: config.blacklist_purge_interval,
            enabled: config.blacklist_purge_interval > 0,
        },
    ));
    let cleanup_task = cleanup.start_background_task();

    let state = web::Data::new(AppState {
        auth_service: Arc::new(auth_service),
        storage: config.storage.to_string(),
        health_checks,
    });
    let cors = config.cors.clone();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    info!("Server stopped");
    Ok(())
}

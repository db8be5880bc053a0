use std::sync::Arc;

use actix_web::{web, HttpServer};
use log::info;

use cs_api::app::create_app;
use cs_api::routes::user::AppState;
use cs_core::services::{AccountService, AccountServiceConfig, TokenConfig, TokenService};
use cs_infra::{DatabasePool, HttpMediaHost, MySqlUserRepository};
use cs_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting ClipStream account service");

    // Load configuration
    let config = AppConfig::from_env();
    if config.environment.is_production() && config.auth.jwt.is_using_default_secret() {
        anyhow::bail!("refusing to start in production with a default JWT secret");
    }

    // Initialize infrastructure: database pool, repositories, media host
    let pool = DatabasePool::new(config.database.clone()).await?;
    let user_repository = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let media_store = Arc::new(HttpMediaHost::from_env()?);

    // Wire up domain services
    let token_service = Arc::new(TokenService::new(TokenConfig::from(config.auth.jwt.clone()))?);
    let account_service = Arc::new(AccountService::new(
        user_repository,
        media_store,
        token_service,
        AccountServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState {
        account_service,
        cookie: config.auth.cookie.clone(),
    });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    // Teardown: drain pool connections on shutdown
    pool.close().await;

    Ok(())
}

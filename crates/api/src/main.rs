use anyhow::{Context, Result};
use tracing::info;

use portfolio_cms_api::{
    app, config,
    middleware::{self, logging},
    services::{bootstrap_admin, AdminAuthService},
    stores::Stores,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    logging::init_logging(&config.logging);
    middleware::init_metrics()?;

    info!("Starting Portfolio CMS API v{}", env!("CARGO_PKG_VERSION"));

    let stores = if config.uses_memory_storage() {
        info!("Using in-memory storage; content is lost on shutdown");
        Stores::in_memory()
    } else {
        let pool = persistence::db::create_pool(&(&config.database).into())
            .await
            .context("Failed to connect to database")?;
        persistence::db::run_migrations(&pool).await?;
        Stores::postgres(pool)
    };

    let auth = AdminAuthService::new(
        stores.admins.clone(),
        stores.sessions.clone(),
        config.session.ttl_secs,
    );
    bootstrap_admin(&auth, &config.admin).await?;

    let addr = config.socket_addr()?;
    let app = app::create_app(config, stores);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

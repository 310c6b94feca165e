use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api::jwt::{JwtConfig, JwtService};
use api::routes;
use api::state::AppState;
use common::database::{DatabaseConfig, health_check, init_pool};
use common::error::DatabaseError;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting field-service API");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Apply schema migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;
    info!("Database migrations applied");

    // Initialize the capability service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(&jwt_config);

    let app_state = AppState::new(pool, jwt_service);

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Field-service API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

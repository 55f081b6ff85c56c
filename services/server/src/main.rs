use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod jwt;
mod middleware;
mod models;
mod repositories;
mod routes;
mod validation;

use common::database;
use common::error::DatabaseError;

use crate::jwt::JwtService;
use crate::repositories::{UserRepository, WorkRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub work_repository: WorkRepository,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting taskboard server");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    // Check database connectivity
    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Apply pending migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))?;

    info!("Taskboard server initialized successfully");

    // Initialize JWT service
    let jwt_config = crate::jwt::JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config)?;

    let user_repository = UserRepository::new(pool.clone());
    let work_repository = WorkRepository::new(pool);

    let app_state = AppState {
        jwt_service,
        user_repository,
        work_repository,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
    info!("Taskboard server listening on 0.0.0.0:3000");

    axum::serve(listener, app).await?;

    Ok(())
}

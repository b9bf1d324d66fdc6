use shared_types::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Pool created lazily; no connections are opened until the first query.
static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();
static MIGRATED: AtomicBool = AtomicBool::new(false);

/// Create a connection pool from `DATABASE_URL`.
pub fn create_pool() -> Result<Pool<Postgres>, AppError> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| AppError::internal("DATABASE_URL must be set"))?;

    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(&database_url)
        .map_err(|e| AppError::database(format!("Failed to create database pool: {e}")))
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to run migrations: {e}")))
}

/// Get or initialize the shared pool used by server functions.
/// Migrations run once per process on first use.
pub async fn get_db() -> Result<&'static Pool<Postgres>, AppError> {
    let pool = match POOL.get() {
        Some(pool) => pool,
        None => {
            let created = create_pool()?;
            POOL.get_or_init(|| created)
        }
    };

    if !MIGRATED.swap(true, Ordering::SeqCst) {
        if let Err(e) = run_migrations(pool).await {
            MIGRATED.store(false, Ordering::SeqCst);
            tracing::error!(error = %e, "Database migration failed");
            return Err(e);
        }
    }

    Ok(pool)
}

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Creates a pooled database connection from `DATABASE_URL`.
///
/// TLS for managed databases is configured through URL parameters
/// (`ssl-mode`, `ssl-ca`), which the MySQL driver reads directly.
pub async fn create_connection() -> Result<DatabaseConnection, DbErr> {
    let url = dotenvy::var("DATABASE_URL")
        .map_err(|_| DbErr::Custom("DATABASE_URL is not set".to_string()))?;

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(5)
        .min_connections(0)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(10))
        .sqlx_logging(false);

    Database::connect(options).await
}

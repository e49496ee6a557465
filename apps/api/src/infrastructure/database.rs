use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

/// Opens the connection pool described by the configuration
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.database_max_connections,
        "Connecting to database..."
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connected successfully");
    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

pub mod migrate;
pub mod user;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Connect to the database named by the environment.
///
/// `LONGBOX_DATABASE_URL` takes precedence over `DATABASE_URL` so the CLI
/// can target a different database than other tooling on the same host.
pub async fn connect() -> Result<PgPool, ConnectError> {
    dotenvy::dotenv().ok();

    let url = std::env::var("LONGBOX_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| ConnectError::MissingUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await?;

    Ok(pool)
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("LONGBOX_DATABASE_URL or DATABASE_URL must be set")]
    MissingUrl,

    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),
}

//! Store configuration loaded from environment variables.

use keel_db::DbPool;

/// Connection settings for the record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Connection pool size (default: `20`).
    pub max_connections: u32,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first via dotenvy, then:
    ///
    /// | Env Var               | Default      |
    /// |-----------------------|--------------|
    /// | `DATABASE_URL`        | *(required)* |
    /// | `DB_MAX_CONNECTIONS`  | `20`         |
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        StoreConfig {
            database_url,
            max_connections,
        }
    }

    /// Connect a pool, verify reachability, and apply pending migrations.
    pub async fn connect(&self) -> anyhow::Result<DbPool> {
        let pool = keel_db::create_pool(&self.database_url, self.max_connections).await?;
        keel_db::health_check(&pool).await?;
        keel_db::run_migrations(&pool).await?;
        tracing::info!(max_connections = self.max_connections, "Record store ready");
        Ok(pool)
    }
}

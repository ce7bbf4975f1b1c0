//! Database connection pool and schema capability detection.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Optional tables present in the connected schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureAvailability {
    pub meeting_schedules: bool,
}

impl FeatureAvailability {
    /// Every optional table present.
    pub fn all() -> Self {
        Self {
            meeting_schedules: true,
        }
    }
}

/// Probe the schema once for optional tables.
pub async fn detect_features(pool: &PgPool) -> Result<FeatureAvailability, sqlx::Error> {
    let meeting_schedules = table_exists(pool, "meeting_schedules").await?;
    if !meeting_schedules {
        tracing::warn!(table = "meeting_schedules", "Optional table missing; decided counts will be zero");
    }
    Ok(FeatureAvailability { meeting_schedules })
}

/// Resolved through the connection's `search_path`, like the unqualified
/// table names in the store queries.
async fn table_exists(pool: &PgPool, table: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
        .bind(table)
        .fetch_one(pool)
        .await
}

//! Database schema migrations
//!
//! Versioned schema migrations allowing seamless database upgrades without
//! manual deletion or data loss.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - They must remain stable for users upgrading from older versions
//! 2. **Always add new migrations** - Create a new migration function for each schema change
//! 3. **Use ALTER TABLE** - Prefer ALTER TABLE over DROP/CREATE to preserve data

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

/// Set schema version in database
async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        warn!("This may indicate a downgrade. Proceeding with caution.");
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    info!("All migrations completed successfully");
    Ok(())
}

/// Migration v1: baseline schema marker
///
/// The initial release created all tables via CREATE TABLE IF NOT EXISTS,
/// so v1 only records that the baseline schema is in place.
async fn migrate_v1(_pool: &SqlitePool) -> Result<()> {
    info!("Running migration v1: baseline schema");
    Ok(())
}

/// Migration v2: Add tx_hash column to campaigns table
///
/// **Background:** Campaign on-chain record hashes were added after the
/// first release. New databases get the column from CREATE TABLE; this
/// migration adds it to databases created before that.
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    info!("Running migration v2: Add tx_hash column to campaigns");

    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='campaigns'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(());
    }

    // Check if column already exists (idempotency)
    let has_column: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pragma_table_info('campaigns') WHERE name = 'tx_hash'",
    )
    .fetch_one(pool)
    .await?;

    if has_column == 0 {
        sqlx::query("ALTER TABLE campaigns ADD COLUMN tx_hash TEXT")
            .execute(pool)
            .await?;
        info!("Migration v2: Added tx_hash column to campaigns table");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool")
    }

    #[tokio::test]
    async fn test_version_zero_on_fresh_database() {
        let pool = memory_pool().await;
        let version = get_schema_version(&pool).await.expect("version query");
        assert_eq!(version, 0);
    }

    #[tokio::test]
    async fn test_migrations_run_to_current_version() {
        let pool = memory_pool().await;
        crate::db::apply_schema(&pool).await.expect("schema");

        let version = get_schema_version(&pool).await.expect("version query");
        assert_eq!(version, CURRENT_SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = memory_pool().await;
        crate::db::apply_schema(&pool).await.expect("schema");
        run_migrations(&pool).await.expect("rerun should succeed");
    }

    #[tokio::test]
    async fn test_v2_adds_tx_hash_to_legacy_campaigns() {
        let pool = memory_pool().await;

        // Simulate a pre-v2 database: campaigns table without tx_hash
        sqlx::query(
            r#"
            CREATE TABLE campaigns (
                id TEXT PRIMARY KEY,
                brand_id TEXT NOT NULL,
                title TEXT NOT NULL,
                budget REAL NOT NULL,
                status TEXT NOT NULL DEFAULT 'draft'
            )
            "#,
        )
        .execute(&pool)
        .await
        .expect("legacy table");

        sqlx::query(
            "CREATE TABLE schema_version (version INTEGER PRIMARY KEY, applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP)",
        )
        .execute(&pool)
        .await
        .expect("version table");
        set_schema_version(&pool, 1).await.expect("set v1");

        run_migrations(&pool).await.expect("migrate");

        let has_column: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM pragma_table_info('campaigns') WHERE name = 'tx_hash'",
        )
        .fetch_one(&pool)
        .await
        .expect("pragma query");
        assert_eq!(has_column, 1);
    }
}

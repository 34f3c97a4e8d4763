//! Database initialization
//!
//! Opens (or creates) the SQLite database, creates all tables idempotently,
//! runs versioned migrations, and seeds default settings. Safe to call on
//! every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    apply_schema(&pool).await?;

    Ok(pool)
}

/// Apply pragmas, schema, migrations, and default settings to an open pool.
///
/// Split out of [`init_database`] so tests can run against throwaway
/// databases without going through path resolution.
pub async fn apply_schema(pool: &SqlitePool) -> Result<()> {
    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(pool)
        .await?;

    // Schema creation (idempotent - safe to call multiple times)
    create_schema_version_table(pool).await?;
    create_users_table(pool).await?;
    create_brands_table(pool).await?;
    create_influencers_table(pool).await?;
    create_campaigns_table(pool).await?;
    create_settings_table(pool).await?;

    // Versioned migrations for databases created by older builds
    crate::db::migrations::run_migrations(pool).await?;

    // Default settings
    init_default_settings(pool).await?;

    Ok(())
}

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Users are mirrored from the identity provider; this table never stores
/// credentials.
async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL DEFAULT 'influencer',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_brands_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS brands (
            user_id TEXT PRIMARY KEY REFERENCES users(id),
            company_name TEXT NOT NULL,
            industry TEXT,
            website TEXT,
            verified INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// `niche` holds a JSON string array, `metrics` a JSON object
async fn create_influencers_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS influencers (
            user_id TEXT PRIMARY KEY REFERENCES users(id),
            username TEXT NOT NULL,
            bio TEXT,
            niche TEXT NOT NULL DEFAULT '[]',
            metrics TEXT NOT NULL DEFAULT '{}',
            wallet_address TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_campaigns_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS campaigns (
            id TEXT PRIMARY KEY,
            brand_id TEXT NOT NULL REFERENCES brands(user_id),
            title TEXT NOT NULL,
            description TEXT,
            budget REAL NOT NULL,
            status TEXT NOT NULL DEFAULT 'draft',
            tx_hash TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the settings table
///
/// Stores application configuration key-value pairs.
async fn create_settings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Initialize or update default settings.
///
/// Ensures all required settings exist with default values; NULL values are
/// reset to defaults.
async fn init_default_settings(pool: &SqlitePool) -> Result<()> {
    ensure_setting(pool, "default_currency", "INR").await?;
    ensure_setting(pool, "session_timeout_seconds", "86400").await?;
    ensure_setting(pool, "http_max_body_size_bytes", "1048576").await?;

    info!("Default settings initialized");
    Ok(())
}

/// Insert a setting if missing, or reset it if the stored value is NULL
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default_value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO settings (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET value = excluded.value
        WHERE settings.value IS NULL
        "#,
    )
    .bind(key)
    .bind(default_value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Read a setting value, if present
pub async fn get_setting(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<(Option<String>,)> =
        sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

    Ok(value.and_then(|(v,)| v))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        apply_schema(&pool).await.expect("schema should apply");
        pool
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = test_pool().await;
        // Second application must not fail
        apply_schema(&pool).await.expect("reapply should succeed");
    }

    #[tokio::test]
    async fn test_default_settings_seeded() {
        let pool = test_pool().await;
        let currency = get_setting(&pool, "default_currency")
            .await
            .expect("query should succeed");
        assert_eq!(currency.as_deref(), Some("INR"));
    }

    #[tokio::test]
    async fn test_ensure_setting_preserves_existing_value() {
        let pool = test_pool().await;
        sqlx::query("UPDATE settings SET value = 'USD' WHERE key = 'default_currency'")
            .execute(&pool)
            .await
            .expect("update should succeed");

        ensure_setting(&pool, "default_currency", "INR")
            .await
            .expect("ensure should succeed");

        let currency = get_setting(&pool, "default_currency")
            .await
            .expect("query should succeed");
        assert_eq!(currency.as_deref(), Some("USD"));
    }
}

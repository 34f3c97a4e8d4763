//! Database queries for the InfluencerHub API
//!
//! Thin sqlx wrappers over the schema owned by `ihub-common`. Handlers do
//! not write SQL; everything goes through these helpers.

use ihub_common::models::{Brand, Campaign, Influencer, User};
use ihub_common::Result;
use sqlx::SqlitePool;

/// Fetch a user by id
pub async fn get_user(pool: &SqlitePool, user_id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, role, created_at FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Insert a user row mirrored from the identity provider
pub async fn create_user(pool: &SqlitePool, user_id: &str, email: &str, role: &str) -> Result<()> {
    sqlx::query("INSERT INTO users (id, email, role) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(email)
        .bind(role)
        .execute(pool)
        .await?;

    Ok(())
}

/// Fetch a brand profile by owning user id
pub async fn get_brand(pool: &SqlitePool, user_id: &str) -> Result<Option<Brand>> {
    let brand = sqlx::query_as::<_, Brand>(
        "SELECT user_id, company_name, industry, website, verified FROM brands WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(brand)
}

/// Insert a brand profile. Fails on duplicate user_id (primary key).
pub async fn insert_brand(
    pool: &SqlitePool,
    user_id: &str,
    company_name: &str,
    industry: Option<&str>,
    website: Option<&str>,
) -> Result<Brand> {
    sqlx::query(
        r#"
        INSERT INTO brands (user_id, company_name, industry, website, verified)
        VALUES (?, ?, ?, ?, 0)
        "#,
    )
    .bind(user_id)
    .bind(company_name)
    .bind(industry)
    .bind(website)
    .execute(pool)
    .await?;

    get_brand(pool, user_id)
        .await?
        .ok_or_else(|| ihub_common::Error::Internal("brand row vanished after insert".into()))
}

/// Fetch an influencer profile by owning user id
pub async fn get_influencer(pool: &SqlitePool, user_id: &str) -> Result<Option<Influencer>> {
    let influencer = sqlx::query_as::<_, Influencer>(
        r#"
        SELECT user_id, username, bio, niche, metrics, wallet_address
        FROM influencers WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(influencer)
}

/// Insert an influencer profile. `niche` is stored as a JSON string array.
pub async fn insert_influencer(
    pool: &SqlitePool,
    user_id: &str,
    username: &str,
    bio: Option<&str>,
    niche: &[String],
    wallet_address: Option<&str>,
) -> Result<Influencer> {
    let niche_json = serde_json::to_string(niche)
        .map_err(|e| ihub_common::Error::Internal(format!("niche serialization: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO influencers (user_id, username, bio, niche, metrics, wallet_address)
        VALUES (?, ?, ?, ?, '{}', ?)
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(bio)
    .bind(niche_json)
    .bind(wallet_address)
    .execute(pool)
    .await?;

    get_influencer(pool, user_id)
        .await?
        .ok_or_else(|| ihub_common::Error::Internal("influencer row vanished after insert".into()))
}

/// Insert a campaign in draft status
pub async fn insert_campaign(
    pool: &SqlitePool,
    id: &str,
    brand_id: &str,
    title: &str,
    description: Option<&str>,
    budget: f64,
    tx_hash: Option<&str>,
) -> Result<Campaign> {
    sqlx::query(
        r#"
        INSERT INTO campaigns (id, brand_id, title, description, budget, status, tx_hash)
        VALUES (?, ?, ?, ?, ?, 'draft', ?)
        "#,
    )
    .bind(id)
    .bind(brand_id)
    .bind(title)
    .bind(description)
    .bind(budget)
    .bind(tx_hash)
    .execute(pool)
    .await?;

    get_campaign(pool, id)
        .await?
        .ok_or_else(|| ihub_common::Error::Internal("campaign row vanished after insert".into()))
}

/// Fetch a campaign by id
pub async fn get_campaign(pool: &SqlitePool, id: &str) -> Result<Option<Campaign>> {
    let campaign = sqlx::query_as::<_, Campaign>(
        r#"
        SELECT id, brand_id, title, description, budget, status, tx_hash, created_at, updated_at
        FROM campaigns WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(campaign)
}

/// Campaigns owned by a brand, newest first
pub async fn list_campaigns_for_brand(pool: &SqlitePool, brand_id: &str) -> Result<Vec<Campaign>> {
    let campaigns = sqlx::query_as::<_, Campaign>(
        r#"
        SELECT id, brand_id, title, description, budget, status, tx_hash, created_at, updated_at
        FROM campaigns WHERE brand_id = ? ORDER BY created_at DESC, id
        "#,
    )
    .bind(brand_id)
    .fetch_all(pool)
    .await?;

    Ok(campaigns)
}

/// Active campaigns across all brands (the marketplace view), newest first
pub async fn list_active_campaigns(pool: &SqlitePool) -> Result<Vec<Campaign>> {
    let campaigns = sqlx::query_as::<_, Campaign>(
        r#"
        SELECT id, brand_id, title, description, budget, status, tx_hash, created_at, updated_at
        FROM campaigns WHERE status = 'active' ORDER BY created_at DESC, id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(campaigns)
}

/// Partial campaign update: unset fields keep their current value
pub async fn update_campaign(
    pool: &SqlitePool,
    id: &str,
    title: Option<&str>,
    description: Option<&str>,
    budget: Option<f64>,
    status: Option<&str>,
) -> Result<Option<Campaign>> {
    sqlx::query(
        r#"
        UPDATE campaigns SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            budget = COALESCE(?, budget),
            status = COALESCE(?, status),
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(budget)
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;

    get_campaign(pool, id).await
}

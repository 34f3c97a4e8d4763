//! Onboarding and profile endpoints
//!
//! Users themselves are created by the identity-provider sync; these
//! endpoints attach a brand or influencer profile to the authenticated
//! user and expose the current user record.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

use ihub_common::auth::TokenData;
use ihub_common::models::User;

use crate::services::bio_categorizer;
use crate::AppState;

static WALLET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").expect("hard-coded pattern is valid"));

/// POST /api/v1/users/onboard/brand request body
#[derive(Debug, Deserialize, Validate)]
pub struct BrandCreate {
    #[validate(length(min = 2, max = 100))]
    pub company_name: String,
    pub industry: String,
    #[validate(url)]
    pub website: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BrandResponse {
    pub user_id: String,
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub verified: bool,
}

/// POST /api/v1/users/onboard/influencer request body
#[derive(Debug, Deserialize, Validate)]
pub struct InfluencerCreate {
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[serde(default)]
    pub niche: Vec<String>,
    pub wallet_address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InfluencerResponse {
    pub user_id: String,
    pub username: String,
    pub bio: Option<String>,
    pub niche: Vec<String>,
    pub metrics: serde_json::Value,
    pub wallet_address: Option<String>,
}

/// POST /api/v1/users/onboard/brand
///
/// Create a brand profile for the current user. 400 if one exists already.
pub async fn onboard_brand(
    State(state): State<AppState>,
    Extension(current_user): Extension<TokenData>,
    Json(payload): Json<BrandCreate>,
) -> Result<Json<BrandResponse>, UserError> {
    payload
        .validate()
        .map_err(|e| UserError::Validation(e.to_string()))?;

    if crate::db::get_brand(&state.db, &current_user.id)
        .await?
        .is_some()
    {
        return Err(UserError::ProfileExists("Brand profile already exists"));
    }

    let brand = crate::db::insert_brand(
        &state.db,
        &current_user.id,
        &payload.company_name,
        Some(&payload.industry),
        payload.website.as_deref(),
    )
    .await?;

    info!("Brand profile created for user {}", current_user.id);

    Ok(Json(BrandResponse {
        user_id: brand.user_id,
        company_name: brand.company_name,
        industry: brand.industry,
        website: brand.website,
        verified: brand.verified,
    }))
}

/// POST /api/v1/users/onboard/influencer
///
/// Create an influencer profile. When the caller supplies no niche tags,
/// the bio categorizer derives them from the bio text.
pub async fn onboard_influencer(
    State(state): State<AppState>,
    Extension(current_user): Extension<TokenData>,
    Json(payload): Json<InfluencerCreate>,
) -> Result<Json<InfluencerResponse>, UserError> {
    payload
        .validate()
        .map_err(|e| UserError::Validation(e.to_string()))?;

    if let Some(wallet) = &payload.wallet_address {
        if !WALLET_PATTERN.is_match(wallet) {
            return Err(UserError::Validation(format!(
                "Invalid wallet address: {}",
                wallet
            )));
        }
    }

    if crate::db::get_influencer(&state.db, &current_user.id)
        .await?
        .is_some()
    {
        return Err(UserError::ProfileExists(
            "Influencer profile already exists",
        ));
    }

    let niche = if payload.niche.is_empty() {
        let derived = bio_categorizer::categorize(payload.bio.as_deref().unwrap_or(""));
        if !derived.is_empty() {
            info!(
                "Derived niche {:?} from bio for user {}",
                derived, current_user.id
            );
        }
        derived
    } else {
        payload.niche.clone()
    };

    let influencer = crate::db::insert_influencer(
        &state.db,
        &current_user.id,
        &payload.username,
        payload.bio.as_deref(),
        &niche,
        payload.wallet_address.as_deref(),
    )
    .await?;

    Ok(Json(InfluencerResponse {
        niche: influencer.niche_tags(),
        metrics: influencer.metrics_value(),
        user_id: influencer.user_id,
        username: influencer.username,
        bio: influencer.bio,
        wallet_address: influencer.wallet_address,
    }))
}

/// GET /api/v1/users/me
///
/// Current user details. The token can be valid while the users table has
/// no matching row yet (identity sync lag); that is a 404.
pub async fn read_user_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<TokenData>,
) -> Result<Json<User>, UserError> {
    let user = crate::db::get_user(&state.db, &current_user.id)
        .await?
        .ok_or(UserError::UserNotFound)?;

    Ok(Json(user))
}

/// User API errors
#[derive(Debug)]
pub enum UserError {
    ProfileExists(&'static str),
    Validation(String),
    UserNotFound,
    Database(String),
}

impl From<ihub_common::Error> for UserError {
    fn from(err: ihub_common::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UserError::ProfileExists(msg) => (StatusCode::BAD_REQUEST, msg.to_string()),
            UserError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            UserError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "User found in Auth but not in users table".to_string(),
            ),
            UserError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

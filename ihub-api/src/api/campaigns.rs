//! Campaign endpoints
//!
//! Campaigns belong to brand profiles. Creation is brand-only; the
//! marketplace listing shows active campaigns to everyone else.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use ihub_common::auth::TokenData;
use ihub_common::models::{Campaign, CampaignStatus};

use crate::api::auth::{require_brand, AuthError};
use crate::AppState;

/// POST /api/v1/campaigns request body
#[derive(Debug, Deserialize, Validate)]
pub struct CampaignCreate {
    #[validate(length(min = 5, max = 100))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub budget: f64,
}

/// PATCH /api/v1/campaigns/:id request body; unset fields are unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct CampaignUpdate {
    #[validate(length(min = 5, max = 100))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(exclusive_min = 0.0))]
    pub budget: Option<f64>,
    pub status: Option<String>,
}

/// POST /api/v1/campaigns
///
/// Create a campaign in draft status for the caller's brand. When the
/// blockchain stub is configured the agreement is recorded and the
/// transaction hash stored alongside the campaign.
pub async fn create_campaign(
    State(state): State<AppState>,
    Extension(current_user): Extension<TokenData>,
    Json(payload): Json<CampaignCreate>,
) -> Result<Json<Campaign>, CampaignError> {
    payload
        .validate()
        .map_err(|e| CampaignError::Validation(e.to_string()))?;

    require_brand(&state.db, &current_user)
        .await
        .map_err(|e| match e {
            AuthError::Internal(msg) => CampaignError::Database(msg),
            _ => CampaignError::Forbidden,
        })?;

    if crate::db::get_brand(&state.db, &current_user.id)
        .await?
        .is_none()
    {
        return Err(CampaignError::Validation(
            "Brand profile required before creating campaigns".to_string(),
        ));
    }

    let campaign_id = Uuid::new_v4().to_string();

    // On-chain record keeping is best-effort: an unconfigured stub leaves
    // tx_hash empty rather than blocking campaign creation.
    let tx_hash = if state.blockchain.is_configured() {
        match state
            .blockchain
            .create_record(&campaign_id, &current_user.id, 0)
        {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!("Blockchain record failed for campaign {}: {}", campaign_id, e);
                None
            }
        }
    } else {
        None
    };

    let campaign = crate::db::insert_campaign(
        &state.db,
        &campaign_id,
        &current_user.id,
        &payload.title,
        payload.description.as_deref(),
        payload.budget,
        tx_hash.as_deref(),
    )
    .await?;

    info!("Campaign {} created by brand {}", campaign.id, current_user.id);

    Ok(Json(campaign))
}

/// GET /api/v1/campaigns
///
/// Brands see their own campaigns in every status; everyone else gets the
/// marketplace view of active campaigns.
pub async fn list_campaigns(
    State(state): State<AppState>,
    Extension(current_user): Extension<TokenData>,
) -> Result<Json<Vec<Campaign>>, CampaignError> {
    let user = crate::db::get_user(&state.db, &current_user.id).await?;

    let campaigns = match user {
        Some(record) if record.role == "brand" => {
            crate::db::list_campaigns_for_brand(&state.db, &current_user.id).await?
        }
        _ => crate::db::list_active_campaigns(&state.db).await?,
    };

    Ok(Json(campaigns))
}

/// GET /api/v1/campaigns/:id
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Campaign>, CampaignError> {
    let campaign = crate::db::get_campaign(&state.db, &id)
        .await?
        .ok_or(CampaignError::NotFound)?;

    Ok(Json(campaign))
}

/// PATCH /api/v1/campaigns/:id
///
/// Partial update by the owning brand only.
pub async fn update_campaign(
    State(state): State<AppState>,
    Extension(current_user): Extension<TokenData>,
    Path(id): Path<String>,
    Json(payload): Json<CampaignUpdate>,
) -> Result<Json<Campaign>, CampaignError> {
    payload
        .validate()
        .map_err(|e| CampaignError::Validation(e.to_string()))?;

    if let Some(status) = &payload.status {
        if CampaignStatus::parse(status).is_none() {
            return Err(CampaignError::Validation(format!(
                "Invalid status: {}",
                status
            )));
        }
    }

    let existing = crate::db::get_campaign(&state.db, &id)
        .await?
        .ok_or(CampaignError::NotFound)?;

    if existing.brand_id != current_user.id {
        return Err(CampaignError::Forbidden);
    }

    let updated = crate::db::update_campaign(
        &state.db,
        &id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.budget,
        payload.status.as_deref(),
    )
    .await?
    .ok_or(CampaignError::NotFound)?;

    Ok(Json(updated))
}

/// Campaign API errors
#[derive(Debug)]
pub enum CampaignError {
    Validation(String),
    Forbidden,
    NotFound,
    Database(String),
}

impl From<ihub_common::Error> for CampaignError {
    fn from(err: ihub_common::Error) -> Self {
        CampaignError::Database(err.to_string())
    }
}

impl IntoResponse for CampaignError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            CampaignError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            CampaignError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Not enough permissions".to_string(),
            ),
            CampaignError::NotFound => (StatusCode::NOT_FOUND, "Campaign not found".to_string()),
            CampaignError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Database error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

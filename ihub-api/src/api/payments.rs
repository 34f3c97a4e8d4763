//! Payment endpoints
//!
//! Order creation is authenticated; the webhook is public and verified by
//! gateway signature instead.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};
use validator::Validate;

use ihub_common::auth::TokenData;

use crate::services::payment::{PaymentError, PaymentOrder};
use crate::AppState;

/// Webhook signature header sent by the gateway
const SIGNATURE_HEADER: &str = "x-razorpay-signature";

/// POST /api/v1/payments/order request body
#[derive(Debug, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    pub currency: Option<String>,
    pub campaign_id: Option<String>,
}

/// POST /api/v1/payments/order
///
/// Create a payment order for a campaign budget. The campaign id travels
/// in the order notes so webhook events can be mapped back.
pub async fn create_order(
    State(state): State<AppState>,
    Extension(current_user): Extension<TokenData>,
    Json(payload): Json<OrderCreate>,
) -> Result<Json<PaymentOrder>, PaymentApiError> {
    payload
        .validate()
        .map_err(|e| PaymentApiError::Validation(e.to_string()))?;

    let currency = match payload.currency {
        Some(currency) => currency,
        None => ihub_common::db::get_setting(&state.db, "default_currency")
            .await
            .map_err(|e| PaymentApiError::Internal(e.to_string()))?
            .unwrap_or_else(|| "INR".to_string()),
    };

    let notes = json!({
        "campaign_id": payload.campaign_id,
        "user_id": current_user.id,
    });

    let order = state
        .payments
        .create_order(payload.amount, &currency, notes)
        .await?;

    info!(
        "Payment order {} created for user {} ({} {})",
        order.id, current_user.id, payload.amount, currency
    );

    Ok(Json(order))
}

/// POST /api/v1/payments/webhook
///
/// Gateway callback. Authenticity comes from the HMAC signature over the
/// raw body, not from a bearer token.
pub async fn payment_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, PaymentApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(PaymentApiError::MissingSignature)?;

    if !state.payments.verify_webhook_signature(&body, signature) {
        warn!("Rejected payment webhook with invalid signature");
        return Err(PaymentApiError::InvalidSignature);
    }

    // Event processing (capturing payments against campaigns) is handled
    // by the reconciliation job; the endpoint only acknowledges receipt.
    Ok(Json(json!({ "status": "ok" })))
}

/// Payment API errors
#[derive(Debug)]
pub enum PaymentApiError {
    Validation(String),
    MissingSignature,
    InvalidSignature,
    Gateway(String),
    Internal(String),
}

impl From<PaymentError> for PaymentApiError {
    fn from(err: PaymentError) -> Self {
        PaymentApiError::Gateway(err.to_string())
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PaymentApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            PaymentApiError::MissingSignature => (
                StatusCode::BAD_REQUEST,
                "Missing webhook signature header".to_string(),
            ),
            PaymentApiError::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                "Invalid webhook signature".to_string(),
            ),
            PaymentApiError::Gateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            PaymentApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

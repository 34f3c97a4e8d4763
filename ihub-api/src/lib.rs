//! ihub-api library - InfluencerHub REST backend
//!
//! Exposes the application state and router for the binary and for
//! integration tests.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use ihub_common::config::Settings;

pub mod api;
pub mod db;
pub mod services;

use services::blockchain::BlockchainService;
use services::payment::PaymentService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Runtime configuration
    pub settings: Arc<Settings>,
    /// Campaign record-keeping stub
    pub blockchain: Arc<BlockchainService>,
    /// Payment gateway client (mock mode when unconfigured)
    pub payments: Arc<PaymentService>,
}

impl AppState {
    /// Create new application state; services are constructed once and
    /// shared by reference.
    pub fn new(db: SqlitePool, settings: Settings) -> Self {
        let blockchain = Arc::new(BlockchainService::new(&settings));
        let payments = Arc::new(PaymentService::new(&settings));

        Self {
            db,
            settings: Arc::new(settings),
            blockchain,
            payments,
        }
    }
}

/// Build application router
///
/// Protected routes require a Bearer token from the identity provider;
/// health, UI pages, and the signature-verified payment webhook are public.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require authentication)
    let protected = Router::new()
        .route("/api/v1/users/onboard/brand", post(api::users::onboard_brand))
        .route(
            "/api/v1/users/onboard/influencer",
            post(api::users::onboard_influencer),
        )
        .route("/api/v1/users/me", get(api::users::read_user_me))
        .route(
            "/api/v1/campaigns",
            post(api::campaigns::create_campaign).get(api::campaigns::list_campaigns),
        )
        .route(
            "/api/v1/campaigns/:id",
            get(api::campaigns::get_campaign).patch(api::campaigns::update_campaign),
        )
        .route("/api/v1/analysis/categorize", post(api::analysis::categorize))
        .route(
            "/api/v1/analysis/brand-mentions",
            post(api::analysis::detect_brand_mentions),
        )
        .route(
            "/api/v1/analysis/sentiment",
            post(api::analysis::analyze_sentiment),
        )
        .route("/api/v1/payments/order", post(api::payments::create_order))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::auth_middleware,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/", get(api::ui::serve_index))
        .route("/login", get(api::ui::serve_login))
        .route("/dashboard", get(api::ui::serve_dashboard))
        .route("/static/styles.css", get(api::ui::serve_styles))
        .route(
            "/api/v1/payments/webhook",
            post(api::payments::payment_webhook),
        )
        .merge(api::health_routes());

    // Combine routers
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
